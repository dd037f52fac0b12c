use crate::{
    day::DayOfWeek,
    time::{MinuteOfDay, TimeSlot},
};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result as FmtResult};
use strum::{AsRefStr, Display as StrumDisplay};
use thiserror::Error;
use uuid::Uuid;

/// Machine-readable classification of a rejected action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, StrumDisplay, AsRefStr)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum ErrorKind {
    InvalidInput,
    InvalidTimeFormat,
    InvalidTimeRange,
    InvalidCapacity,
    RoomConflict,
    LecturerConflict,
    PersistenceFailure,
    NotFound,
    Duplicate,
    InUse,
}

/// The booking a candidate collided with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "detectedAt", rename_all = "camelCase")]
pub enum Conflict {
    /// Found by the pre-commit overlap query
    #[serde(rename_all = "camelCase")]
    Existing {
        schedule_id: Uuid,
        day: DayOfWeek,
        slot: TimeSlot,
    },
    /// Rejected by the storage layer's exclusion constraint while committing
    Commit,
}

impl Display for Conflict {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Existing { day, slot, .. } => write!(f, "{day} {slot}"),
            Self::Commit => write!(f, "booked concurrently"),
        }
    }
}

/// Why a schedule entry could not be created or updated.
///
/// Validation stops at the first failed rule, so a single error is reported per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A required field is missing or malformed, or the day code is unrecognized
    #[error("Invalid schedule input: {0}")]
    InvalidInput(String),

    #[error("Invalid time format: {0:?}")]
    InvalidTimeFormat(String),

    #[error("Start must be before end ({start} >= {end})")]
    InvalidTimeRange { start: MinuteOfDay, end: MinuteOfDay },

    #[error("Invalid capacity override: {0:?}")]
    InvalidCapacity(String),

    #[error("Time conflict: room already booked ({0})")]
    RoomConflict(Conflict),

    #[error("Time conflict: lecturer already scheduled ({0})")]
    LecturerConflict(Conflict),

    /// The commit itself failed; not a detected double-booking
    #[error("Failed to save schedule: {0}")]
    PersistenceFailure(String),
}

impl ScheduleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::InvalidTimeFormat(_) => ErrorKind::InvalidTimeFormat,
            Self::InvalidTimeRange { .. } => ErrorKind::InvalidTimeRange,
            Self::InvalidCapacity(_) => ErrorKind::InvalidCapacity,
            Self::RoomConflict(_) => ErrorKind::RoomConflict,
            Self::LecturerConflict(_) => ErrorKind::LecturerConflict,
            Self::PersistenceFailure(_) => ErrorKind::PersistenceFailure,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::RoomConflict(_) | Self::LecturerConflict(_))
    }

    /// The conflicting booking, if this is a conflict
    pub fn conflict(&self) -> Option<&Conflict> {
        match self {
            Self::RoomConflict(conflict) | Self::LecturerConflict(conflict) => Some(conflict),
            _ => None,
        }
    }
}

/// Errors for semester, lecturer, subject and room operations, and schedule lookups
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("{entity} already exists")]
    Duplicate { entity: &'static str },

    /// Blocked by a row that still references it
    #[error("Unable to delete (in use?)")]
    InUse,

    #[error("Failed to save {entity}: {message}")]
    PersistenceFailure {
        entity: &'static str,
        message: String,
    },
}

impl RecordError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Duplicate { .. } => ErrorKind::Duplicate,
            Self::InUse => ErrorKind::InUse,
            Self::PersistenceFailure { .. } => ErrorKind::PersistenceFailure,
        }
    }
}

/// Outcome of a mutation as handed back to a form: `{ "ok": true, "id": .. }` or
/// `{ "ok": false, "errorKind": .., "message": .. }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub conflict: Option<Conflict>,
}

impl ActionResult {
    pub fn ok(id: Option<Uuid>) -> Self {
        Self {
            ok: true,
            id,
            error_kind: None,
            message: None,
            conflict: None,
        }
    }

    fn failed(kind: ErrorKind, message: String) -> Self {
        Self {
            ok: false,
            id: None,
            error_kind: Some(kind),
            message: Some(message),
            conflict: None,
        }
    }
}

impl From<&ScheduleError> for ActionResult {
    fn from(err: &ScheduleError) -> Self {
        Self {
            conflict: err.conflict().cloned(),
            ..Self::failed(err.kind(), err.to_string())
        }
    }
}

impl From<&RecordError> for ActionResult {
    fn from(err: &RecordError) -> Self {
        Self::failed(err.kind(), err.to_string())
    }
}
