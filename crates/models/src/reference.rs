//! Forms for the reference data a schedule entry points at.
//!
//! Each form is raw input; `validate` trims it and enforces the same limits the
//! database columns and CHECK constraints carry.

use crate::{
    error::RecordError,
    number::{non_blank, parse_finite, parse_whole},
    term::Term,
};
use serde::Deserialize;

/// Inclusive bounds for subject credit values
pub const CREDIT_RANGE: std::ops::RangeInclusive<i32> = 1..=4;

fn required(value: Option<&str>, field: &str, max_len: usize) -> Result<String, RecordError> {
    let value =
        non_blank(value).ok_or_else(|| RecordError::InvalidInput(format!("{field} is required")))?;

    if value.chars().count() > max_len {
        return Err(RecordError::InvalidInput(format!(
            "{field} must be at most {max_len} characters"
        )));
    }

    Ok(value.to_owned())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SemesterForm {
    /// Free text, e.g. `2024/2025`
    pub academic_year: Option<String>,
    /// One of `S1`, `S2`, `S3`
    pub term: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSemester {
    pub academic_year: String,
    pub term: Term,
}

impl SemesterForm {
    pub fn validate(self) -> Result<NewSemester, RecordError> {
        let academic_year = required(self.academic_year.as_deref(), "academicYear", 16)?;
        let term = non_blank(self.term.as_deref())
            .and_then(|term| term.parse().ok())
            .ok_or_else(|| RecordError::InvalidInput("Invalid semester input".to_string()))?;

        Ok(NewSemester {
            academic_year,
            term,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LecturerForm {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLecturer {
    pub name: String,
}

impl LecturerForm {
    pub fn validate(self) -> Result<NewLecturer, RecordError> {
        Ok(NewLecturer {
            name: required(self.name.as_deref(), "name", 128)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SubjectForm {
    pub code: Option<String>,
    pub name: Option<String>,
    /// Defaults to 1
    pub paid_credit: Option<String>,
    /// Defaults to 1
    pub academic_credit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
    pub code: String,
    pub name: String,
    pub paid_credit: i32,
    pub academic_credit: i32,
}

fn credit(value: Option<&str>, field: &str) -> Result<i32, RecordError> {
    let Some(raw) = non_blank(value) else {
        return Ok(*CREDIT_RANGE.start());
    };

    parse_whole(raw)
        .filter(|credit| CREDIT_RANGE.contains(credit))
        .ok_or_else(|| {
            RecordError::InvalidInput(format!(
                "{field} must be a whole number between {} and {}",
                CREDIT_RANGE.start(),
                CREDIT_RANGE.end()
            ))
        })
}

impl SubjectForm {
    pub fn validate(self) -> Result<NewSubject, RecordError> {
        Ok(NewSubject {
            code: required(self.code.as_deref(), "code", 32)?,
            name: required(self.name.as_deref(), "name", 256)?,
            paid_credit: credit(self.paid_credit.as_deref(), "paidCredit")?,
            academic_credit: credit(self.academic_credit.as_deref(), "academicCredit")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RoomForm {
    pub name: Option<String>,
    /// Seats; a positive whole number
    pub capacity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoom {
    pub name: String,
    pub capacity: i32,
}

impl RoomForm {
    pub fn validate(self) -> Result<NewRoom, RecordError> {
        let name = required(self.name.as_deref(), "name", 64)?;
        let capacity = non_blank(self.capacity.as_deref())
            .filter(|raw| parse_finite(raw).is_some_and(|value| value > 0.0))
            .and_then(parse_whole)
            .ok_or_else(|| RecordError::InvalidInput("Invalid room input".to_string()))?;

        Ok(NewRoom { name, capacity })
    }
}
