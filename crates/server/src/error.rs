use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use models::error::{ActionResult, ErrorKind, RecordError, ScheduleError};

/// A failed action, rendered as an `ActionResult` body
#[derive(Debug)]
pub enum ApiError {
    Schedule(ScheduleError),
    Record(RecordError),
}

impl From<ScheduleError> for ApiError {
    fn from(err: ScheduleError) -> Self {
        Self::Schedule(err)
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        Self::Record(err)
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput
        | ErrorKind::InvalidTimeFormat
        | ErrorKind::InvalidTimeRange
        | ErrorKind::InvalidCapacity => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::RoomConflict
        | ErrorKind::LecturerConflict
        | ErrorKind::Duplicate
        | ErrorKind::InUse => StatusCode::CONFLICT,
        ErrorKind::PersistenceFailure => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            Self::Schedule(err) => ActionResult::from(err),
            Self::Record(err) => ActionResult::from(err),
        };
        let status = body
            .error_kind
            .map(status_for)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(body)).into_response()
    }
}
