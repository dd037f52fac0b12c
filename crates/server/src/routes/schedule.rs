use crate::{
    dtos::schedule::{CheckParams, ScheduleResponse, ScheduleRowResponse},
    error::ApiError,
    extract::{ValidForm, ValidPath, ValidQuery},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::{schedule::ScheduleService, semester::SemesterService};
use log::warn;
use models::{
    error::{ActionResult, RecordError},
    schedule::ScheduleForm,
};
use uuid::Uuid;

/// List a semester's schedule with effective capacities
#[utoipa::path(
    get,
    path = "/semesters/{id}/schedules",
    params(("id" = Uuid, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Entries sorted by day, start time and room", body = [ScheduleRowResponse]),
        (status = 404, description = "Semester not found", body = ActionResult)
    ),
    tag = "Schedules"
)]
pub async fn list_semester_schedules(
    State(state): State<AppState>,
    ValidPath(semester_id): ValidPath<Uuid>,
) -> Result<Json<Vec<ScheduleRowResponse>>, ApiError> {
    SemesterService::get(&state.db, semester_id).await?;

    let rows = ScheduleService::list_for_semester(&state.db, semester_id).await?;
    Ok(Json(rows.into_iter().map(ScheduleRowResponse::from).collect()))
}

/// Get a schedule entry by ID
#[utoipa::path(
    get,
    path = "/schedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule entry ID")),
    responses(
        (status = 200, description = "Entry found", body = ScheduleResponse),
        (status = 404, description = "Entry not found", body = ActionResult)
    ),
    tag = "Schedules"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let model = ScheduleService::get(&state.db, id).await?;

    let Some(response) = ScheduleResponse::from_model(model) else {
        warn!("Schedule {id} has an invalid time range");
        return Err(RecordError::PersistenceFailure {
            entity: "schedule",
            message: "stored time range is invalid".to_string(),
        }
        .into());
    };

    Ok(Json(response))
}

/// Create a schedule entry if neither its room nor its lecturer is already taken
#[utoipa::path(
    post,
    path = "/schedules",
    request_body(content = ScheduleForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Entry created", body = ActionResult),
        (status = 400, description = "Invalid input, time format, time range or capacity", body = ActionResult),
        (status = 409, description = "Room or lecturer already booked", body = ActionResult),
        (status = 500, description = "Failed to save schedule", body = ActionResult)
    ),
    tag = "Schedules"
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    ValidForm(form): ValidForm<ScheduleForm>,
) -> Result<(StatusCode, Json<ActionResult>), ApiError> {
    let id = ScheduleService::create(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::ok(Some(id)))))
}

/// Replace a schedule entry; the entry's current slot never conflicts with itself
#[utoipa::path(
    put,
    path = "/schedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule entry ID")),
    request_body(content = ScheduleForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Entry updated", body = ActionResult),
        (status = 400, description = "Invalid input, time format, time range or capacity", body = ActionResult),
        (status = 404, description = "Entry not found", body = ActionResult),
        (status = 409, description = "Room or lecturer already booked", body = ActionResult)
    ),
    tag = "Schedules"
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidForm(form): ValidForm<ScheduleForm>,
) -> Result<Json<ActionResult>, ApiError> {
    ScheduleService::get(&state.db, id).await?;

    let id = ScheduleService::update(&state.db, id, form).await?;
    Ok(Json(ActionResult::ok(Some(id))))
}

/// Delete a schedule entry
#[utoipa::path(
    delete,
    path = "/schedules/{id}",
    params(("id" = Uuid, Path, description = "Schedule entry ID")),
    responses(
        (status = 200, description = "Entry deleted", body = ActionResult),
        (status = 404, description = "Entry not found", body = ActionResult)
    ),
    tag = "Schedules"
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<ActionResult>, ApiError> {
    ScheduleService::delete(&state.db, id).await?;
    Ok(Json(ActionResult::ok(None)))
}

/// Validate a schedule entry without saving it
#[utoipa::path(
    post,
    path = "/schedules/check",
    params(CheckParams),
    request_body(content = ScheduleForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Entry would be accepted", body = ActionResult),
        (status = 400, description = "Invalid input, time format, time range or capacity", body = ActionResult),
        (status = 409, description = "Room or lecturer already booked", body = ActionResult)
    ),
    tag = "Schedules"
)]
pub async fn check_schedule(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<CheckParams>,
    ValidForm(form): ValidForm<ScheduleForm>,
) -> Result<Json<ActionResult>, ApiError> {
    ScheduleService::check(&state.db, form, params.exclude_id).await?;
    Ok(Json(ActionResult::ok(params.exclude_id)))
}
