use crate::{
    dtos::reference::LecturerResponse,
    error::ApiError,
    extract::{ValidForm, ValidPath},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::lecturer::LecturerService;
use models::{error::ActionResult, reference::LecturerForm};
use uuid::Uuid;

/// List lecturers ordered by name
#[utoipa::path(
    get,
    path = "/lecturers",
    responses(
        (status = 200, description = "All lecturers", body = [LecturerResponse]),
        (status = 500, description = "Internal server error", body = ActionResult)
    ),
    tag = "Lecturers"
)]
pub async fn list_lecturers(
    State(state): State<AppState>,
) -> Result<Json<Vec<LecturerResponse>>, ApiError> {
    let lecturers = LecturerService::list(&state.db).await?;
    Ok(Json(lecturers.into_iter().map(LecturerResponse::from).collect()))
}

/// Get a lecturer by ID
#[utoipa::path(
    get,
    path = "/lecturers/{id}",
    params(("id" = Uuid, Path, description = "Lecturer ID")),
    responses(
        (status = 200, description = "Lecturer found", body = LecturerResponse),
        (status = 404, description = "Lecturer not found", body = ActionResult)
    ),
    tag = "Lecturers"
)]
pub async fn get_lecturer(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<LecturerResponse>, ApiError> {
    Ok(Json(LecturerService::get(&state.db, id).await?.into()))
}

/// Create a lecturer
#[utoipa::path(
    post,
    path = "/lecturers",
    request_body(content = LecturerForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Lecturer created", body = ActionResult),
        (status = 400, description = "Invalid lecturer input", body = ActionResult),
        (status = 409, description = "Lecturer name already taken", body = ActionResult)
    ),
    tag = "Lecturers"
)]
pub async fn create_lecturer(
    State(state): State<AppState>,
    ValidForm(form): ValidForm<LecturerForm>,
) -> Result<(StatusCode, Json<ActionResult>), ApiError> {
    let lecturer = LecturerService::create(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::ok(Some(lecturer.id)))))
}

/// Rename a lecturer
#[utoipa::path(
    put,
    path = "/lecturers/{id}",
    params(("id" = Uuid, Path, description = "Lecturer ID")),
    request_body(content = LecturerForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Lecturer updated", body = ActionResult),
        (status = 400, description = "Invalid lecturer input", body = ActionResult),
        (status = 404, description = "Lecturer not found", body = ActionResult),
        (status = 409, description = "Lecturer name already taken", body = ActionResult)
    ),
    tag = "Lecturers"
)]
pub async fn update_lecturer(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidForm(form): ValidForm<LecturerForm>,
) -> Result<Json<ActionResult>, ApiError> {
    let lecturer = LecturerService::update(&state.db, id, form).await?;
    Ok(Json(ActionResult::ok(Some(lecturer.id))))
}

/// Delete a lecturer with no schedule entries
#[utoipa::path(
    delete,
    path = "/lecturers/{id}",
    params(("id" = Uuid, Path, description = "Lecturer ID")),
    responses(
        (status = 200, description = "Lecturer deleted", body = ActionResult),
        (status = 404, description = "Lecturer not found", body = ActionResult),
        (status = 409, description = "Lecturer is still assigned", body = ActionResult)
    ),
    tag = "Lecturers"
)]
pub async fn delete_lecturer(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<ActionResult>, ApiError> {
    LecturerService::delete(&state.db, id).await?;
    Ok(Json(ActionResult::ok(None)))
}
