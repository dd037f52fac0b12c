use crate::{
    dtos::reference::SemesterResponse,
    error::ApiError,
    extract::{ValidForm, ValidPath},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::semester::SemesterService;
use models::{error::ActionResult, reference::SemesterForm};
use uuid::Uuid;

/// List semesters, most recent first
#[utoipa::path(
    get,
    path = "/semesters",
    responses(
        (status = 200, description = "All semesters", body = [SemesterResponse]),
        (status = 500, description = "Internal server error", body = ActionResult)
    ),
    tag = "Semesters"
)]
pub async fn list_semesters(
    State(state): State<AppState>,
) -> Result<Json<Vec<SemesterResponse>>, ApiError> {
    let semesters = SemesterService::list(&state.db).await?;
    Ok(Json(semesters.into_iter().map(SemesterResponse::from).collect()))
}

/// Get a semester by ID
#[utoipa::path(
    get,
    path = "/semesters/{id}",
    params(("id" = Uuid, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Semester found", body = SemesterResponse),
        (status = 404, description = "Semester not found", body = ActionResult)
    ),
    tag = "Semesters"
)]
pub async fn get_semester(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<SemesterResponse>, ApiError> {
    Ok(Json(SemesterService::get(&state.db, id).await?.into()))
}

/// Create a semester
#[utoipa::path(
    post,
    path = "/semesters",
    request_body(content = SemesterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Semester created", body = ActionResult),
        (status = 400, description = "Invalid semester input", body = ActionResult),
        (status = 409, description = "Semester already exists", body = ActionResult)
    ),
    tag = "Semesters"
)]
pub async fn create_semester(
    State(state): State<AppState>,
    ValidForm(form): ValidForm<SemesterForm>,
) -> Result<(StatusCode, Json<ActionResult>), ApiError> {
    let semester = SemesterService::create(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::ok(Some(semester.id)))))
}

/// Change a semester's academic year or term
#[utoipa::path(
    put,
    path = "/semesters/{id}",
    params(("id" = Uuid, Path, description = "Semester ID")),
    request_body(content = SemesterForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Semester updated", body = ActionResult),
        (status = 400, description = "Invalid semester input", body = ActionResult),
        (status = 404, description = "Semester not found", body = ActionResult),
        (status = 409, description = "Semester already exists", body = ActionResult)
    ),
    tag = "Semesters"
)]
pub async fn update_semester(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidForm(form): ValidForm<SemesterForm>,
) -> Result<Json<ActionResult>, ApiError> {
    let semester = SemesterService::update(&state.db, id, form).await?;
    Ok(Json(ActionResult::ok(Some(semester.id))))
}

/// Delete a semester with no schedule entries
#[utoipa::path(
    delete,
    path = "/semesters/{id}",
    params(("id" = Uuid, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Semester deleted", body = ActionResult),
        (status = 404, description = "Semester not found", body = ActionResult),
        (status = 409, description = "Semester still has schedule entries", body = ActionResult)
    ),
    tag = "Semesters"
)]
pub async fn delete_semester(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<ActionResult>, ApiError> {
    SemesterService::delete(&state.db, id).await?;
    Ok(Json(ActionResult::ok(None)))
}
