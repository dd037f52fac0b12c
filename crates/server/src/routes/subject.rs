use crate::{
    dtos::reference::SubjectResponse,
    error::ApiError,
    extract::{ValidForm, ValidPath},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::subject::SubjectService;
use models::{error::ActionResult, reference::SubjectForm};
use uuid::Uuid;

/// List subjects ordered by code
#[utoipa::path(
    get,
    path = "/subjects",
    responses(
        (status = 200, description = "All subjects", body = [SubjectResponse]),
        (status = 500, description = "Internal server error", body = ActionResult)
    ),
    tag = "Subjects"
)]
pub async fn list_subjects(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubjectResponse>>, ApiError> {
    let subjects = SubjectService::list(&state.db).await?;
    Ok(Json(subjects.into_iter().map(SubjectResponse::from).collect()))
}

/// Get a subject by ID
#[utoipa::path(
    get,
    path = "/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject found", body = SubjectResponse),
        (status = 404, description = "Subject not found", body = ActionResult)
    ),
    tag = "Subjects"
)]
pub async fn get_subject(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<SubjectResponse>, ApiError> {
    Ok(Json(SubjectService::get(&state.db, id).await?.into()))
}

/// Create a subject
#[utoipa::path(
    post,
    path = "/subjects",
    request_body(content = SubjectForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Subject created", body = ActionResult),
        (status = 400, description = "Invalid subject input", body = ActionResult),
        (status = 409, description = "Subject code already taken", body = ActionResult)
    ),
    tag = "Subjects"
)]
pub async fn create_subject(
    State(state): State<AppState>,
    ValidForm(form): ValidForm<SubjectForm>,
) -> Result<(StatusCode, Json<ActionResult>), ApiError> {
    let subject = SubjectService::create(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::ok(Some(subject.id)))))
}

/// Change a subject's code, name or credits
#[utoipa::path(
    put,
    path = "/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    request_body(content = SubjectForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Subject updated", body = ActionResult),
        (status = 400, description = "Invalid subject input", body = ActionResult),
        (status = 404, description = "Subject not found", body = ActionResult),
        (status = 409, description = "Subject code already taken", body = ActionResult)
    ),
    tag = "Subjects"
)]
pub async fn update_subject(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidForm(form): ValidForm<SubjectForm>,
) -> Result<Json<ActionResult>, ApiError> {
    let subject = SubjectService::update(&state.db, id, form).await?;
    Ok(Json(ActionResult::ok(Some(subject.id))))
}

/// Delete a subject with no schedule entries
#[utoipa::path(
    delete,
    path = "/subjects/{id}",
    params(("id" = Uuid, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject deleted", body = ActionResult),
        (status = 404, description = "Subject not found", body = ActionResult),
        (status = 409, description = "Subject is still scheduled", body = ActionResult)
    ),
    tag = "Subjects"
)]
pub async fn delete_subject(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<ActionResult>, ApiError> {
    SubjectService::delete(&state.db, id).await?;
    Ok(Json(ActionResult::ok(None)))
}
