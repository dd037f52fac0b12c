use crate::{
    dtos::reference::RoomResponse,
    error::ApiError,
    extract::{ValidForm, ValidPath},
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::room::RoomService;
use models::{error::ActionResult, reference::RoomForm};
use uuid::Uuid;

/// List rooms ordered by name
#[utoipa::path(
    get,
    path = "/rooms",
    responses(
        (status = 200, description = "All rooms", body = [RoomResponse]),
        (status = 500, description = "Internal server error", body = ActionResult)
    ),
    tag = "Rooms"
)]
pub async fn list_rooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let rooms = RoomService::list(&state.db).await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// Get a room by ID
#[utoipa::path(
    get,
    path = "/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room found", body = RoomResponse),
        (status = 404, description = "Room not found", body = ActionResult)
    ),
    tag = "Rooms"
)]
pub async fn get_room(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<RoomResponse>, ApiError> {
    Ok(Json(RoomService::get(&state.db, id).await?.into()))
}

/// Create a room
#[utoipa::path(
    post,
    path = "/rooms",
    request_body(content = RoomForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Room created", body = ActionResult),
        (status = 400, description = "Invalid room input", body = ActionResult),
        (status = 409, description = "Room name already taken", body = ActionResult)
    ),
    tag = "Rooms"
)]
pub async fn create_room(
    State(state): State<AppState>,
    ValidForm(form): ValidForm<RoomForm>,
) -> Result<(StatusCode, Json<ActionResult>), ApiError> {
    let room = RoomService::create(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(ActionResult::ok(Some(room.id)))))
}

/// Rename a room or change its capacity
#[utoipa::path(
    put,
    path = "/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room ID")),
    request_body(content = RoomForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Room updated", body = ActionResult),
        (status = 400, description = "Invalid room input", body = ActionResult),
        (status = 404, description = "Room not found", body = ActionResult),
        (status = 409, description = "Room name already taken", body = ActionResult)
    ),
    tag = "Rooms"
)]
pub async fn update_room(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
    ValidForm(form): ValidForm<RoomForm>,
) -> Result<Json<ActionResult>, ApiError> {
    let room = RoomService::update(&state.db, id, form).await?;
    Ok(Json(ActionResult::ok(Some(room.id))))
}

/// Delete a room no schedule entry uses
#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room deleted", body = ActionResult),
        (status = 404, description = "Room not found", body = ActionResult),
        (status = 409, description = "Room is still booked", body = ActionResult)
    ),
    tag = "Rooms"
)]
pub async fn delete_room(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<Uuid>,
) -> Result<Json<ActionResult>, ApiError> {
    RoomService::delete(&state.db, id).await?;
    Ok(Json(ActionResult::ok(None)))
}
