pub mod health;
pub mod lecturer;
pub mod room;
pub mod root;
pub mod schedule;
pub mod semester;
pub mod subject;

use crate::{doc::ApiDoc, state::AppState, utils::logging::log_requests};
use axum::{Router, middleware, routing::get, routing::post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route(
            "/semesters",
            get(semester::list_semesters).post(semester::create_semester),
        )
        .route(
            "/semesters/{id}",
            get(semester::get_semester)
                .put(semester::update_semester)
                .delete(semester::delete_semester),
        )
        .route(
            "/semesters/{id}/schedules",
            get(schedule::list_semester_schedules),
        )
        .route(
            "/lecturers",
            get(lecturer::list_lecturers).post(lecturer::create_lecturer),
        )
        .route(
            "/lecturers/{id}",
            get(lecturer::get_lecturer)
                .put(lecturer::update_lecturer)
                .delete(lecturer::delete_lecturer),
        )
        .route(
            "/subjects",
            get(subject::list_subjects).post(subject::create_subject),
        )
        .route(
            "/subjects/{id}",
            get(subject::get_subject)
                .put(subject::update_subject)
                .delete(subject::delete_subject),
        )
        .route("/rooms", get(room::list_rooms).post(room::create_room))
        .route(
            "/rooms/{id}",
            get(room::get_room)
                .put(room::update_room)
                .delete(room::delete_room),
        )
        .route("/schedules", post(schedule::create_schedule))
        .route("/schedules/check", post(schedule::check_schedule))
        .route(
            "/schedules/{id}",
            get(schedule::get_schedule)
                .put(schedule::update_schedule)
                .delete(schedule::delete_schedule),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(log_requests))
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header},
    };
    use chrono::Utc;
    use database::entities::{rooms, schedules};
    use models::day::DayOfWeek;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    const FORM: &str = "application/x-www-form-urlencoded";

    fn app(db: DatabaseConnection) -> Router {
        router(AppState { db: Arc::new(db) })
    }

    fn empty_db() -> DatabaseConnection {
        MockDatabase::new(DatabaseBackend::Postgres).into_connection()
    }

    fn form_request(method: &str, uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM)
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn schedule_body(ids: [Uuid; 4], start: &str, end: &str) -> String {
        let [semester, subject, lecturer, room] = ids;
        format!(
            "semesterId={semester}&subjectId={subject}&lecturerId={lecturer}&roomId={room}\
             &day=Mon&startTime={start}&endTime={end}"
        )
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(empty_db())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_schedule_with_reversed_times_is_rejected() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let response = app(empty_db())
            .oneshot(form_request(
                "POST",
                "/schedules",
                schedule_body(ids, "14:00", "13:00"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["errorKind"], "InvalidTimeRange");
    }

    #[tokio::test]
    async fn test_schedule_created() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let stored = schedules::Model {
            id: Uuid::new_v4(),
            semester_id: ids[0],
            subject_id: ids[1],
            lecturer_id: ids[2],
            room_id: ids[3],
            day: DayOfWeek::Mon,
            start_minute: 480,
            end_minute: 600,
            capacity_override: None,
            class_year: None,
            created_at: Utc::now().naive_utc(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                Vec::<schedules::Model>::new(),
                Vec::new(),
                vec![stored.clone()],
            ])
            .into_connection();

        let response = app(db)
            .oneshot(form_request(
                "POST",
                "/schedules",
                schedule_body(ids, "08:00", "10:00"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["id"], stored.id.to_string());
    }

    #[tokio::test]
    async fn test_schedule_room_conflict() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let existing = schedules::Model {
            id: Uuid::new_v4(),
            semester_id: ids[0],
            subject_id: Uuid::new_v4(),
            lecturer_id: Uuid::new_v4(),
            room_id: ids[3],
            day: DayOfWeek::Mon,
            start_minute: 540,
            end_minute: 660,
            capacity_override: None,
            class_year: None,
            created_at: Utc::now().naive_utc(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()]])
            .into_connection();

        let response = app(db)
            .oneshot(form_request(
                "POST",
                "/schedules/check",
                schedule_body(ids, "08:00", "10:00"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = json_body(response).await;
        assert_eq!(body["errorKind"], "RoomConflict");
        assert_eq!(body["conflict"]["scheduleId"], existing.id.to_string());
    }

    #[tokio::test]
    async fn test_invalid_room_capacity() {
        let response = app(empty_db())
            .oneshot(form_request(
                "POST",
                "/rooms",
                "name=A101&capacity=-3".to_string(),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["message"], "Invalid room input");
    }

    #[tokio::test]
    async fn test_delete_missing_room() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let response = app(db)
            .oneshot(
                Request::delete(format!("/rooms/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["errorKind"], "NotFound");
    }

    #[tokio::test]
    async fn test_list_rooms() {
        let room = rooms::Model {
            id: Uuid::new_v4(),
            name: "A101".to_string(),
            capacity: 30,
            created_at: Utc::now().naive_utc(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![room.clone()]])
            .into_connection();

        let response = app(db)
            .oneshot(Request::get("/rooms").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body[0]["name"], "A101");
        assert_eq!(body[0]["capacity"], 30);
    }

    #[tokio::test]
    async fn test_malformed_id_is_an_action_result() {
        let response = app(empty_db())
            .oneshot(Request::delete("/rooms/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["errorKind"], "InvalidInput");
        assert_eq!(body["message"], "Invalid id");
    }

    #[tokio::test]
    async fn test_form_without_content_type_is_an_action_result() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let response = app(empty_db())
            .oneshot(
                Request::post("/schedules")
                    .body(Body::from(schedule_body(ids, "08:00", "10:00")))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["ok"], false);
        assert_eq!(body["errorKind"], "InvalidInput");
    }

    #[tokio::test]
    async fn test_malformed_exclude_id_is_an_action_result() {
        let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
        let response = app(empty_db())
            .oneshot(form_request(
                "POST",
                "/schedules/check?excludeId=nope",
                schedule_body(ids, "08:00", "10:00"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["errorKind"], "InvalidInput");
    }
}
