use chrono::NaiveDateTime;
use database::entities::{lecturers, rooms, semesters, subjects};
use models::term::Term;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SemesterResponse {
    pub id: Uuid,
    pub academic_year: String,
    pub term: Term,
    pub created_at: NaiveDateTime,
}

impl From<semesters::Model> for SemesterResponse {
    fn from(model: semesters::Model) -> Self {
        Self {
            id: model.id,
            academic_year: model.academic_year,
            term: model.term,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LecturerResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<lecturers::Model> for LecturerResponse {
    fn from(model: lecturers::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub paid_credit: i32,
    pub academic_credit: i32,
    pub created_at: NaiveDateTime,
}

impl From<subjects::Model> for SubjectResponse {
    fn from(model: subjects::Model) -> Self {
        Self {
            id: model.id,
            code: model.code,
            name: model.name,
            paid_credit: model.paid_credit,
            academic_credit: model.academic_credit,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub created_at: NaiveDateTime,
}

impl From<rooms::Model> for RoomResponse {
    fn from(model: rooms::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            capacity: model.capacity,
            created_at: model.created_at,
        }
    }
}
