use database::{entities::schedules, services::schedule::ScheduleRow};
use models::day::DayOfWeek;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// A schedule entry as listed for a semester
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRowResponse {
    pub id: Uuid,
    pub day: DayOfWeek,
    /// `HH:MM`
    pub start_time: String,
    pub end_time: String,
    pub subject_id: Uuid,
    pub subject_code: String,
    pub subject_name: String,
    pub lecturer_id: Uuid,
    pub lecturer_name: String,
    pub room_id: Uuid,
    pub room_name: String,
    /// Override if set, otherwise the room's capacity
    pub capacity: i32,
    pub capacity_override: Option<i32>,
    pub class_year: Option<i32>,
}

impl From<ScheduleRow> for ScheduleRowResponse {
    fn from(row: ScheduleRow) -> Self {
        Self {
            id: row.id,
            day: row.day,
            start_time: row.start_time.to_string(),
            end_time: row.end_time.to_string(),
            subject_id: row.subject_id,
            subject_code: row.subject_code,
            subject_name: row.subject_name,
            lecturer_id: row.lecturer_id,
            lecturer_name: row.lecturer_name,
            room_id: row.room_id,
            room_name: row.room_name,
            capacity: row.capacity,
            capacity_override: row.capacity_override,
            class_year: row.class_year,
        }
    }
}

/// A single stored schedule entry
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub id: Uuid,
    pub semester_id: Uuid,
    pub subject_id: Uuid,
    pub lecturer_id: Uuid,
    pub room_id: Uuid,
    pub day: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
    pub capacity_override: Option<i32>,
    pub class_year: Option<i32>,
}

impl ScheduleResponse {
    /// `None` for a row whose minutes fail the table's CHECK constraints
    pub fn from_model(model: schedules::Model) -> Option<Self> {
        let slot = model.slot()?;

        Some(Self {
            id: model.id,
            semester_id: model.semester_id,
            subject_id: model.subject_id,
            lecturer_id: model.lecturer_id,
            room_id: model.room_id,
            day: model.day,
            start_time: slot.start().to_string(),
            end_time: slot.end().to_string(),
            capacity_override: model.capacity_override,
            class_year: model.class_year,
        })
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CheckParams {
    /// The entry being edited; its own slot is ignored
    pub exclude_id: Option<Uuid>,
}
