use super::storage_error;
use crate::{
    entities::{lecturers, rooms, schedules, subjects},
    gateway::{CommitError, SeaOrmGateway},
    validator::{ScheduleValidator, persistence_failure},
};
use log::warn;
use models::{
    day::DayOfWeek,
    error::{RecordError, ScheduleError},
    schedule::{ScheduleCandidate, ScheduleForm, effective_capacity},
    time::MinuteOfDay,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

const ENTITY: &str = "schedule";

/// A schedule entry joined with the names of what it references
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRow {
    pub id: Uuid,
    pub semester_id: Uuid,
    pub day: DayOfWeek,
    pub start_time: MinuteOfDay,
    pub end_time: MinuteOfDay,
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

pub struct ScheduleService;

impl ScheduleService {
    /// Validates the form and inserts the entry if nothing overlaps it
    pub async fn create(db: &DatabaseConnection, form: ScheduleForm) -> Result<Uuid, ScheduleError> {
        let candidate = form.into_candidate()?;
        Self::submit(db, candidate, None).await
    }

    /// Validates the form and rewrites entry `id`, ignoring the entry's own current slot
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        form: ScheduleForm,
    ) -> Result<Uuid, ScheduleError> {
        let candidate = form.into_candidate()?;
        Self::submit(db, candidate, Some(id)).await
    }

    /// Runs every check `create`/`update` would, without writing
    pub async fn check(
        db: &DatabaseConnection,
        form: ScheduleForm,
        exclude_id: Option<Uuid>,
    ) -> Result<ScheduleCandidate, ScheduleError> {
        let candidate = form.into_candidate()?;
        ScheduleValidator::check(&SeaOrmGateway::new(db), &candidate, exclude_id).await?;
        Ok(candidate)
    }

    /// The overlap queries and the write share one transaction; the exclusion
    /// constraints catch whatever commits between them.
    async fn submit(
        db: &DatabaseConnection,
        candidate: ScheduleCandidate,
        exclude_id: Option<Uuid>,
    ) -> Result<Uuid, ScheduleError> {
        let txn = db.begin().await.map_err(persistence_failure)?;

        match ScheduleValidator::submit(&SeaOrmGateway::new(&txn), candidate, exclude_id).await {
            Ok(id) => {
                txn.commit()
                    .await
                    .map_err(|err| ScheduleError::from(CommitError::classify(err)))?;
                Ok(id)
            }
            Err(err) => {
                if let Err(rollback) = txn.rollback().await {
                    warn!("Rollback after rejected schedule failed: {rollback}");
                }
                Err(err)
            }
        }
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<schedules::Model, RecordError> {
        schedules::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(storage_error(ENTITY))?
            .ok_or(RecordError::NotFound { entity: ENTITY })
    }

    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), RecordError> {
        let result = schedules::Entity::delete_by_id(id)
            .exec(db)
            .await
            .map_err(storage_error(ENTITY))?;

        if result.rows_affected == 0 {
            return Err(RecordError::NotFound { entity: ENTITY });
        }

        Ok(())
    }

    /// Every entry of the semester, sorted by day, start time and room name
    pub async fn list_for_semester(
        db: &DatabaseConnection,
        semester_id: Uuid,
    ) -> Result<Vec<ScheduleRow>, RecordError> {
        let entries = schedules::Entity::find()
            .filter(schedules::Column::SemesterId.eq(semester_id))
            .all(db)
            .await
            .map_err(storage_error(ENTITY))?;

        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let subject_ids: HashSet<Uuid> = entries.iter().map(|e| e.subject_id).collect();
        let lecturer_ids: HashSet<Uuid> = entries.iter().map(|e| e.lecturer_id).collect();
        let room_ids: HashSet<Uuid> = entries.iter().map(|e| e.room_id).collect();

        let subjects: HashMap<Uuid, subjects::Model> = subjects::Entity::find()
            .filter(subjects::Column::Id.is_in(subject_ids))
            .all(db)
            .await
            .map_err(storage_error("subject"))?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let lecturers: HashMap<Uuid, lecturers::Model> = lecturers::Entity::find()
            .filter(lecturers::Column::Id.is_in(lecturer_ids))
            .all(db)
            .await
            .map_err(storage_error("lecturer"))?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();

        let rooms: HashMap<Uuid, rooms::Model> = rooms::Entity::find()
            .filter(rooms::Column::Id.is_in(room_ids))
            .all(db)
            .await
            .map_err(storage_error("room"))?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        let mut rows: Vec<ScheduleRow> = entries
            .into_iter()
            .filter_map(|entry| {
                let slot = entry.slot();
                let subject = subjects.get(&entry.subject_id);
                let lecturer = lecturers.get(&entry.lecturer_id);
                let room = rooms.get(&entry.room_id);

                let (Some(slot), Some(subject), Some(lecturer), Some(room)) =
                    (slot, subject, lecturer, room)
                else {
                    warn!("Skipping inconsistent schedule entry {}", entry.id);
                    return None;
                };

                Some(ScheduleRow {
                    id: entry.id,
                    semester_id: entry.semester_id,
                    day: entry.day,
                    start_time: slot.start(),
                    end_time: slot.end(),
                    subject_id: subject.id,
                    subject_code: subject.code.clone(),
                    subject_name: subject.name.clone(),
                    lecturer_id: lecturer.id,
                    lecturer_name: lecturer.name.clone(),
                    room_id: room.id,
                    room_name: room.name.clone(),
                    capacity: effective_capacity(entry.capacity_override, room.capacity),
                    capacity_override: entry.capacity_override,
                    class_year: entry.class_year,
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            (a.day, a.start_time, &a.room_name).cmp(&(b.day, b.start_time, &b.room_name))
        });

        Ok(rows)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;
    use models::error::{Conflict, ErrorKind};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Value};

    fn form() -> ScheduleForm {
        ScheduleForm {
            semester_id: Some(Uuid::new_v4().to_string()),
            subject_id: Some(Uuid::new_v4().to_string()),
            lecturer_id: Some(Uuid::new_v4().to_string()),
            room_id: Some(Uuid::new_v4().to_string()),
            day: Some("Mon".into()),
            start_time: Some("08:00".into()),
            end_time: Some("10:00".into()),
            capacity_override: None,
            class_year: None,
        }
    }

    fn stored(candidate: &ScheduleCandidate) -> schedules::Model {
        schedules::Model {
            id: Uuid::new_v4(),
            semester_id: candidate.semester_id,
            subject_id: candidate.subject_id,
            lecturer_id: candidate.lecturer_id,
            room_id: candidate.room_id,
            day: candidate.day,
            start_minute: candidate.slot.start().to_column(),
            end_minute: candidate.slot.end().to_column(),
            capacity_override: candidate.capacity_override,
            class_year: candidate.class_year,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn test_create_without_overlaps() {
        let form = form();
        let entry = stored(&form.clone().into_candidate().unwrap());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                Vec::<schedules::Model>::new(),
                Vec::new(),
                vec![entry.clone()],
            ])
            .into_connection();

        assert_eq!(ScheduleService::create(&db, form).await, Ok(entry.id));
    }

    #[tokio::test]
    async fn test_create_rejects_room_overlap() {
        let form = form();
        let mut existing = stored(&form.clone().into_candidate().unwrap());
        existing.start_minute = 9 * 60;
        existing.end_minute = 11 * 60;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()]])
            .into_connection();

        let err = ScheduleService::create(&db, form).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RoomConflict);
        assert!(matches!(
            err.conflict(),
            Some(Conflict::Existing { schedule_id, .. }) if *schedule_id == existing.id
        ));
    }

    #[tokio::test]
    async fn test_invalid_form_never_queries() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = ScheduleService::create(
            &db,
            ScheduleForm {
                start_time: Some("14:00".into()),
                end_time: Some("13:00".into()),
                ..form()
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidTimeRange);
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_update_excludes_the_entry_being_edited() {
        let form = ScheduleForm {
            start_time: Some("09:00".into()),
            end_time: Some("11:00".into()),
            ..form()
        };
        let candidate = form.clone().into_candidate().unwrap();
        let mut existing = stored(&candidate);
        existing.start_minute = 8 * 60;
        existing.end_minute = 10 * 60;
        let updated = schedules::Model {
            id: existing.id,
            ..stored(&candidate)
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                Vec::<schedules::Model>::new(),
                Vec::new(),
                vec![existing.clone()],
                vec![updated.clone()],
            ])
            .into_connection();

        assert_eq!(
            ScheduleService::update(&db, existing.id, form).await,
            Ok(existing.id)
        );

        let log = db.into_transaction_log();
        let statements = log[0].statements();
        assert_eq!(statements[0].sql, "BEGIN");
        for overlap_query in &statements[1..3] {
            assert!(overlap_query.sql.contains(r#""id" <> $6"#), "{}", overlap_query.sql);
            let values = &overlap_query.values.as_ref().unwrap().0;
            assert_eq!(values[5], Value::from(existing.id));
        }
    }

    #[tokio::test]
    async fn test_update_rejected_by_overlap_is_rolled_back() {
        let form = form();
        let other = stored(&form.clone().into_candidate().unwrap());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![other]])
            .into_connection();

        let err = ScheduleService::update(&db, Uuid::new_v4(), form)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RoomConflict);

        let log = db.into_transaction_log();
        let statements = log[0].statements();
        assert_eq!(statements.last().map(|s| s.sql.as_str()), Some("ROLLBACK"));
    }

    #[tokio::test]
    async fn test_check_reports_lecturer_overlap() {
        let form = form();
        let existing = stored(&form.clone().into_candidate().unwrap());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<schedules::Model>::new(), vec![existing]])
            .into_connection();

        let err = ScheduleService::check(&db, form, None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LecturerConflict);
    }

    #[tokio::test]
    async fn test_delete_missing_entry() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        assert_eq!(
            ScheduleService::delete(&db, Uuid::new_v4()).await,
            Err(RecordError::NotFound { entity: "schedule" })
        );
    }

    #[tokio::test]
    async fn test_list_for_semester_joins_and_sorts() {
        let semester_id = Uuid::new_v4();
        let subject = subjects::Model {
            id: Uuid::new_v4(),
            code: "CS101".to_string(),
            name: "Programming".to_string(),
            paid_credit: 3,
            academic_credit: 3,
            created_at: Utc::now().naive_utc(),
        };
        let lecturer = lecturers::Model {
            id: Uuid::new_v4(),
            name: "Dr. Lan".to_string(),
            created_at: Utc::now().naive_utc(),
        };
        let room = rooms::Model {
            id: Uuid::new_v4(),
            name: "A101".to_string(),
            capacity: 40,
            created_at: Utc::now().naive_utc(),
        };

        let entry = |day, start: i16, capacity_override| schedules::Model {
            id: Uuid::new_v4(),
            semester_id,
            subject_id: subject.id,
            lecturer_id: lecturer.id,
            room_id: room.id,
            day,
            start_minute: start,
            end_minute: start + 90,
            capacity_override,
            class_year: None,
            created_at: Utc::now().naive_utc(),
        };
        let wednesday = entry(DayOfWeek::Wed, 480, None);
        let monday_late = entry(DayOfWeek::Mon, 780, Some(25));
        let monday_early = entry(DayOfWeek::Mon, 480, None);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                wednesday.clone(),
                monday_late.clone(),
                monday_early.clone(),
            ]])
            .append_query_results([vec![subject.clone()]])
            .append_query_results([vec![lecturer.clone()]])
            .append_query_results([vec![room.clone()]])
            .into_connection();

        let rows = ScheduleService::list_for_semester(&db, semester_id)
            .await
            .unwrap();

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![monday_early.id, monday_late.id, wednesday.id]);
        assert_eq!(rows[0].capacity, 40);
        assert_eq!(rows[1].capacity, 25);
        assert_eq!(rows[1].start_time.to_string(), "13:00");
        assert_eq!(rows[0].lecturer_name, "Dr. Lan");
    }
}
