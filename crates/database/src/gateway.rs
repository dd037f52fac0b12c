use crate::entities::schedules;
use async_trait::async_trait;
use chrono::Utc;
use models::{
    day::DayOfWeek, error::Conflict, schedule::ScheduleCandidate, time::TimeSlot,
};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder, sea_query::SimpleExpr,
};
use thiserror::Error;
use uuid::Uuid;

/// Exclusion constraint forbidding overlapping bookings of one room
pub const ROOM_OVERLAP_CONSTRAINT: &str = "schedules_room_no_overlap";
/// Exclusion constraint forbidding overlapping assignments of one lecturer
pub const LECTURER_OVERLAP_CONSTRAINT: &str = "schedules_lecturer_no_overlap";

/// The part of an overlap lookup shared by the room and lecturer scopes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapQuery {
    pub semester_id: Uuid,
    pub day: DayOfWeek,
    pub slot: TimeSlot,
    /// The entry being edited, which never conflicts with itself
    pub exclude_id: Option<Uuid>,
}

impl OverlapQuery {
    pub fn for_candidate(candidate: &ScheduleCandidate, exclude_id: Option<Uuid>) -> Self {
        Self {
            semester_id: candidate.semester_id,
            day: candidate.day,
            slot: candidate.slot,
            exclude_id,
        }
    }
}

/// An existing booking as seen by the overlap checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledSlot {
    pub id: Uuid,
    pub semester_id: Uuid,
    pub room_id: Uuid,
    pub lecturer_id: Uuid,
    pub day: DayOfWeek,
    pub slot: TimeSlot,
}

impl ScheduledSlot {
    /// Fails on a row whose minutes break the table's CHECK constraint, so a
    /// corrupt booking is never mistaken for a free slot
    pub fn from_model(model: &schedules::Model) -> Result<Self, DbErr> {
        let slot = model.slot().ok_or_else(|| {
            DbErr::Type(format!(
                "schedule {} has an invalid time range {}..{}",
                model.id, model.start_minute, model.end_minute
            ))
        })?;

        Ok(Self {
            id: model.id,
            semester_id: model.semester_id,
            room_id: model.room_id,
            lecturer_id: model.lecturer_id,
            day: model.day,
            slot,
        })
    }

    pub fn conflict(&self) -> Conflict {
        Conflict::Existing {
            schedule_id: self.id,
            day: self.day,
            slot: self.slot,
        }
    }
}

/// A write the validator has accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleCommit {
    Insert(ScheduleCandidate),
    Update { id: Uuid, candidate: ScheduleCandidate },
}

#[derive(Debug, Error)]
pub enum CommitError {
    #[error("room booking overlaps an entry committed concurrently")]
    RoomOverlap,

    #[error("lecturer assignment overlaps an entry committed concurrently")]
    LecturerOverlap,

    #[error("schedule entry {0} not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl CommitError {
    /// Recognises the overlap exclusion constraints by name; everything else is a storage fault
    pub fn classify(err: DbErr) -> Self {
        let message = err.to_string();

        if message.contains(ROOM_OVERLAP_CONSTRAINT) {
            Self::RoomOverlap
        } else if message.contains(LECTURER_OVERLAP_CONSTRAINT) {
            Self::LecturerOverlap
        } else {
            Self::Db(err)
        }
    }
}

/// Storage operations the schedule validator depends on
#[async_trait]
pub trait ScheduleGateway: Send + Sync {
    /// Bookings of `room_id` in the same semester and day whose slot overlaps the query's
    async fn find_overlapping_by_room(
        &self,
        room_id: Uuid,
        query: &OverlapQuery,
    ) -> Result<Vec<ScheduledSlot>, DbErr>;

    /// Assignments of `lecturer_id` in the same semester and day whose slot overlaps the query's
    async fn find_overlapping_by_lecturer(
        &self,
        lecturer_id: Uuid,
        query: &OverlapQuery,
    ) -> Result<Vec<ScheduledSlot>, DbErr>;

    /// Inserts or updates the entry, returning its id
    async fn commit_schedule(&self, commit: ScheduleCommit) -> Result<Uuid, CommitError>;
}

/// [`ScheduleGateway`] over a sea-orm connection or transaction
pub struct SeaOrmGateway<'a, C> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> SeaOrmGateway<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    async fn find_overlapping(
        &self,
        scope: SimpleExpr,
        query: &OverlapQuery,
    ) -> Result<Vec<ScheduledSlot>, DbErr> {
        // existing.start < candidate.end AND existing.end > candidate.start
        let mut condition = Condition::all()
            .add(schedules::Column::SemesterId.eq(query.semester_id))
            .add(scope)
            .add(schedules::Column::Day.eq(query.day))
            .add(schedules::Column::StartMinute.lt(query.slot.end().to_column()))
            .add(schedules::Column::EndMinute.gt(query.slot.start().to_column()));

        if let Some(exclude_id) = query.exclude_id {
            condition = condition.add(schedules::Column::Id.ne(exclude_id));
        }

        let rows = schedules::Entity::find()
            .filter(condition)
            .order_by_asc(schedules::Column::StartMinute)
            .all(self.conn)
            .await?;

        rows.iter().map(ScheduledSlot::from_model).collect()
    }
}

/// Copies the candidate's columns onto an active model
fn apply_candidate(model: &mut schedules::ActiveModel, candidate: &ScheduleCandidate) {
    model.semester_id = Set(candidate.semester_id);
    model.subject_id = Set(candidate.subject_id);
    model.lecturer_id = Set(candidate.lecturer_id);
    model.room_id = Set(candidate.room_id);
    model.day = Set(candidate.day);
    model.start_minute = Set(candidate.slot.start().to_column());
    model.end_minute = Set(candidate.slot.end().to_column());
    model.capacity_override = Set(candidate.capacity_override);
    model.class_year = Set(candidate.class_year);
}

#[async_trait]
impl<C> ScheduleGateway for SeaOrmGateway<'_, C>
where
    C: ConnectionTrait + Send + Sync,
{
    async fn find_overlapping_by_room(
        &self,
        room_id: Uuid,
        query: &OverlapQuery,
    ) -> Result<Vec<ScheduledSlot>, DbErr> {
        self.find_overlapping(schedules::Column::RoomId.eq(room_id), query)
            .await
    }

    async fn find_overlapping_by_lecturer(
        &self,
        lecturer_id: Uuid,
        query: &OverlapQuery,
    ) -> Result<Vec<ScheduledSlot>, DbErr> {
        self.find_overlapping(schedules::Column::LecturerId.eq(lecturer_id), query)
            .await
    }

    async fn commit_schedule(&self, commit: ScheduleCommit) -> Result<Uuid, CommitError> {
        match commit {
            ScheduleCommit::Insert(candidate) => {
                let mut model = schedules::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    created_at: Set(Utc::now().naive_utc()),
                    ..Default::default()
                };
                apply_candidate(&mut model, &candidate);

                let inserted = model.insert(self.conn).await.map_err(CommitError::classify)?;
                Ok(inserted.id)
            }
            ScheduleCommit::Update { id, candidate } => {
                let existing = schedules::Entity::find_by_id(id)
                    .one(self.conn)
                    .await?
                    .ok_or(CommitError::NotFound(id))?;

                let mut model: schedules::ActiveModel = existing.into();
                apply_candidate(&mut model, &candidate);

                let updated = model.update(self.conn).await.map_err(CommitError::classify)?;
                Ok(updated.id)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, RuntimeErr, Value};

    fn candidate() -> ScheduleCandidate {
        ScheduleCandidate {
            semester_id: Uuid::new_v4(),
            subject_id: Uuid::new_v4(),
            lecturer_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            day: DayOfWeek::Mon,
            slot: TimeSlot::new("08:00".parse().unwrap(), "10:00".parse().unwrap()).unwrap(),
            capacity_override: None,
            class_year: None,
        }
    }

    fn row(candidate: &ScheduleCandidate) -> schedules::Model {
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

    #[test]
    fn test_classify_exclusion_violations() {
        let room = DbErr::Exec(RuntimeErr::Internal(format!(
            "conflicting key value violates exclusion constraint \"{ROOM_OVERLAP_CONSTRAINT}\""
        )));
        assert!(matches!(CommitError::classify(room), CommitError::RoomOverlap));

        let lecturer = DbErr::Exec(RuntimeErr::Internal(format!(
            "conflicting key value violates exclusion constraint \"{LECTURER_OVERLAP_CONSTRAINT}\""
        )));
        assert!(matches!(
            CommitError::classify(lecturer),
            CommitError::LecturerOverlap
        ));

        let other = DbErr::Conn(RuntimeErr::Internal("connection reset".to_string()));
        assert!(matches!(CommitError::classify(other), CommitError::Db(_)));
    }

    #[tokio::test]
    async fn test_invalid_row_fails_the_lookup() {
        let candidate = candidate();
        let mut corrupt = row(&candidate);
        corrupt.start_minute = 600;
        corrupt.end_minute = 480;

        assert!(matches!(
            ScheduledSlot::from_model(&corrupt),
            Err(DbErr::Type(_))
        ));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(&candidate), corrupt]])
            .into_connection();
        let gateway = SeaOrmGateway::new(&db);

        let query = OverlapQuery::for_candidate(&candidate, None);
        let result = gateway
            .find_overlapping_by_lecturer(candidate.lecturer_id, &query)
            .await;
        assert!(matches!(result, Err(DbErr::Type(_))));
    }

    #[tokio::test]
    async fn test_overlap_query_predicate() {
        let candidate = candidate();
        let exclude_id = Uuid::new_v4();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<schedules::Model>::new()])
            .into_connection();
        let gateway = SeaOrmGateway::new(&db);

        let query = OverlapQuery::for_candidate(&candidate, Some(exclude_id));
        gateway
            .find_overlapping_by_room(candidate.room_id, &query)
            .await
            .unwrap();

        let log = db.into_transaction_log();
        let statement = &log[0].statements()[0];

        for clause in [
            r#""semester_id" = $1"#,
            r#""room_id" = $2"#,
            r#""day" = $3"#,
            r#""start_minute" < $4"#,
            r#""end_minute" > $5"#,
            r#""id" <> $6"#,
        ] {
            assert!(statement.sql.contains(clause), "missing {clause}: {}", statement.sql);
        }

        let values = &statement.values.as_ref().unwrap().0;
        assert_eq!(values[0], Value::from(candidate.semester_id));
        assert_eq!(values[1], Value::from(candidate.room_id));
        assert_eq!(values[3], Value::from(600i16));
        assert_eq!(values[4], Value::from(480i16));
        assert_eq!(values[5], Value::from(exclude_id));
    }

    #[tokio::test]
    async fn test_find_overlapping_by_room() {
        let candidate = candidate();
        let existing = row(&candidate);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()]])
            .into_connection();
        let gateway = SeaOrmGateway::new(&db);

        let query = OverlapQuery::for_candidate(&candidate, Some(Uuid::new_v4()));
        let found = gateway
            .find_overlapping_by_room(candidate.room_id, &query)
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, existing.id);
        assert_eq!(found[0].slot, candidate.slot);

        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_returns_stored_id() {
        let candidate = candidate();
        let stored = row(&candidate);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()]])
            .into_connection();
        let gateway = SeaOrmGateway::new(&db);

        let id = gateway
            .commit_schedule(ScheduleCommit::Insert(candidate))
            .await
            .unwrap();
        assert_eq!(id, stored.id);
    }

    #[tokio::test]
    async fn test_update_missing_entry() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<schedules::Model>::new()])
            .into_connection();
        let gateway = SeaOrmGateway::new(&db);

        let id = Uuid::new_v4();
        let err = gateway
            .commit_schedule(ScheduleCommit::Update {
                id,
                candidate: candidate(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, CommitError::NotFound(missing) if missing == id));
    }
}
