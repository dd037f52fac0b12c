use crate::gateway::{CommitError, OverlapQuery, ScheduleCommit, ScheduleGateway};
use log::{debug, error, info};
use models::{
    error::{Conflict, ScheduleError},
    schedule::ScheduleCandidate,
};
use sea_orm::DbErr;
use uuid::Uuid;

impl From<CommitError> for ScheduleError {
    fn from(err: CommitError) -> Self {
        match err {
            CommitError::RoomOverlap => ScheduleError::RoomConflict(Conflict::Commit),
            CommitError::LecturerOverlap => ScheduleError::LecturerConflict(Conflict::Commit),
            CommitError::NotFound(id) => {
                ScheduleError::PersistenceFailure(format!("schedule entry {id} not found"))
            }
            CommitError::Db(err) => persistence_failure(err),
        }
    }
}

pub(crate) fn persistence_failure(err: DbErr) -> ScheduleError {
    error!("Schedule storage failure: {err}");
    ScheduleError::PersistenceFailure(err.to_string())
}

/// Decides whether a structurally valid schedule entry may be committed
pub struct ScheduleValidator;

impl ScheduleValidator {
    /// Checks the candidate against existing bookings: room first, then lecturer.
    ///
    /// `exclude_id` is the entry being updated, if any.
    pub async fn check<G>(
        gateway: &G,
        candidate: &ScheduleCandidate,
        exclude_id: Option<Uuid>,
    ) -> Result<(), ScheduleError>
    where
        G: ScheduleGateway + ?Sized,
    {
        let query = OverlapQuery::for_candidate(candidate, exclude_id);

        let room_conflicts = gateway
            .find_overlapping_by_room(candidate.room_id, &query)
            .await
            .map_err(persistence_failure)?;

        if let Some(existing) = room_conflicts.first() {
            info!(
                "Room {} is already booked on {} {} by schedule {}",
                candidate.room_id, existing.day, existing.slot, existing.id
            );
            return Err(ScheduleError::RoomConflict(existing.conflict()));
        }

        let lecturer_conflicts = gateway
            .find_overlapping_by_lecturer(candidate.lecturer_id, &query)
            .await
            .map_err(persistence_failure)?;

        if let Some(existing) = lecturer_conflicts.first() {
            info!(
                "Lecturer {} is already scheduled on {} {} by schedule {}",
                candidate.lecturer_id, existing.day, existing.slot, existing.id
            );
            return Err(ScheduleError::LecturerConflict(existing.conflict()));
        }

        debug!(
            "Accepted {} {} in room {} for lecturer {}",
            candidate.day, candidate.slot, candidate.room_id, candidate.lecturer_id
        );
        Ok(())
    }

    /// Checks the candidate and, if accepted, commits it as an insert or as an
    /// update of `exclude_id`. Returns the id of the committed entry.
    pub async fn submit<G>(
        gateway: &G,
        candidate: ScheduleCandidate,
        exclude_id: Option<Uuid>,
    ) -> Result<Uuid, ScheduleError>
    where
        G: ScheduleGateway + ?Sized,
    {
        Self::check(gateway, &candidate, exclude_id).await?;

        let commit = match exclude_id {
            Some(id) => ScheduleCommit::Update { id, candidate },
            None => ScheduleCommit::Insert(candidate),
        };

        let id = gateway.commit_schedule(commit).await.map_err(|err| {
            let err = ScheduleError::from(err);
            if err.is_conflict() {
                info!("Commit rejected by overlap constraint: {err}");
            }
            err
        })?;

        Ok(id)
    }
}
