use super::{delete_error, storage_error, write_error};
use crate::entities::semesters;
use chrono::Utc;
use models::{error::RecordError, reference::SemesterForm};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

const ENTITY: &str = "semester";

pub struct SemesterService;

impl SemesterService {
    /// All semesters, most recent academic year first
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<semesters::Model>, RecordError> {
        semesters::Entity::find()
            .order_by_desc(semesters::Column::AcademicYear)
            .order_by_asc(semesters::Column::Term)
            .all(db)
            .await
            .map_err(storage_error(ENTITY))
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<semesters::Model, RecordError> {
        semesters::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(storage_error(ENTITY))?
            .ok_or(RecordError::NotFound { entity: ENTITY })
    }

    /// Academic year and term are unique together
    pub async fn create(
        db: &DatabaseConnection,
        form: SemesterForm,
    ) -> Result<semesters::Model, RecordError> {
        let semester = form.validate()?;

        semesters::ActiveModel {
            id: Set(Uuid::new_v4()),
            academic_year: Set(semester.academic_year),
            term: Set(semester.term),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(db)
        .await
        .map_err(write_error(ENTITY))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        form: SemesterForm,
    ) -> Result<semesters::Model, RecordError> {
        let semester = form.validate()?;
        let mut model: semesters::ActiveModel = Self::get(db, id).await?.into();

        model.academic_year = Set(semester.academic_year);
        model.term = Set(semester.term);

        model.update(db).await.map_err(write_error(ENTITY))
    }

    /// Fails with `InUse` while the semester has schedule entries
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), RecordError> {
        let result = semesters::Entity::delete_by_id(id)
            .exec(db)
            .await
            .map_err(delete_error(ENTITY))?;

        if result.rows_affected == 0 {
            return Err(RecordError::NotFound { entity: ENTITY });
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use models::term::Term;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_semester() {
        let stored = semesters::Model {
            id: Uuid::new_v4(),
            academic_year: "2024/2025".to_string(),
            term: Term::S1,
            created_at: Utc::now().naive_utc(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored.clone()]])
            .into_connection();

        let created = SemesterService::create(
            &db,
            SemesterForm {
                academic_year: Some("2024/2025".into()),
                term: Some("S1".into()),
            },
        )
        .await
        .unwrap();

        assert_eq!(created.term, Term::S1);
        assert_eq!(created.id, stored.id);
    }
}
