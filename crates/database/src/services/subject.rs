use super::{delete_error, storage_error, write_error};
use crate::entities::subjects;
use chrono::Utc;
use models::{error::RecordError, reference::SubjectForm};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

const ENTITY: &str = "subject";

pub struct SubjectService;

impl SubjectService {
    /// All subjects ordered by code
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<subjects::Model>, RecordError> {
        subjects::Entity::find()
            .order_by_asc(subjects::Column::Code)
            .all(db)
            .await
            .map_err(storage_error(ENTITY))
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<subjects::Model, RecordError> {
        subjects::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(storage_error(ENTITY))?
            .ok_or(RecordError::NotFound { entity: ENTITY })
    }

    pub async fn create(
        db: &DatabaseConnection,
        form: SubjectForm,
    ) -> Result<subjects::Model, RecordError> {
        let subject = form.validate()?;

        subjects::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(subject.code),
            name: Set(subject.name),
            paid_credit: Set(subject.paid_credit),
            academic_credit: Set(subject.academic_credit),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(db)
        .await
        .map_err(write_error(ENTITY))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        form: SubjectForm,
    ) -> Result<subjects::Model, RecordError> {
        let subject = form.validate()?;
        let mut model: subjects::ActiveModel = Self::get(db, id).await?.into();

        model.code = Set(subject.code);
        model.name = Set(subject.name);
        model.paid_credit = Set(subject.paid_credit);
        model.academic_credit = Set(subject.academic_credit);

        model.update(db).await.map_err(write_error(ENTITY))
    }

    /// Fails with `InUse` while any schedule entry teaches the subject
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), RecordError> {
        let result = subjects::Entity::delete_by_id(id)
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
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_list_subjects() {
        let subject = subjects::Model {
            id: Uuid::new_v4(),
            code: "CS101".to_string(),
            name: "Programming".to_string(),
            paid_credit: 3,
            academic_credit: 3,
            created_at: Utc::now().naive_utc(),
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![subject.clone()]])
            .into_connection();

        assert_eq!(SubjectService::list(&db).await, Ok(vec![subject]));
    }

    #[tokio::test]
    async fn test_credits_out_of_range() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = SubjectService::create(
            &db,
            SubjectForm {
                code: Some("CS101".into()),
                name: Some("Programming".into()),
                paid_credit: Some("5".into()),
                academic_credit: None,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RecordError::InvalidInput(_)));
    }
}
