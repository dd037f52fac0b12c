use super::{delete_error, storage_error, write_error};
use crate::entities::lecturers;
use chrono::Utc;
use models::{error::RecordError, reference::LecturerForm};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

const ENTITY: &str = "lecturer";

pub struct LecturerService;

impl LecturerService {
    /// All lecturers ordered by name
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<lecturers::Model>, RecordError> {
        lecturers::Entity::find()
            .order_by_asc(lecturers::Column::Name)
            .all(db)
            .await
            .map_err(storage_error(ENTITY))
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<lecturers::Model, RecordError> {
        lecturers::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(storage_error(ENTITY))?
            .ok_or(RecordError::NotFound { entity: ENTITY })
    }

    pub async fn create(
        db: &DatabaseConnection,
        form: LecturerForm,
    ) -> Result<lecturers::Model, RecordError> {
        let lecturer = form.validate()?;

        lecturers::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(lecturer.name),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(db)
        .await
        .map_err(write_error(ENTITY))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        form: LecturerForm,
    ) -> Result<lecturers::Model, RecordError> {
        let lecturer = form.validate()?;
        let mut model: lecturers::ActiveModel = Self::get(db, id).await?.into();

        model.name = Set(lecturer.name);

        model.update(db).await.map_err(write_error(ENTITY))
    }

    /// Fails with `InUse` while the lecturer is assigned to any schedule entry
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), RecordError> {
        let result = lecturers::Entity::delete_by_id(id)
            .exec(db)
            .await
            .map_err(delete_error(ENTITY))?;

        if result.rows_affected == 0 {
            return Err(RecordError::NotFound { entity: ENTITY });
        }

        Ok(())
    }
}
