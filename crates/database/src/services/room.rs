use super::{delete_error, storage_error, write_error};
use crate::entities::rooms;
use chrono::Utc;
use models::{error::RecordError, reference::RoomForm};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder};
use uuid::Uuid;

const ENTITY: &str = "room";

pub struct RoomService;

impl RoomService {
    /// All rooms ordered by name
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<rooms::Model>, RecordError> {
        rooms::Entity::find()
            .order_by_asc(rooms::Column::Name)
            .all(db)
            .await
            .map_err(storage_error(ENTITY))
    }

    pub async fn get(db: &DatabaseConnection, id: Uuid) -> Result<rooms::Model, RecordError> {
        rooms::Entity::find_by_id(id)
            .one(db)
            .await
            .map_err(storage_error(ENTITY))?
            .ok_or(RecordError::NotFound { entity: ENTITY })
    }

    pub async fn create(
        db: &DatabaseConnection,
        form: RoomForm,
    ) -> Result<rooms::Model, RecordError> {
        let room = form.validate()?;

        rooms::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(room.name),
            capacity: Set(room.capacity),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(db)
        .await
        .map_err(write_error(ENTITY))
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        form: RoomForm,
    ) -> Result<rooms::Model, RecordError> {
        let room = form.validate()?;
        let mut model: rooms::ActiveModel = Self::get(db, id).await?.into();

        model.name = Set(room.name);
        model.capacity = Set(room.capacity);

        model.update(db).await.map_err(write_error(ENTITY))
    }

    /// Fails with `InUse` while any schedule entry books the room
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), RecordError> {
        let result = rooms::Entity::delete_by_id(id)
            .exec(db)
            .await
            .map_err(delete_error(ENTITY))?;

        if result.rows_affected == 0 {
            return Err(RecordError::NotFound { entity: ENTITY });
        }

        Ok(())
    }
}
