pub mod lecturer;
pub mod room;
pub mod schedule;
pub mod semester;
pub mod subject;

use log::{error, info};
use models::error::RecordError;
use sea_orm::{DbErr, SqlErr};

/// Maps a failed insert or update: uniqueness violations become `Duplicate`
pub(crate) fn write_error(entity: &'static str) -> impl Fn(DbErr) -> RecordError {
    move |err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            info!("Duplicate {entity}: {detail}");
            RecordError::Duplicate { entity }
        }
        _ => storage_error(entity)(err),
    }
}

/// Maps a failed delete: foreign key violations become `InUse`
pub(crate) fn delete_error(entity: &'static str) -> impl Fn(DbErr) -> RecordError {
    move |err| match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            info!("Refusing to delete {entity} still in use: {detail}");
            RecordError::InUse
        }
        _ => storage_error(entity)(err),
    }
}

pub(crate) fn storage_error(entity: &'static str) -> impl Fn(DbErr) -> RecordError {
    move |err| {
        error!("Storage failure on {entity}: {err}");
        RecordError::PersistenceFailure {
            entity,
            message: err.to_string(),
        }
    }
}
