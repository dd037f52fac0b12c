use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared by every handler; cloning shares the connection pool
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
}
