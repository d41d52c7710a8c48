use std::sync::Arc;

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<DatabaseConnection>,
    pub delivery_window_days: u32,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, delivery_window_days: u32) -> Self {
        Self::shared(Arc::new(orm), delivery_window_days)
    }

    /// Build the state around a connection the caller keeps a handle to.
    pub fn shared(orm: Arc<DatabaseConnection>, delivery_window_days: u32) -> Self {
        Self {
            orm,
            delivery_window_days,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.orm
    }
}
