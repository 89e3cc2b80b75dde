use sea_orm::DatabaseConnection;

use crate::server::util::storage::{FileStore, DEFAULT_MAX_UPLOAD_SIZE};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub files: FileStore,
}

/// State with uploads going to `registrar-uploads` under the system temp directory
impl From<DatabaseConnection> for AppState {
    fn from(db: DatabaseConnection) -> Self {
        Self {
            db,
            files: FileStore::new(
                std::env::temp_dir().join("registrar-uploads"),
                DEFAULT_MAX_UPLOAD_SIZE,
            ),
        }
    }
}
