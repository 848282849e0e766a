//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;

use crate::infrastructure::SeaOrmCatalogStore;
use crate::infrastructure::config::CopySettings;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection for the plain CRUD handlers
    db: DatabaseConnection,
    /// Catalog store used by the book copy
    pub catalog_store: SeaOrmCatalogStore,
    /// Copy labels and deadline
    pub copy_settings: CopySettings,
}

impl AppState {
    /// Create a new AppState with default copy settings
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_settings(db, CopySettings::default())
    }

    pub fn with_settings(db: DatabaseConnection, copy_settings: CopySettings) -> Self {
        let catalog_store = SeaOrmCatalogStore::new(db.clone());

        Self {
            db,
            catalog_store,
            copy_settings,
        }
    }

    /// Get the database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl AsRef<DatabaseConnection> for AppState {
    fn as_ref(&self) -> &DatabaseConnection {
        &self.db
    }
}

// Implement FromRef to allow extracting DatabaseConnection from AppState
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
