//! # Storage Module
//!
//! Persistence for the player roster. The domain layer only sees the
//! [`PlayerStorage`] trait; which backend sits behind it is decided once, at
//! startup, from [`RosterConfig`].
//!
//! ## Backends
//!
//! - **sqlite**: `players` table, identities from `AUTOINCREMENT`
//! - **json**: single `players.json` document rewritten atomically on every change
//!
//! Both backends hand out stable integer identities that are never reused.

pub mod json;
pub mod sqlite;
pub mod traits;

use std::sync::Arc;

use tracing::info;

pub use json::{JsonConnection, JsonPlayerRepository};
pub use sqlite::{DbConnection, SqlitePlayerRepository};
pub use traits::PlayerStorage;

use crate::config::{RosterConfig, StorageKind};
use crate::error::{PersistenceError, RosterResult};

/// Open the backend selected by `config`, creating the data directory if needed
pub async fn open_storage(config: &RosterConfig) -> RosterResult<Arc<dyn PlayerStorage>> {
    let storage: Arc<dyn PlayerStorage> = match config.storage {
        StorageKind::Sqlite => {
            std::fs::create_dir_all(&config.data_directory)
                .map_err(|e| PersistenceError::io(&config.data_directory, e))?;
            let db = DbConnection::open(config.database_path()).await?;
            Arc::new(SqlitePlayerRepository::new(db))
        }
        StorageKind::Json => {
            let connection = JsonConnection::new(&config.data_directory)?;
            Arc::new(JsonPlayerRepository::new(connection))
        }
    };

    info!(
        "Using {} storage in {}",
        storage.backend_name(),
        config.data_directory.display()
    );
    Ok(storage)
}
