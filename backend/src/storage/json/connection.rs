use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{PersistenceError, RosterResult};

const PLAYERS_FILE_NAME: &str = "players.json";

/// JsonConnection owns the data directory that holds the roster document
#[derive(Clone, Debug)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a connection rooted at `base_directory`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> RosterResult<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| PersistenceError::io(&base_path, e))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self { base_directory: base_path })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the live roster document
    pub fn players_file_path(&self) -> PathBuf {
        self.base_directory.join(PLAYERS_FILE_NAME)
    }

    /// Scratch path the next document version is written to before it replaces the live one.
    /// Lives in the same directory so the final rename never crosses filesystems.
    pub fn players_temp_file_path(&self) -> PathBuf {
        self.players_file_path().with_extension("json.tmp")
    }
}
