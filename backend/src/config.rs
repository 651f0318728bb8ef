//! # Configuration
//!
//! Runtime settings read from the environment:
//!
//! - `ROSTER_STORAGE`: `sqlite` (default) or `json`
//! - `ROSTER_DATA_DIR`: directory holding `roster.db` / `players.json`
//!   (default `~/Documents/Scouting Roster`)
//! - `ROSTER_BIND`: HTTP listen address (default `127.0.0.1:3000`)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tracing::info;

pub const STORAGE_ENV: &str = "ROSTER_STORAGE";
pub const DATA_DIR_ENV: &str = "ROSTER_DATA_DIR";
pub const BIND_ENV: &str = "ROSTER_BIND";

const DEFAULT_DIRECTORY_NAME: &str = "Scouting Roster";
pub const DATABASE_FILE_NAME: &str = "roster.db";

/// Which backend persists the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    #[default]
    Sqlite,
    Json,
}

impl FromStr for StorageKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "db" => Ok(StorageKind::Sqlite),
            "json" | "file" => Ok(StorageKind::Json),
            other => Err(anyhow!("Unknown storage kind '{}' (expected sqlite or json)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterConfig {
    pub storage: StorageKind,
    pub data_directory: PathBuf,
    pub bind_address: SocketAddr,
}

impl RosterConfig {
    /// Configuration for a given data directory with default storage and address
    pub fn with_data_directory<P: Into<PathBuf>>(data_directory: P) -> Self {
        Self {
            storage: StorageKind::default(),
            data_directory: data_directory.into(),
            bind_address: default_bind_address(),
        }
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = match get(STORAGE_ENV) {
            Some(raw) => raw.parse::<StorageKind>().with_context(|| format!("Invalid {}", STORAGE_ENV))?,
            None => StorageKind::default(),
        };

        let data_directory = match get(DATA_DIR_ENV) {
            Some(raw) => PathBuf::from(raw.trim()),
            None => default_data_directory(),
        };

        let bind_address = match get(BIND_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<SocketAddr>()
                .with_context(|| format!("Invalid {} '{}'", BIND_ENV, raw))?,
            None => default_bind_address(),
        };

        let config = Self { storage, data_directory, bind_address };
        info!(
            "Loaded configuration: storage={:?}, data_directory={}, bind_address={}",
            config.storage,
            config.data_directory.display(),
            config.bind_address
        );
        Ok(config)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_directory.join(DATABASE_FILE_NAME)
    }
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

/// `<documents>/Scouting Roster`, falling back to the home directory and then the
/// working directory when the platform has no documents folder
fn default_data_directory() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIRECTORY_NAME)
}
