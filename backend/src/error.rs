//! # Roster Errors
//!
//! Error kinds surfaced by the roster core. Every failure reaches the caller as one
//! of three kinds: invalid input, unknown identity, or a storage failure.

use std::path::PathBuf;

use shared::PlayerId;

use crate::domain::validation::PlayerValidationError;

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error(transparent)]
    Validation(#[from] PlayerValidationError),
    #[error("Player not found: {0}")]
    NotFound(PlayerId),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Storage is unreachable, unwritable or holds data that cannot be read back.
/// After one of these the in-memory and durable views may disagree.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed roster document {}: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Corrupt player record {id}: {reason}")]
    CorruptRecord { id: PlayerId, reason: String },
}

impl PersistenceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PersistenceError::Io { path: path.into(), source }
    }
}

impl From<sqlx::Error> for RosterError {
    fn from(e: sqlx::Error) -> Self {
        RosterError::Persistence(PersistenceError::Database(e))
    }
}

pub type RosterResult<T> = Result<T, RosterError>;
