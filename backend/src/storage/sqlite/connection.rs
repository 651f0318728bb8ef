use std::path::Path;
use std::sync::Arc;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::RosterResult;

/// DbConnection manages the SQLite pool backing the roster
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database file at `path` and set up the schema
    pub async fn open<P: AsRef<Path>>(path: P) -> RosterResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);

        // Single connection: one operation at a time, and every statement sees the last write
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::setup_schema(&pool).await?;
        info!("Opened roster database at {}", path.as_ref().display());

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> RosterResult<()> {
        // AUTOINCREMENT keeps SQLite from reissuing the identity of a deleted last row
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                position TEXT NOT NULL,
                dob TEXT NOT NULL,
                category TEXT NOT NULL,
                team TEXT NOT NULL,
                height INTEGER NOT NULL,
                weight INTEGER NOT NULL,
                speed INTEGER NOT NULL,
                technique INTEGER NOT NULL,
                physical INTEGER NOT NULL,
                mental INTEGER NOT NULL,
                notes TEXT NOT NULL DEFAULT '',
                priority TEXT NOT NULL DEFAULT '要チェック'
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
