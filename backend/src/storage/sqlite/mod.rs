//! # SQLite Storage Module
//!
//! Relational backend: one `players` table with an autoincrement primary key.
//!
//! ## Components
//!
//! - **connection.rs** - pool setup and schema creation
//! - **player_repository.rs** - `PlayerStorage` over the `players` table

pub mod connection;
pub mod player_repository;

pub use connection::DbConnection;
pub use player_repository::PlayerRepository as SqlitePlayerRepository;
