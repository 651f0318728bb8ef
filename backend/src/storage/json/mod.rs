//! # JSON Document Storage
//!
//! Keeps the whole roster in a single `players.json` document inside the data
//! directory. Identities are persisted alongside the players together with the
//! next identity to hand out, so they stay stable across edits and deletions.

pub mod connection;
pub mod player_repository;

pub use connection::JsonConnection;
pub use player_repository::PlayerRepository as JsonPlayerRepository;
