//! # Storage Traits
//!
//! The storage abstraction that lets the roster service run against either the JSON
//! document backend or the SQLite backend without knowing which one it holds.

use async_trait::async_trait;
use shared::{Player, PlayerId, PlayerProfile};

use crate::error::RosterResult;

/// Durable home of the full player collection.
///
/// Implementations assign identities themselves, never hand out an identity twice,
/// and persist each mutation completely before returning.
#[async_trait]
pub trait PlayerStorage: Send + Sync {
    /// Every stored player in ascending identity order. Empty on first run.
    async fn list_players(&self) -> RosterResult<Vec<Player>>;

    /// Append a player under a fresh identity and return the stored record
    async fn insert_player(&self, profile: &PlayerProfile) -> RosterResult<Player>;

    /// Replace every field of an existing player.
    /// Fails with `RosterError::NotFound` if the identity is absent.
    async fn replace_player(&self, id: PlayerId, profile: &PlayerProfile) -> RosterResult<()>;

    /// Remove a player. Fails with `RosterError::NotFound` if the identity is absent.
    async fn delete_player(&self, id: PlayerId) -> RosterResult<()>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}
