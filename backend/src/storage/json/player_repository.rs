use std::collections::HashSet;
use std::fs;
use std::io::Write;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{Player, PlayerId, PlayerProfile};
use tracing::{debug, info};

use super::connection::JsonConnection;
use crate::error::{PersistenceError, RosterError, RosterResult};
use crate::storage::PlayerStorage;

/// On-disk layout of the roster document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct RosterDocument {
    /// Identity handed to the next inserted player. Only ever grows.
    next_id: PlayerId,
    players: Vec<Player>,
}

impl RosterDocument {
    fn empty() -> Self {
        Self { next_id: 1, players: Vec::new() }
    }

    /// Documents written before identities were stored are a bare array of profiles.
    /// Their list positions become identities 1..=n.
    fn from_legacy(profiles: Vec<PlayerProfile>) -> Self {
        let players: Vec<Player> = profiles
            .into_iter()
            .zip(1..)
            .map(|(profile, id)| Player { id, profile })
            .collect();
        Self { next_id: players.len() as PlayerId + 1, players }
    }

    fn position_of(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }
}

/// JSON-document player repository.
///
/// Each mutation loads the whole document, applies the change and rewrites the
/// whole document through a temp file plus rename.
#[derive(Clone)]
pub struct PlayerRepository {
    connection: JsonConnection,
}

impl PlayerRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn load_document(&self) -> RosterResult<RosterDocument> {
        let path = self.connection.players_file_path();

        if !path.exists() {
            debug!("No roster document at {}, starting empty", path.display());
            return Ok(RosterDocument::empty());
        }

        let content = fs::read_to_string(&path).map_err(|e| PersistenceError::io(&path, e))?;
        let malformed = |source: serde_json::Error| PersistenceError::Document { path: path.clone(), source };

        let value: serde_json::Value = serde_json::from_str(&content).map_err(malformed)?;
        let mut document = if value.is_array() {
            let profiles: Vec<PlayerProfile> = serde_json::from_value(value).map_err(malformed)?;
            info!("Upgrading legacy roster document with {} players", profiles.len());
            RosterDocument::from_legacy(profiles)
        } else {
            serde_json::from_value(value).map_err(malformed)?
        };

        let mut seen = HashSet::new();
        for player in &document.players {
            if !seen.insert(player.id) {
                return Err(PersistenceError::CorruptRecord {
                    id: player.id,
                    reason: "identity appears more than once".to_string(),
                }
                .into());
            }
        }
        // A hand-edited counter must not hand out an identity still in use
        if let Some(max_id) = document.players.iter().map(|p| p.id).max() {
            document.next_id = document.next_id.max(max_id + 1);
        }

        Ok(document)
    }

    fn save_document(&self, document: &RosterDocument) -> RosterResult<()> {
        let path = self.connection.players_file_path();
        let temp_path = self.connection.players_temp_file_path();

        let content = serde_json::to_vec_pretty(document)
            .map_err(|source| PersistenceError::Document { path: path.clone(), source })?;

        // Atomic write using temp file
        let mut file = fs::File::create(&temp_path).map_err(|e| PersistenceError::io(&temp_path, e))?;
        file.write_all(&content)
            .and_then(|_| file.sync_all())
            .map_err(|e| PersistenceError::io(&temp_path, e))?;
        drop(file);
        fs::rename(&temp_path, &path).map_err(|e| PersistenceError::io(&path, e))?;

        debug!("Saved {} players to {}", document.players.len(), path.display());
        Ok(())
    }
}

#[async_trait]
impl PlayerStorage for PlayerRepository {
    async fn list_players(&self) -> RosterResult<Vec<Player>> {
        Ok(self.load_document()?.players)
    }

    async fn insert_player(&self, profile: &PlayerProfile) -> RosterResult<Player> {
        let mut document = self.load_document()?;

        let player = Player { id: document.next_id, profile: profile.clone() };
        document.next_id += 1;
        document.players.push(player.clone());

        self.save_document(&document)?;
        info!("Stored player {} with ID: {}", player.profile.name, player.id);
        Ok(player)
    }

    async fn replace_player(&self, id: PlayerId, profile: &PlayerProfile) -> RosterResult<()> {
        let mut document = self.load_document()?;
        let index = document.position_of(id).ok_or(RosterError::NotFound(id))?;

        document.players[index].profile = profile.clone();

        self.save_document(&document)
    }

    async fn delete_player(&self, id: PlayerId) -> RosterResult<()> {
        let mut document = self.load_document()?;
        let index = document.position_of(id).ok_or(RosterError::NotFound(id))?;

        document.players.remove(index);

        self.save_document(&document)
    }

    fn backend_name(&self) -> &'static str {
        "json"
    }
}
