use std::sync::Arc;

use chrono::NaiveDate;
use shared::{FilterSpec, Player, PlayerId, PlayerInput, PlayerSearchResult};
use tracing::{info, warn};

use super::age::{age, age_today, today};
use super::query::filter_players;
use super::validation::validate_player_input;
use crate::error::{RosterError, RosterResult};
use crate::storage::PlayerStorage;

/// Service for managing the player roster.
///
/// Input is validated here before storage is touched; the storage backend is
/// injected so the same rules apply to every backend.
#[derive(Clone)]
pub struct PlayerService {
    storage: Arc<dyn PlayerStorage>,
}

impl PlayerService {
    pub fn new(storage: Arc<dyn PlayerStorage>) -> Self {
        Self { storage }
    }

    /// Every stored player in storage order
    pub async fn load_all(&self) -> RosterResult<Vec<Player>> {
        let players = self.storage.list_players().await?;
        info!("Loaded {} players from {} storage", players.len(), self.storage.backend_name());
        Ok(players)
    }

    /// Look up one player, e.g. to prefill an edit form
    pub async fn get(&self, id: PlayerId) -> RosterResult<Player> {
        let player = self
            .storage
            .list_players()
            .await?
            .into_iter()
            .find(|p| p.id == id);

        player.ok_or_else(|| {
            warn!("Player not found: {}", id);
            RosterError::NotFound(id)
        })
    }

    /// Validate and store a new player, returning it with its assigned identity
    pub async fn add(&self, input: &PlayerInput) -> RosterResult<Player> {
        info!("Adding player: name={}, position={}", input.name, input.position);

        let profile = validate_player_input(input).map_err(|e| {
            warn!("Rejected new player: {}", e);
            e
        })?;

        let player = self.storage.insert_player(&profile).await?;
        info!("Added player: {} with ID: {}", player.profile.name, player.id);
        Ok(player)
    }

    /// Replace every field of player `id` with `input`
    pub async fn update(&self, id: PlayerId, input: &PlayerInput) -> RosterResult<Player> {
        info!("Updating player: {}", id);

        let profile = validate_player_input(input).map_err(|e| {
            warn!("Rejected update for player {}: {}", id, e);
            e
        })?;

        self.storage.replace_player(id, &profile).await?;
        info!("Updated player: {} with ID: {}", profile.name, id);
        Ok(Player { id, profile })
    }

    pub async fn delete(&self, id: PlayerId) -> RosterResult<()> {
        info!("Deleting player: {}", id);
        self.storage.delete_player(id).await?;
        info!("Deleted player: {}", id);
        Ok(())
    }

    /// Players matching `spec`, with ages taken as of today
    pub fn filter(&self, players: &[Player], spec: &FilterSpec) -> Vec<Player> {
        filter_players(players, spec, today())
    }

    pub fn age(&self, dob: NaiveDate) -> i32 {
        age_today(dob)
    }

    /// Load the roster and return the players matching `spec` with their ages as of `as_of`
    pub async fn search(&self, spec: &FilterSpec, as_of: NaiveDate) -> RosterResult<Vec<PlayerSearchResult>> {
        let players = self.storage.list_players().await?;
        let results: Vec<PlayerSearchResult> = filter_players(&players, spec, as_of)
            .into_iter()
            .map(|player| PlayerSearchResult { age: age(player.profile.dob, as_of), player })
            .collect();

        info!("Search {:?} matched {} of {} players", spec, results.len(), players.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::PlayerValidationError;
    use crate::storage::{DbConnection, JsonConnection, JsonPlayerRepository, SqlitePlayerRepository};
    use async_trait::async_trait;
    use shared::{PlayerProfile, Position, Skills};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn taro() -> PlayerInput {
        PlayerInput {
            name: "Taro".to_string(),
            position: "FW".to_string(),
            dob: "1999-05-01".to_string(),
            category: "J1".to_string(),
            team: "X".to_string(),
            height: 180,
            weight: 75,
            skills: Skills { speed: 80, technique: 70, physical: 75, mental: 60 },
            notes: String::new(),
            priority: None,
        }
    }

    fn input(name: &str, position: &str, dob: &str, speed: u32) -> PlayerInput {
        PlayerInput {
            name: name.to_string(),
            position: position.to_string(),
            dob: dob.to_string(),
            skills: Skills { speed, technique: 50, physical: 50, mental: 50 },
            ..taro()
        }
    }

    async fn sqlite_service(temp_dir: &TempDir) -> PlayerService {
        let db = DbConnection::open(temp_dir.path().join("roster.db")).await.unwrap();
        PlayerService::new(Arc::new(SqlitePlayerRepository::new(db)))
    }

    fn json_service(temp_dir: &TempDir) -> PlayerService {
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        PlayerService::new(Arc::new(JsonPlayerRepository::new(connection)))
    }

    /// Both backends, each in its own directory
    async fn services() -> Vec<(PlayerService, TempDir)> {
        let sqlite_dir = TempDir::new().unwrap();
        let json_dir = TempDir::new().unwrap();
        vec![
            (sqlite_service(&sqlite_dir).await, sqlite_dir),
            (json_service(&json_dir), json_dir),
        ]
    }

    /// Storage that only counts calls, to prove rejected input never reaches it
    #[derive(Default)]
    struct CountingStorage {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PlayerStorage for CountingStorage {
        async fn list_players(&self) -> RosterResult<Vec<Player>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn insert_player(&self, profile: &PlayerProfile) -> RosterResult<Player> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Player { id: 1, profile: profile.clone() })
        }

        async fn replace_player(&self, _id: PlayerId, _profile: &PlayerProfile) -> RosterResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn delete_player(&self, _id: PlayerId) -> RosterResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn backend_name(&self) -> &'static str {
            "counting"
        }
    }

    #[tokio::test]
    async fn test_add_then_load_contains_record_once() {
        for (service, _dir) in services().await {
            let other = service.add(&input("Jiro", "GK", "1990-03-10", 40)).await.unwrap();
            let added = service.add(&taro()).await.unwrap();
            assert_ne!(added.id, other.id);

            let expected = validate_player_input(&taro()).unwrap();
            let players = service.load_all().await.unwrap();
            assert_eq!(players.iter().filter(|p| p.profile == expected).count(), 1);
            assert_eq!(service.get(added.id).await.unwrap(), added);
        }
    }

    #[tokio::test]
    async fn test_long_text_round_trips() {
        for (service, _dir) in services().await {
            let mut long = taro();
            long.name = "A".repeat(101);
            long.team = "T".repeat(101);
            long.notes = " free text, kept verbatim ".to_string();

            let added = service.add(&long).await.unwrap();
            let stored = service.get(added.id).await.unwrap();
            assert_eq!(stored.profile.name, long.name);
            assert_eq!(stored.profile.team, long.team);
            assert_eq!(stored.profile.notes, long.notes);
        }
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        for (service, _dir) in services().await {
            let added = service.add(&taro()).await.unwrap();
            service.delete(added.id).await.unwrap();

            assert!(service.load_all().await.unwrap().iter().all(|p| p.id != added.id));
            assert!(matches!(service.delete(added.id).await, Err(RosterError::NotFound(id)) if id == added.id));
            assert!(matches!(service.get(added.id).await, Err(RosterError::NotFound(_))));
        }
    }

    #[tokio::test]
    async fn test_update_replaces_only_target() {
        for (service, _dir) in services().await {
            let first = service.add(&taro()).await.unwrap();
            let second = service.add(&input("Jiro", "GK", "1990-03-10", 40)).await.unwrap();

            let mut replacement = input("Taro Yamada", "MF", "1999-05-02", 82);
            replacement.priority = Some("◎".to_string());
            replacement.notes = "converted to midfield".to_string();
            let updated = service.update(first.id, &replacement).await.unwrap();

            let players = service.load_all().await.unwrap();
            assert_eq!(players, vec![updated.clone(), second]);
            assert_eq!(updated.profile, validate_player_input(&replacement).unwrap());
            assert_eq!(updated.profile.position, Position::MF);
        }
    }

    #[tokio::test]
    async fn test_update_unknown_identity() {
        for (service, _dir) in services().await {
            service.add(&taro()).await.unwrap();
            assert!(matches!(service.update(404, &taro()).await, Err(RosterError::NotFound(404))));
        }
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_storage() {
        let storage = Arc::new(CountingStorage::default());
        let service = PlayerService::new(storage.clone());

        let mut bad = taro();
        bad.dob = "1999-02-31".to_string();
        assert!(matches!(
            service.add(&bad).await,
            Err(RosterError::Validation(PlayerValidationError::InvalidDateOfBirth(_)))
        ));

        bad = taro();
        bad.team = "  ".to_string();
        assert!(matches!(
            service.update(1, &bad).await,
            Err(RosterError::Validation(PlayerValidationError::EmptyTeam))
        ));

        assert_eq!(storage.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rejected_add_leaves_roster_unchanged() {
        for (service, _dir) in services().await {
            service.add(&taro()).await.unwrap();
            let before = service.load_all().await.unwrap();

            let mut bad = taro();
            bad.name = String::new();
            assert!(service.add(&bad).await.is_err());

            assert_eq!(service.load_all().await.unwrap(), before);
        }
    }

    #[tokio::test]
    async fn test_search_scenario_with_ages() {
        for (service, _dir) in services().await {
            service.add(&taro()).await.unwrap();
            service.add(&input("Goro", "FW", "1985-12-31", 90)).await.unwrap();
            service.add(&input("Saburo", "FW", "2004-08-20", 60)).await.unwrap();

            let spec = FilterSpec {
                position: Some(Position::FW),
                max_age: Some(30),
                min_speed: Some(70),
                ..Default::default()
            };
            let results = service.search(&spec, date(2024, 1, 1)).await.unwrap();
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].player.profile.name, "Taro");
            assert_eq!(results[0].age, 24);
        }
    }

    #[tokio::test]
    async fn test_filter_on_empty_store() {
        for (service, _dir) in services().await {
            let players = service.load_all().await.unwrap();
            let spec = FilterSpec { min_speed: Some(50), ..Default::default() };
            assert!(service.filter(&players, &spec).is_empty());
            assert!(service.search(&spec, date(2024, 1, 1)).await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_filter_without_constraints_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let service = json_service(&temp_dir);
        for name in ["C", "A", "B"] {
            service.add(&input(name, "DF", "2000-01-01", 50)).await.unwrap();
        }

        let players = service.load_all().await.unwrap();
        let filtered = service.filter(&players, &FilterSpec::default());
        assert_eq!(filtered, players);
        assert_eq!(
            filtered.iter().map(|p| p.profile.name.as_str()).collect::<Vec<_>>(),
            vec!["C", "A", "B"]
        );
    }

    #[test]
    fn test_age_uses_today() {
        let service = PlayerService::new(Arc::new(CountingStorage::default()));
        let dob = date(2000, 1, 1);
        assert_eq!(service.age(dob), age(dob, today()));
    }
}
