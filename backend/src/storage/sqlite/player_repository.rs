use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{Category, Player, PlayerId, PlayerProfile, Position, Priority, Skills};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

use super::connection::DbConnection;
use crate::error::{PersistenceError, RosterError, RosterResult};
use crate::storage::PlayerStorage;

/// Repository for player rows
#[derive(Clone)]
pub struct PlayerRepository {
    db: DbConnection,
}

impl PlayerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_player(row: &SqliteRow) -> RosterResult<Player> {
        let id: PlayerId = row.try_get("id")?;
        let corrupt = |reason: String| RosterError::from(PersistenceError::CorruptRecord { id, reason });

        let text = |column: &str| -> RosterResult<String> { Ok(row.try_get::<String, _>(column)?) };
        let number = |column: &str| -> RosterResult<u32> {
            let value: i64 = row.try_get(column)?;
            u32::try_from(value).map_err(|_| corrupt(format!("{column} out of range: {value}")))
        };

        let position = text("position")?;
        let category = text("category")?;
        let priority = text("priority")?;
        let dob = text("dob")?;

        Ok(Player {
            id,
            profile: PlayerProfile {
                name: text("name")?,
                position: position.parse::<Position>().map_err(|e| corrupt(format!("{e}")))?,
                dob: NaiveDate::parse_from_str(&dob, "%Y-%m-%d")
                    .map_err(|_| corrupt(format!("unreadable dob '{dob}'")))?,
                category: category.parse::<Category>().map_err(|e| corrupt(format!("{e}")))?,
                team: text("team")?,
                height: number("height")?,
                weight: number("weight")?,
                skills: Skills {
                    speed: number("speed")?,
                    technique: number("technique")?,
                    physical: number("physical")?,
                    mental: number("mental")?,
                },
                notes: text("notes")?,
                priority: priority.parse::<Priority>().map_err(|e| corrupt(format!("{e}")))?,
            },
        })
    }
}

#[async_trait]
impl PlayerStorage for PlayerRepository {
    async fn list_players(&self) -> RosterResult<Vec<Player>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, position, dob, category, team, height, weight,
                   speed, technique, physical, mental, notes, priority
            FROM players
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::row_to_player).collect()
    }

    async fn insert_player(&self, profile: &PlayerProfile) -> RosterResult<Player> {
        let result = sqlx::query(
            r#"
            INSERT INTO players (name, position, dob, category, team, height, weight,
                                 speed, technique, physical, mental, notes, priority)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&profile.name)
        .bind(profile.position.as_str())
        .bind(profile.dob.format("%Y-%m-%d").to_string())
        .bind(profile.category.as_str())
        .bind(&profile.team)
        .bind(profile.height)
        .bind(profile.weight)
        .bind(profile.skills.speed)
        .bind(profile.skills.technique)
        .bind(profile.skills.physical)
        .bind(profile.skills.mental)
        .bind(&profile.notes)
        .bind(profile.priority.as_str())
        .execute(self.db.pool())
        .await?;

        let player = Player { id: result.last_insert_rowid(), profile: profile.clone() };
        info!("Stored player {} with ID: {}", player.profile.name, player.id);
        Ok(player)
    }

    async fn replace_player(&self, id: PlayerId, profile: &PlayerProfile) -> RosterResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE players
            SET name = ?, position = ?, dob = ?, category = ?, team = ?, height = ?, weight = ?,
                speed = ?, technique = ?, physical = ?, mental = ?, notes = ?, priority = ?
            WHERE id = ?
            "#,
        )
        .bind(&profile.name)
        .bind(profile.position.as_str())
        .bind(profile.dob.format("%Y-%m-%d").to_string())
        .bind(profile.category.as_str())
        .bind(&profile.team)
        .bind(profile.height)
        .bind(profile.weight)
        .bind(profile.skills.speed)
        .bind(profile.skills.technique)
        .bind(profile.skills.physical)
        .bind(profile.skills.mental)
        .bind(&profile.notes)
        .bind(profile.priority.as_str())
        .bind(id)
        .execute(self.db.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(RosterError::NotFound(id));
        }
        Ok(())
    }

    async fn delete_player(&self, id: PlayerId) -> RosterResult<()> {
        let result = sqlx::query("DELETE FROM players WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(RosterError::NotFound(id));
        }
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
