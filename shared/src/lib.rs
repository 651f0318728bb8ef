use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-assigned surrogate key. Never reused after deletion.
pub type PlayerId = i64;

/// Returned when a text value does not name a known position, category or priority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Playing position on the pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    GK,
    DF,
    MF,
    FW,
}

impl Position {
    pub const ALL: [Position; 4] = [Position::GK, Position::DF, Position::MF, Position::FW];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::DF => "DF",
            Position::MF => "MF",
            Position::FW => "FW",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| UnknownVariant { kind: "position", value: s.to_string() })
    }
}

/// League category the player is scouted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    J1,
    J2,
    J3,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::J1, Category::J2, Category::J3];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::J1 => "J1",
            Category::J2 => "J2",
            Category::J3 => "J3",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| UnknownVariant { kind: "category", value: s.to_string() })
    }
}

/// Scouting priority mark. Persisted as the mark itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    #[serde(rename = "◎")]
    Top,
    #[serde(rename = "◯")]
    Promising,
    #[serde(rename = "△")]
    Marginal,
    /// Records written before priorities existed read back as this value
    #[default]
    #[serde(rename = "要チェック")]
    NeedsCheck,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Top,
        Priority::Promising,
        Priority::Marginal,
        Priority::NeedsCheck,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Top => "◎",
            Priority::Promising => "◯",
            Priority::Marginal => "△",
            Priority::NeedsCheck => "要チェック",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| UnknownVariant { kind: "priority", value: s.to_string() })
    }
}

/// Skill ratings, conventionally 1-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub speed: u32,
    pub technique: u32,
    pub physical: u32,
    pub mental: u32,
}

/// Every field of a player except its identity. Always holds validated values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub position: Position,
    /// Date of birth, serialized as YYYY-MM-DD
    pub dob: NaiveDate,
    pub category: Category,
    pub team: String,
    /// Height in cm
    pub height: u32,
    /// Weight in kg
    pub weight: u32,
    pub skills: Skills,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub priority: Priority,
}

/// A stored player record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(flatten)]
    pub profile: PlayerProfile,
}

/// Raw values as collected by an add or edit form, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerInput {
    pub name: String,
    pub position: String,
    /// Expected as YYYY-MM-DD
    pub dob: String,
    pub category: String,
    pub team: String,
    pub height: u32,
    pub weight: u32,
    pub skills: Skills,
    #[serde(default)]
    pub notes: String,
    /// Falls back to needs-check when absent
    #[serde(default)]
    pub priority: Option<String>,
}

impl From<&PlayerProfile> for PlayerInput {
    fn from(profile: &PlayerProfile) -> Self {
        Self {
            name: profile.name.clone(),
            position: profile.position.to_string(),
            dob: profile.dob.format("%Y-%m-%d").to_string(),
            category: profile.category.to_string(),
            team: profile.team.clone(),
            height: profile.height,
            weight: profile.weight,
            skills: profile.skills,
            notes: profile.notes.clone(),
            priority: Some(profile.priority.to_string()),
        }
    }
}

/// Optional predicates combined with logical AND. `None` means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub position: Option<Position>,
    pub category: Option<Category>,
    /// Inclusive upper bound on derived age
    pub max_age: Option<i32>,
    /// Inclusive lower bound on the speed rating
    pub min_speed: Option<u32>,
}

impl FilterSpec {
    pub fn is_unconstrained(&self) -> bool {
        self.position.is_none()
            && self.category.is_none()
            && self.max_age.is_none()
            && self.min_speed.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerListResponse {
    pub players: Vec<Player>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub player: Player,
    pub success_message: String,
}

/// Query string of the search endpoint. `all` or an empty value disables a constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSearchQuery {
    pub position: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub max_age: Option<i32>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub min_speed: Option<u32>,
}

/// Numeric query parameters left blank by a form (`max_age=`) count as absent
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("'{}': {}", raw, e))),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSearchResult {
    #[serde(flatten)]
    pub player: Player,
    pub age: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSearchResponse {
    /// Day the ages were computed against
    pub as_of: NaiveDate,
    pub results: Vec<PlayerSearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
