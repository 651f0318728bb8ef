use chrono::NaiveDate;
use shared::{Category, PlayerInput, PlayerProfile, Position, Priority};

/// Reasons a [`PlayerInput`] cannot be stored
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Position cannot be empty")]
    EmptyPosition,
    #[error("Unknown position '{0}' (expected GK, DF, MF or FW)")]
    UnknownPosition(String),
    #[error("Date of birth cannot be empty")]
    EmptyDateOfBirth,
    #[error("Date of birth '{0}' is not a valid YYYY-MM-DD date")]
    InvalidDateOfBirth(String),
    #[error("Category cannot be empty")]
    EmptyCategory,
    #[error("Unknown category '{0}' (expected J1, J2 or J3)")]
    UnknownCategory(String),
    #[error("Team cannot be empty")]
    EmptyTeam,
    #[error("Height must be positive")]
    NonPositiveHeight,
    #[error("Weight must be positive")]
    NonPositiveWeight,
    #[error("Unknown priority '{0}'")]
    UnknownPriority(String),
}

/// Check every field of `input` and convert it into a storable profile.
///
/// Name and team are trimmed, notes are kept as entered. The first failing field
/// is reported.
pub fn validate_player_input(input: &PlayerInput) -> Result<PlayerProfile, PlayerValidationError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(PlayerValidationError::EmptyName);
    }

    let position = parse_position(&input.position)?;
    let dob = parse_dob(&input.dob)?;

    if input.category.trim().is_empty() {
        return Err(PlayerValidationError::EmptyCategory);
    }
    let category: Category = input
        .category
        .parse()
        .map_err(|_| PlayerValidationError::UnknownCategory(input.category.clone()))?;

    let team = input.team.trim();
    if team.is_empty() {
        return Err(PlayerValidationError::EmptyTeam);
    }

    if input.height == 0 {
        return Err(PlayerValidationError::NonPositiveHeight);
    }
    if input.weight == 0 {
        return Err(PlayerValidationError::NonPositiveWeight);
    }

    let priority = match input.priority.as_deref().map(str::trim) {
        None | Some("") => Priority::default(),
        Some(raw) => raw
            .parse()
            .map_err(|_| PlayerValidationError::UnknownPriority(raw.to_string()))?,
    };

    Ok(PlayerProfile {
        name: name.to_string(),
        position,
        dob,
        category,
        team: team.to_string(),
        height: input.height,
        weight: input.weight,
        skills: input.skills,
        notes: input.notes.clone(),
        priority,
    })
}

fn parse_position(raw: &str) -> Result<Position, PlayerValidationError> {
    if raw.trim().is_empty() {
        return Err(PlayerValidationError::EmptyPosition);
    }
    raw.parse()
        .map_err(|_| PlayerValidationError::UnknownPosition(raw.to_string()))
}

/// Parse a strict ISO calendar date
pub fn parse_dob(raw: &str) -> Result<NaiveDate, PlayerValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PlayerValidationError::EmptyDateOfBirth);
    }
    // %Y alone would accept 5-digit years and unpadded fields
    if raw.len() != 10 {
        return Err(PlayerValidationError::InvalidDateOfBirth(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| PlayerValidationError::InvalidDateOfBirth(raw.to_string()))
}
