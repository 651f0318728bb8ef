//! # Player Query Engine
//!
//! Applies a [`FilterSpec`] to an in-memory roster. Every present constraint must
//! hold for a player to be kept, and the relative order of the input is preserved.
//! Age is derived per player only when an age bound is present, so an empty roster
//! never reaches the age calculation at all.

use chrono::NaiveDate;
use shared::{FilterSpec, Player};

use super::age::age;

/// Whether `player` satisfies every constraint in `spec`, with ages taken as of `as_of`
pub fn matches(player: &Player, spec: &FilterSpec, as_of: NaiveDate) -> bool {
    let profile = &player.profile;

    if let Some(position) = spec.position {
        if profile.position != position {
            return false;
        }
    }
    if let Some(category) = spec.category {
        if profile.category != category {
            return false;
        }
    }
    if let Some(min_speed) = spec.min_speed {
        if profile.skills.speed < min_speed {
            return false;
        }
    }
    if let Some(max_age) = spec.max_age {
        if age(profile.dob, as_of) > max_age {
            return false;
        }
    }
    true
}

/// Return the players matching `spec` in input order
pub fn filter_players(players: &[Player], spec: &FilterSpec, as_of: NaiveDate) -> Vec<Player> {
    if spec.is_unconstrained() {
        return players.to_vec();
    }
    players
        .iter()
        .filter(|p| matches(p, spec, as_of))
        .cloned()
        .collect()
}
