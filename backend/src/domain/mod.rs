//! # Domain Module
//!
//! Roster rules that hold regardless of how players are stored.
//!
//! ## Module Organization
//!
//! - **age**: age derivation from a date of birth
//! - **query**: AND-combined player filters
//! - **validation**: turning raw form input into a storable profile
//! - **player_service**: the add / load / update / delete / search operations
//!
//! ## Business Rules
//!
//! - Name, position, date of birth, category and team are required
//! - Dates of birth are ISO `YYYY-MM-DD` calendar dates; ages are always derived
//! - Height and weight must be positive; skill ratings are not range-checked
//! - Updates replace every field of a player
//! - Identities come from storage and are never reused

pub mod age;
pub mod player_service;
pub mod query;
pub mod validation;

pub use age::{age, age_today, today};
pub use player_service::PlayerService;
pub use query::filter_players;
pub use validation::{validate_player_input, PlayerValidationError};
