//! # REST API Interface Layer
//!
//! HTTP endpoints for the roster:
//!
//! - `GET /api/players` / `POST /api/players`
//! - `GET|PUT|DELETE /api/players/:id`
//! - `GET /api/players/search`
//!
//! Validation failures map to 400, unknown identities to 404 and storage
//! failures to 500, each with an `{ "error": ... }` body.

pub mod player_apis;

pub use player_apis::*;
