//! # REST API for Player Management
//!
//! Endpoints for creating, listing, searching, updating and deleting players.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::{
    Category, ErrorResponse, FilterSpec, PlayerId, PlayerInput, PlayerListResponse, PlayerResponse,
    PlayerSearchQuery, PlayerSearchResponse, Position,
};
use tracing::{error, info, warn};

use crate::domain::{today, PlayerValidationError};
use crate::error::RosterError;
use crate::AppState;

/// Values of a search parameter that mean "no constraint"
const ANY_VALUE: [&str; 3] = ["", "all", "すべて"];

fn is_any(raw: &str) -> bool {
    let raw = raw.trim();
    ANY_VALUE.iter().any(|any| raw.eq_ignore_ascii_case(any))
}

/// Convert search query parameters into a filter
pub fn to_filter_spec(query: &PlayerSearchQuery) -> Result<FilterSpec, PlayerValidationError> {
    let position = match query.position.as_deref() {
        Some(raw) if !is_any(raw) => Some(
            raw.parse::<Position>()
                .map_err(|_| PlayerValidationError::UnknownPosition(raw.to_string()))?,
        ),
        _ => None,
    };
    let category = match query.category.as_deref() {
        Some(raw) if !is_any(raw) => Some(
            raw.parse::<Category>()
                .map_err(|_| PlayerValidationError::UnknownCategory(raw.to_string()))?,
        ),
        _ => None,
    };

    Ok(FilterSpec {
        position,
        category,
        max_age: query.max_age,
        min_speed: query.min_speed,
    })
}

/// Translate a roster error into a status code and JSON body
fn error_response(e: RosterError) -> Response {
    let status = match &e {
        RosterError::Validation(_) => StatusCode::BAD_REQUEST,
        RosterError::NotFound(_) => StatusCode::NOT_FOUND,
        RosterError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        error!("Storage failure: {}", e);
    } else {
        warn!("Request rejected: {}", e);
    }
    (status, Json(ErrorResponse { error: e.to_string() })).into_response()
}

/// A body or query string that could not be read at all is a bad request
fn rejection_response(message: String) -> Response {
    warn!("Request rejected: {}", message);
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message })).into_response()
}

/// List all players
pub async fn list_players(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/players");

    let service = state.player_service.lock().await;
    match service.load_all().await {
        Ok(players) => (StatusCode::OK, Json(PlayerListResponse { players })).into_response(),
        Err(e) => error_response(e),
    }
}

/// Create a new player
pub async fn create_player(
    State(state): State<AppState>,
    body: Result<Json<PlayerInput>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection.body_text()),
    };
    info!("POST /api/players - request: {:?}", request);

    let service = state.player_service.lock().await;
    match service.add(&request).await {
        Ok(player) => {
            let response = PlayerResponse {
                success_message: format!("Player {} added", player.profile.name),
                player,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Get a player by ID
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
) -> impl IntoResponse {
    info!("GET /api/players/{}", player_id);

    let service = state.player_service.lock().await;
    match service.get(player_id).await {
        Ok(player) => (StatusCode::OK, Json(player)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Replace every field of a player
pub async fn update_player(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
    body: Result<Json<PlayerInput>, JsonRejection>,
) -> impl IntoResponse {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => return rejection_response(rejection.body_text()),
    };
    info!("PUT /api/players/{} - request: {:?}", player_id, request);

    let service = state.player_service.lock().await;
    match service.update(player_id, &request).await {
        Ok(player) => {
            let response = PlayerResponse {
                success_message: format!("Player {} updated", player.profile.name),
                player,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// Delete a player
pub async fn delete_player(
    State(state): State<AppState>,
    Path(player_id): Path<PlayerId>,
) -> impl IntoResponse {
    info!("DELETE /api/players/{}", player_id);

    let service = state.player_service.lock().await;
    match service.delete(player_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// Search players with optional position, category, age and speed constraints
pub async fn search_players(
    State(state): State<AppState>,
    query: Result<Query<PlayerSearchQuery>, QueryRejection>,
) -> impl IntoResponse {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejection_response(rejection.body_text()),
    };
    info!("GET /api/players/search - query: {:?}", query);

    let spec = match to_filter_spec(&query) {
        Ok(spec) => spec,
        Err(e) => return error_response(e.into()),
    };

    let as_of = today();
    let service = state.player_service.lock().await;
    match service.search(&spec, as_of).await {
        Ok(results) => (StatusCode::OK, Json(PlayerSearchResponse { as_of, results })).into_response(),
        Err(e) => error_response(e),
    }
}
