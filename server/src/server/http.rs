// HTTP handlers for room creation and status.
//
// These endpoints are the CRUD side of the room lifecycle: creating a room
// registers a fresh engine under a unique code, the join endpoint is a
// pre-flight check only (the actual binding happens over the websocket),
// and room_status powers the client's reconnection hints.

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::time::UNIX_EPOCH;

use fishy_shared::{GameStatus, PlayerId};

use super::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NameRequest {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoomStatus {
    pub room_code: String,
    pub status: GameStatus,
    pub current_round: u32,
    pub total_players: usize,
    pub connected_players: usize,
    pub disconnected_players: Vec<String>,
    pub players: Vec<PlayerStatusEntry>,
}

#[derive(Debug, Serialize)]
pub struct PlayerStatusEntry {
    pub id: PlayerId,
    pub name: String,
    pub points: u32,
    pub is_disconnected: bool,
    pub disconnect_time: Option<f64>,
}

pub async fn create_room_handler(
    State(state): State<AppState>,
    Json(req): Json<NameRequest>,
) -> impl IntoResponse {
    if req.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Name is required" })),
        )
            .into_response();
    }

    match super::state::create_room(&state).await {
        Ok(room_code) => {
            let message = format!(
                "Room created successfully. Share code {room_code} with other players."
            );
            (
                StatusCode::OK,
                Json(serde_json::json!({ "room_code": room_code, "message": message })),
            )
                .into_response()
        }
        Err(e) => {
            // Only reachable if the generator's uniqueness contract broke.
            tracing::error!(error = %e, "room creation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}

pub async fn join_room_handler(
    State(state): State<AppState>,
    Path(room_code): Path<String>,
    Json(req): Json<NameRequest>,
) -> impl IntoResponse {
    if req.name.as_deref().map_or(true, |n| n.trim().is_empty()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Name is required" })),
        )
            .into_response();
    }

    let reg = state.registry.read().await;
    let Some(room) = reg.room(&room_code) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Room not found" })),
        )
            .into_response();
    };
    if room.game.state.status != GameStatus::Waiting {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Game already in progress" })),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Successfully joined room",
            "room_code": room_code,
        })),
    )
        .into_response()
}

pub async fn room_status_handler(
    State(state): State<AppState>,
    Path(room_code): Path<String>,
) -> impl IntoResponse {
    let reg = state.registry.read().await;
    let Some(room) = reg.room(&room_code) else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Room not found" })),
        )
            .into_response();
    };

    let players: Vec<PlayerStatusEntry> = room
        .game
        .players
        .iter()
        .map(|p| PlayerStatusEntry {
            id: p.id,
            name: p.name.clone(),
            points: p.points,
            is_disconnected: p.is_disconnected,
            disconnect_time: p.disconnected_at.map(|t| {
                t.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs_f64()
            }),
        })
        .collect();

    let status = RoomStatus {
        room_code: room.code.clone(),
        status: room.game.state.status,
        current_round: room.game.state.current_round,
        total_players: room.game.players.len(),
        connected_players: room.game.connected_count(),
        disconnected_players: room.game.disconnected_names(),
        players,
    };
    (StatusCode::OK, Json(status)).into_response()
}
