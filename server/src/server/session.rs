//! Session lifecycle: connect, join/reconnect, disconnect.
//!
//! A session starts unbound, becomes bound by a successful join and returns
//! to unbound on disconnect. The (room, name) identity behind it outlives
//! the session: the player record is only flagged disconnected, so the name
//! can be reclaimed later (case-insensitively) by a reconnecting client.

use std::io::IsTerminal;
use std::time::SystemTime;

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::game::{self, Player};
use crate::pretty;
use fishy_shared::{GameStatus, ServerMsg};

use super::cleanup;
use super::state::{AppState, PlayerBinding, SessionId};

/// Join rejections. All are non-fatal and scoped to the originating
/// session; the `Display` text is the user-facing error message.
#[derive(Debug, Error)]
pub enum JoinError {
    #[error("Room not found")]
    RoomNotFound,
    #[error("Player \"{name}\" is already connected to this game")]
    NameAlreadyConnected { name: String },
    #[error("Game in progress. Disconnected players available for reconnection: {}", .names.join(", "))]
    GameInProgressReconnectable { names: Vec<String> },
    #[error("Game already in progress and no disconnected players available")]
    GameInProgress,
}

/// Register a bare transport session (no game binding yet) and acknowledge.
pub async fn on_connect(state: &AppState, session: SessionId, outbox: UnboundedSender<ServerMsg>) {
    let mut reg = state.registry.write().await;
    reg.sessions.register(session, outbox);
    reg.sessions.unicast(
        session,
        ServerMsg::Connected {
            message: "Connected to server".into(),
        },
    );
    tracing::info!(
        "{}",
        pretty::format_connect(session, std::io::stdout().is_terminal())
    );
}

/// Join a room: either reclaim a disconnected identity (reconnect) or enter
/// as a new player while the room is still waiting.
pub async fn on_join(state: &AppState, session: SessionId, room_code: &str, name: &str) {
    let mut reg = state.registry.write().await;
    let reg = &mut *reg;

    let Some(room) = reg.rooms.get_mut(room_code) else {
        reg.sessions.unicast(session, error_msg(JoinError::RoomNotFound));
        return;
    };

    match room
        .game
        .find_player_by_name(name)
        .map(|p| (p.id, p.is_disconnected))
    {
        Some((_, false)) => {
            // A name is a unique live identity within a room.
            reg.sessions.unicast(
                session,
                error_msg(JoinError::NameAlreadyConnected { name: name.into() }),
            );
        }
        Some((player_id, true)) => {
            // Reconnect path: reclaim the stable identity.
            let player_name = room
                .game
                .player(player_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| name.to_string());
            room.game.mark_reconnected(player_id);
            reg.sessions.bind(
                session,
                PlayerBinding {
                    player_id,
                    room_code: room.code.clone(),
                    name: player_name.clone(),
                },
            );
            reg.sessions.roomcast(
                room_code,
                &ServerMsg::PlayerReconnected {
                    player_id,
                    player_name: player_name.clone(),
                    message: format!("{player_name} has reconnected"),
                },
            );

            let connected = room.game.connected_count();
            if connected >= game::MIN_PLAYERS && room.game.state.status == GameStatus::Paused {
                room.game.state.status = GameStatus::Playing;
                reg.sessions.roomcast(
                    room_code,
                    &ServerMsg::GameResumed {
                        message: "Game resumed - enough players reconnected!".into(),
                    },
                );
                tracing::info!(room = %room_code, connected, "game resumed");
            }

            // Snapshot selection: mid-game states land on the game screen,
            // anything else on the waiting room.
            let snapshot = room.game.player_state(player_id);
            let msg = match room.game.state.status {
                GameStatus::Playing | GameStatus::Paused => ServerMsg::GameStarted(snapshot),
                _ => ServerMsg::GameState(snapshot),
            };
            reg.sessions.unicast(session, msg);
            tracing::info!(
                "{}",
                pretty::format_join(&player_name, room_code, true, std::io::stdout().is_terminal())
            );
        }
        None => {
            if room.game.state.status != GameStatus::Waiting {
                let names = room.game.disconnected_names();
                let err = if names.is_empty() {
                    JoinError::GameInProgress
                } else {
                    JoinError::GameInProgressReconnectable { names }
                };
                reg.sessions.unicast(session, error_msg(err));
                return;
            }

            let player_id = room.game.next_player_id();
            let player = Player::new(player_id, name.to_string());
            let joined = player.public();
            room.game.add_player(player);
            reg.sessions.bind(
                session,
                PlayerBinding {
                    player_id,
                    room_code: room.code.clone(),
                    name: name.to_string(),
                },
            );

            // Roster catch-up for the new session, then the room-wide notice
            // (which includes the new session), then the waiting-room state.
            for existing in room.game.players.iter().filter(|p| p.id != player_id) {
                reg.sessions.unicast(
                    session,
                    ServerMsg::PlayerJoined {
                        player: existing.public(),
                        message: format!("{} is in the room", existing.name),
                    },
                );
            }
            reg.sessions.roomcast(
                room_code,
                &ServerMsg::PlayerJoined {
                    player: joined,
                    message: format!("{name} has joined the game"),
                },
            );
            reg.sessions
                .unicast(session, ServerMsg::GameState(room.game.player_state(player_id)));
            tracing::info!(
                "{}",
                pretty::format_join(name, room_code, false, std::io::stdout().is_terminal())
            );
        }
    }
}

/// Tear down a session's binding, flag the player disconnected, and apply
/// the quorum and abandonment rules.
pub async fn on_disconnect(state: &AppState, session: SessionId) {
    let grace = state.cleanup_grace().await;
    let mut reg = state.registry.write().await;
    let reg = &mut *reg;

    // The binding is the session's room association; taking it out first
    // also keeps the departing session out of the roomcast below.
    let Some(binding) = reg.sessions.unbind(session) else {
        return;
    };
    let Some(room) = reg.rooms.get_mut(&binding.room_code) else {
        return;
    };

    room.game.mark_disconnected(binding.player_id, SystemTime::now());
    reg.sessions.roomcast(
        &binding.room_code,
        &ServerMsg::PlayerDisconnected {
            player_id: binding.player_id,
            player_name: binding.name.clone(),
            message: format!("{} has disconnected", binding.name),
        },
    );
    tracing::info!(
        "{}",
        pretty::format_disconnect(&binding.name, &binding.room_code, std::io::stdout().is_terminal())
    );

    let connected = room.game.connected_count();
    if room.game.state.status == GameStatus::Playing && connected < game::MIN_PLAYERS {
        room.game.state.status = GameStatus::Paused;
        reg.sessions.roomcast(
            &binding.room_code,
            &ServerMsg::GamePaused {
                message: format!(
                    "Game paused - need at least {} players. Waiting for {} to reconnect...",
                    game::MIN_PLAYERS,
                    binding.name
                ),
            },
        );
        tracing::info!(room = %binding.room_code, connected, "game paused");
    }

    if connected == 0 {
        cleanup::schedule_room_cleanup(state, binding.room_code.clone(), grace);
    }
}

fn error_msg(err: JoinError) -> ServerMsg {
    ServerMsg::Error {
        message: err.to_string(),
    }
}
