//! Pass-through game operations: locate the room, delegate to the engine,
//! re-broadcast the engine's results. The session core interprets none of
//! the gameplay beyond resolving which live sessions get which payloads.

use crate::game;
use fishy_shared::{GameStatus, ServerMsg};

use super::state::{AppState, SessionId};

pub async fn start_game(state: &AppState, session: SessionId, room_code: &str) {
    let mut reg = state.registry.write().await;
    let reg = &mut *reg;

    let Some(room) = reg.rooms.get_mut(room_code) else {
        reg.sessions.unicast(session, error("Room not found"));
        return;
    };
    if let Err(e) = room.game.start_game() {
        reg.sessions.unicast(session, error(&e.to_string()));
        return;
    }

    // Every player gets their own personalized view of round one.
    for player in room.game.players.iter() {
        if let Some(sid) = reg.sessions.resolve_session(player.id, room_code) {
            reg.sessions
                .unicast(sid, ServerMsg::GameStarted(room.game.player_state(player.id)));
        }
    }
    tracing::info!(room = %room_code, players = room.game.players.len(), "game started");
}

pub async fn make_guess(
    state: &AppState,
    session: SessionId,
    room_code: &str,
    guessed_player_id: fishy_shared::PlayerId,
) {
    let mut reg = state.registry.write().await;
    let reg = &mut *reg;

    let Some(room) = reg.rooms.get_mut(room_code) else {
        reg.sessions.unicast(session, error("Room not found"));
        return;
    };
    let Some(guesser) = reg.sessions.binding(session).map(|b| b.player_id) else {
        reg.sessions.unicast(session, error("You have not joined this game"));
        return;
    };

    let result = match room.game.process_guess(guesser, guessed_player_id) {
        Err(e) => {
            reg.sessions.unicast(session, error(&e.to_string()));
            return;
        }
        Ok(result) => result,
    };

    reg.sessions
        .roomcast(room_code, &ServerMsg::GuessResult(result.clone()));

    if result.round_ended {
        if room.game.state.status == GameStatus::Finished {
            reg.sessions
                .roomcast(room_code, &ServerMsg::GameOver(room.game.final_results()));
            tracing::info!(room = %room_code, "game finished");
        } else {
            // The engine already advanced the round; hold the per-player
            // states back for the intermission so clients can animate.
            schedule_new_round_broadcast(state, room_code.to_string());
        }
    } else {
        for player in room.game.players.iter() {
            if let Some(sid) = reg.sessions.resolve_session(player.id, room_code) {
                reg.sessions.unicast(
                    sid,
                    ServerMsg::GameStateUpdate(room.game.player_state(player.id)),
                );
            }
        }
    }
}

pub async fn skip_question(state: &AppState, room_code: &str) {
    let mut reg = state.registry.write().await;
    let reg = &mut *reg;

    let Some(room) = reg.rooms.get_mut(room_code) else {
        return;
    };
    let result = room.game.skip_question();
    reg.sessions
        .roomcast(room_code, &ServerMsg::QuestionSkipped(result));
}

pub async fn restart_game(state: &AppState, room_code: &str) {
    let mut reg = state.registry.write().await;
    let reg = &mut *reg;

    let Some(room) = reg.rooms.get_mut(room_code) else {
        return;
    };

    reg.sessions.roomcast(room_code, &ServerMsg::GameRestarting);
    room.game.reset_for_restart();
    for player in room.game.players.iter() {
        reg.sessions.roomcast(
            room_code,
            &ServerMsg::PlayerRejoined {
                player: player.public(),
            },
        );
    }
    reg.sessions.roomcast(room_code, &ServerMsg::GameRestarted);
    tracing::info!(room = %room_code, "game restarted");
}

/// Deliver the next round's personalized states after the intermission.
/// Runs outside the serialized path, so it re-validates the room like any
/// other deferred task.
fn schedule_new_round_broadcast(state: &AppState, room_code: String) {
    let state = state.clone();
    tokio::spawn(async move {
        tokio::time::sleep(game::ROUND_INTERMISSION).await;

        let reg = state.registry.read().await;
        let Some(room) = reg.room(&room_code) else {
            return;
        };
        let next_guesser = room.game.current_guesser().map(|p| p.name.clone());
        for player in room.game.players.iter() {
            if let Some(sid) = reg.sessions.resolve_session(player.id, &room_code) {
                let mut view = room.game.player_state(player.id);
                view.next_guesser = next_guesser.clone();
                reg.sessions.unicast(sid, ServerMsg::NewRound(view));
            }
        }
    });
}

fn error(message: &str) -> ServerMsg {
    ServerMsg::Error {
        message: message.to_string(),
    }
}
