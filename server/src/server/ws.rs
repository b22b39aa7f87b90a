// WebSocket handlers and websocket-specific helpers.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::StreamExt;
use tokio::sync::mpsc;

use fishy_shared::{ClientMsg, ServerMsg};

use super::state::{AppState, SessionId};
use super::{game_ops, session};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let session = state.allocate_session_id();

    // All outbound traffic for this session funnels through one outbox so
    // roomcasts and direct replies stay ordered.
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMsg>();
    session::on_connect(&state, session, tx).await;

    loop {
        tokio::select! {
            outbound = rx.recv() => {
                match outbound {
                    Some(sm) => send_ws(&mut socket, &sm).await,
                    // Outbox dropped server-side - treat as shutdown.
                    None => break,
                }
            }

            inbound = socket.next() => {
                match inbound {
                    Some(Ok(Message::Text(txt))) => {
                        if let Ok(cm) = serde_json::from_str::<ClientMsg>(&txt) {
                            process_client_msg(&state, session, cm).await;
                        } else {
                            tracing::warn!(%session, "failed to parse incoming ClientMsg JSON");
                            tracing::debug!(raw_in = %txt);
                            let reg = state.registry.read().await;
                            reg.sessions.unicast(session, ServerMsg::Error {
                                message: "Malformed ClientMsg JSON".into(),
                            });
                        }
                    }
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    _ => {}
                }
            }
        }
    }

    session::on_disconnect(&state, session).await;
    state.registry.write().await.sessions.unregister(session);
    tracing::info!(%session, "client disconnected");
}

async fn send_ws(socket: &mut WebSocket, msg: &ServerMsg) {
    match serde_json::to_string(msg) {
        Ok(txt) => {
            let _ = socket.send(Message::Text(txt)).await;
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize ServerMsg for websocket send");
        }
    }
}

async fn process_client_msg(state: &AppState, session: SessionId, cm: ClientMsg) {
    tracing::debug!(%session, ws_received_client_msg = ?cm);
    match cm {
        ClientMsg::JoinGame { room_code, name } => {
            session::on_join(state, session, &room_code, &name).await;
        }
        ClientMsg::StartGame { room_code } => {
            game_ops::start_game(state, session, &room_code).await;
        }
        ClientMsg::MakeGuess {
            room_code,
            guessed_player_id,
        } => {
            game_ops::make_guess(state, session, &room_code, guessed_player_id).await;
        }
        ClientMsg::SkipQuestion { room_code } => {
            game_ops::skip_question(state, &room_code).await;
        }
        ClientMsg::RestartGame { room_code } => {
            game_ops::restart_game(state, &room_code).await;
        }
    }
}
