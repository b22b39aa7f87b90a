//! Deferred eviction of abandoned rooms.
//!
//! Timers are fire-and-forget tokio tasks with no cancellation primitive:
//! every timer re-validates at expiry, so scheduling the same room any
//! number of times is safe. The connected count that matters is the one
//! observed when the timer fires, never the one at schedule time.

use std::time::Duration;

use super::state::AppState;

pub fn schedule_room_cleanup(state: &AppState, room_code: String, grace: Duration) {
    tracing::info!(room = %room_code, grace_secs = grace.as_secs(), "scheduling room cleanup");
    let state = state.clone();
    tokio::spawn(async move {
        tokio::time::sleep(grace).await;

        let mut reg = state.registry.write().await;
        let connected = match reg.room(&room_code) {
            // Already removed (by an earlier timer, most likely).
            None => return,
            Some(room) => room.game.connected_count(),
        };
        if connected == 0 {
            reg.remove_room(&room_code);
            tracing::info!(room = %room_code, "removed abandoned room");
        }
    });
}
