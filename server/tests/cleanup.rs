//! Deferred-eviction timer semantics: the decision is made at expiry, not
//! at schedule time.

use std::time::{Duration, SystemTime};

use fishy_server::config::Config;
use fishy_server::game::Player;
use fishy_server::server::{cleanup, session, AppState, Room, SessionId};
use fishy_shared::PlayerId;
use tokio::sync::mpsc::unbounded_channel;

async fn insert_room_with_disconnected_player(state: &AppState, code: &str) {
    let mut reg = state.registry.write().await;
    let mut room = Room::new(code.to_string());
    let id = room.game.next_player_id();
    room.game.add_player(Player::new(id, "Alice".into()));
    room.game.mark_disconnected(id, SystemTime::now());
    reg.insert_room(room).unwrap();
}

async fn room_exists(state: &AppState, code: &str) -> bool {
    state.registry.read().await.rooms.contains_key(code)
}

#[tokio::test]
async fn empty_room_is_removed_after_the_grace_window() {
    let state = AppState::default();
    insert_room_with_disconnected_player(&state, "ABCDEF").await;

    cleanup::schedule_room_cleanup(&state, "ABCDEF".into(), Duration::from_millis(50));
    assert!(room_exists(&state, "ABCDEF").await);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!room_exists(&state, "ABCDEF").await);
}

#[tokio::test]
async fn reconnect_before_expiry_preserves_the_room() {
    let state = AppState::default();
    insert_room_with_disconnected_player(&state, "ABCDEF").await;

    cleanup::schedule_room_cleanup(&state, "ABCDEF".into(), Duration::from_millis(100));

    tokio::time::sleep(Duration::from_millis(20)).await;
    {
        let mut reg = state.registry.write().await;
        let room = reg.rooms.get_mut("ABCDEF").unwrap();
        room.game.mark_reconnected(PlayerId(1));
    }

    // the timer fires, observes a connected player, and does nothing
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(room_exists(&state, "ABCDEF").await);

    // a second disconnect after the grace window needs a fresh schedule
    {
        let mut reg = state.registry.write().await;
        let room = reg.rooms.get_mut("ABCDEF").unwrap();
        room.game.mark_disconnected(PlayerId(1), SystemTime::now());
    }
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(room_exists(&state, "ABCDEF").await);

    cleanup::schedule_room_cleanup(&state, "ABCDEF".into(), Duration::from_millis(50));
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!room_exists(&state, "ABCDEF").await);
}

#[tokio::test]
async fn repeated_scheduling_is_safe_without_cancellation() {
    let state = AppState::default();
    insert_room_with_disconnected_player(&state, "ABCDEF").await;

    for _ in 0..3 {
        cleanup::schedule_room_cleanup(&state, "ABCDEF".into(), Duration::from_millis(40));
    }
    tokio::time::sleep(Duration::from_millis(200)).await;
    // every timer re-validates; the removals after the first are no-ops
    assert!(!room_exists(&state, "ABCDEF").await);
}

#[tokio::test]
async fn disconnecting_the_last_player_schedules_eviction() {
    let cfg = Config {
        cleanup_grace_secs: 1,
        ..Config::default()
    };
    let state = AppState::new(cfg, None);
    {
        let mut reg = state.registry.write().await;
        reg.insert_room(Room::new("ABCDEF".into())).unwrap();
    }

    let s1 = SessionId(1);
    let (tx, _rx) = unbounded_channel();
    session::on_connect(&state, s1, tx).await;
    session::on_join(&state, s1, "ABCDEF", "Alice").await;
    session::on_disconnect(&state, s1).await;

    assert!(room_exists(&state, "ABCDEF").await);
    tokio::time::sleep(Duration::from_millis(1600)).await;
    assert!(!room_exists(&state, "ABCDEF").await);
}
