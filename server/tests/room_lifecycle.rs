use fishy_server::server::{codes, create_room, AppState, RegistryError, Room};

#[tokio::test]
async fn created_codes_are_unique_and_well_formed() {
    let state = AppState::default();
    for _ in 0..200 {
        let code = create_room(&state).await.unwrap();
        assert_eq!(code.len(), codes::CODE_LEN);
        assert!(code.bytes().all(|b| codes::CODE_ALPHABET.contains(&b)));
    }
    let reg = state.registry.read().await;
    assert_eq!(reg.rooms.len(), 200);
}

#[tokio::test]
async fn duplicate_insertion_is_an_invariant_violation() {
    let state = AppState::default();
    let mut reg = state.registry.write().await;
    reg.insert_room(Room::new("ABCDEF".into())).unwrap();
    let err = reg.insert_room(Room::new("ABCDEF".into())).unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateRoom(code) if code == "ABCDEF"));
    // the original entry is untouched
    assert!(reg.room("ABCDEF").is_some());
}

#[tokio::test]
async fn removal_is_idempotent() {
    let state = AppState::default();
    let mut reg = state.registry.write().await;
    reg.insert_room(Room::new("ABCDEF".into())).unwrap();
    reg.remove_room("ABCDEF");
    assert!(reg.room("ABCDEF").is_none());
    // removing an absent code is a no-op
    reg.remove_room("ABCDEF");
    reg.remove_room("QQQQQQ");
}
