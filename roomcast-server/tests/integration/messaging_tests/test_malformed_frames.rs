use roomcast_server::RelayError;
use serde_json::json;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{TestPeer, chat_frame, send_frame, settle};

#[tokio::test]
async fn test_malformed_frame_is_rejected_alone() {
    init_tracing();

    let (coordinator, room) = create_test_room("robust").await;

    let alice = TestPeer::new("alice", &room);
    let bob = TestPeer::new("bob", &room);
    let alice_reader = alice.join(&coordinator);
    let _bob_reader = bob.join(&coordinator);
    settle(&coordinator).await;

    let err = alice_reader.handle_text("{not json").unwrap_err();
    assert!(matches!(err, RelayError::MalformedEnvelope(_)));

    let err = send_frame(&alice_reader, json!({"event": "teleport", "data": {}})).unwrap_err();
    assert!(matches!(err, RelayError::MalformedEnvelope(_)));

    // Right kind, wrong payload shape.
    let err = send_frame(&alice_reader, json!({"event": "message", "data": {"text": 1}}))
        .unwrap_err();
    assert!(matches!(err, RelayError::MalformedEnvelope(_)));

    send_frame(&alice_reader, chat_frame("alice", "still here")).unwrap();
    settle(&coordinator).await;

    assert_eq!(bob.received_of("message").await.len(), 1);
    assert_eq!(
        coordinator.get_room(room).await.unwrap().users,
        2,
        "nobody should have been unregistered"
    );
}

#[tokio::test]
async fn test_server_only_kinds_are_refused() {
    init_tracing();

    let (coordinator, room) = create_test_room("refuse").await;

    let alice = TestPeer::new("alice", &room);
    let bob = TestPeer::new("bob", &room);
    let alice_reader = alice.join(&coordinator);
    let _bob_reader = bob.join(&coordinator);
    settle(&coordinator).await;
    bob.sink.clear().await;

    let forged = json!({
        "sender": "alice",
        "event": "room-update",
        "data": {"id": room.to_string(), "name": "refuse", "users": 99, "members": []},
    });
    let err = send_frame(&alice_reader, forged).unwrap_err();
    assert!(matches!(err, RelayError::UnexpectedEvent("room-update")));

    settle(&coordinator).await;
    assert!(bob.received().await.is_empty());
}
