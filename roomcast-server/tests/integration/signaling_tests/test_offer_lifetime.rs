use roomcast_core::{Event, SessionId};
use serde_json::json;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{
    TestPeer, answer_send_frame, candidate_send_frame, offer_send_frame, send_frame, settle,
};

#[tokio::test]
async fn test_late_joiner_gets_latest_offer_once() {
    init_tracing();

    let (coordinator, room) = create_test_room("replay").await;

    let alice = TestPeer::new("alice", &room);
    let alice_reader = alice.join(&coordinator);
    settle(&coordinator).await;

    send_frame(&alice_reader, offer_send_frame("alice", "first")).unwrap();
    send_frame(&alice_reader, offer_send_frame("alice", "second")).unwrap();
    settle(&coordinator).await;

    let bob = TestPeer::new("bob", &room);
    let _bob_reader = bob.join(&coordinator);
    settle(&coordinator).await;

    let found = bob.received_of("offer-found").await;
    assert_eq!(found.len(), 1);
    let Event::OfferFound(notice) = &found[0].event else {
        panic!("expected offer-found");
    };
    assert_eq!(notice.session, alice.session());
    assert_eq!(notice.description.sdp, "second");

    // The replay follows the join notifications.
    let kinds: Vec<&str> = bob.received().await.iter().map(|e| e.event.kind()).collect();
    assert_eq!(kinds, vec!["room-update", "offer-found"]);
}

#[tokio::test]
async fn test_replay_skips_other_rooms() {
    init_tracing();

    let (coordinator, red) = create_test_room("red").await;
    let blue = coordinator.create_room("blue").await.unwrap().id;

    let alice = TestPeer::new("alice", &red);
    let alice_reader = alice.join(&coordinator);
    send_frame(&alice_reader, offer_send_frame("alice", "red-only")).unwrap();
    settle(&coordinator).await;

    let bob = TestPeer::new("bob", &blue);
    let _bob_reader = bob.join(&coordinator);
    settle(&coordinator).await;

    assert!(bob.received_of("offer-found").await.is_empty());
}

#[tokio::test]
async fn test_unregister_clears_offer_and_candidates() {
    init_tracing();

    let (coordinator, room) = create_test_room("gone").await;

    let alice = TestPeer::new("alice", &room);
    let bob = TestPeer::new("bob", &room);
    let alice_reader = alice.join(&coordinator);
    let bob_reader = bob.join(&coordinator);
    settle(&coordinator).await;

    let alice_session: SessionId = alice.session();
    send_frame(&alice_reader, offer_send_frame("alice", "offer-sdp")).unwrap();
    send_frame(&alice_reader, candidate_send_frame("alice", json!("c1"))).unwrap();
    settle(&coordinator).await;

    drop(alice_reader);
    settle(&coordinator).await;
    alice.sink.clear().await;

    send_frame(&bob_reader, answer_send_frame("bob", alice_session, "late")).unwrap();
    settle(&coordinator).await;

    let batches = bob.received_of("candidates").await;
    assert_eq!(batches.len(), 1);
    let Event::Candidates(batch) = &batches[0].event else {
        panic!("expected candidates");
    };
    assert!(batch.candidates.is_empty());
    assert!(alice.received().await.is_empty(), "nothing is forwarded to a departed peer");
    assert_eq!(bob.received_of("answer-recv").await.len(), 1);

    let carol = TestPeer::new("carol", &room);
    let _carol_reader = carol.join(&coordinator);
    settle(&coordinator).await;

    assert!(carol.received_of("offer-found").await.is_empty());
}
