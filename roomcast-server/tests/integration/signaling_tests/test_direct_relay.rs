use roomcast_core::Event;
use serde_json::json;

use crate::integration::{create_test_room, init_tracing};
use crate::utils::{TestPeer, direct_candidates_frame, direct_frame, send_frame, settle};

#[tokio::test]
async fn test_direct_offer_and_answer_reach_named_peer() {
    init_tracing();

    let (coordinator, room) = create_test_room("direct").await;

    let alice = TestPeer::new("alice", &room);
    let bob = TestPeer::new("bob", &room);
    let carol = TestPeer::new("carol", &room);
    let alice_reader = alice.join(&coordinator);
    let bob_reader = bob.join(&coordinator);
    let _carol_reader = carol.join(&coordinator);
    settle(&coordinator).await;

    send_frame(&alice_reader, direct_frame("offer", "alice", "bob", "o1")).unwrap();
    settle(&coordinator).await;

    let offers = bob.received_of("offer").await;
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].sender, "alice");
    let Event::Offer(signal) = &offers[0].event else {
        panic!("expected offer");
    };
    assert_eq!(signal.from, "alice");
    assert_eq!(signal.description.sdp, "o1");

    send_frame(&bob_reader, direct_frame("answer", "bob", "alice", "a1")).unwrap();
    settle(&coordinator).await;

    let answers = alice.received_of("answer").await;
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].sender, "bob");

    assert!(carol.received_of("offer").await.is_empty());
    assert!(carol.received_of("answer").await.is_empty());
}

#[tokio::test]
async fn test_direct_candidates_are_relayed() {
    init_tracing();

    let (coordinator, room) = create_test_room("trickle").await;

    let alice = TestPeer::new("alice", &room);
    let bob = TestPeer::new("bob", &room);
    let alice_reader = alice.join(&coordinator);
    let _bob_reader = bob.join(&coordinator);
    settle(&coordinator).await;

    let candidates = vec![json!({"candidate": "c1"}), json!({"candidate": "c2"})];
    send_frame(
        &alice_reader,
        direct_candidates_frame("alice", "bob", candidates.clone()),
    )
    .unwrap();
    settle(&coordinator).await;

    let batches = bob.received_of("candidates").await;
    assert_eq!(batches.len(), 1);
    let Event::Candidates(batch) = &batches[0].event else {
        panic!("expected candidates");
    };
    assert_eq!(batch.candidates, candidates);
    assert!(alice.received_of("candidates").await.is_empty());
}

#[tokio::test]
async fn test_unknown_peer_is_dropped() {
    init_tracing();

    let (coordinator, room) = create_test_room("lonely").await;
    let elsewhere = coordinator.create_room("elsewhere").await.unwrap().id;

    let alice = TestPeer::new("alice", &room);
    let dave = TestPeer::new("dave", &elsewhere);
    let alice_reader = alice.join(&coordinator);
    let _dave_reader = dave.join(&coordinator);
    settle(&coordinator).await;
    alice.sink.clear().await;

    send_frame(&alice_reader, direct_frame("offer", "alice", "nobody", "o1")).unwrap();
    // Peers are resolved within the sender's room only.
    send_frame(&alice_reader, direct_frame("offer", "alice", "dave", "o2")).unwrap();
    settle(&coordinator).await;

    assert!(alice.received().await.is_empty());
    assert!(dave.received_of("offer").await.is_empty());
}
