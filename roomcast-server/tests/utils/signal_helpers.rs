use roomcast_core::SessionId;
use roomcast_server::CoordinatorHandle;
use serde_json::{Value, json};

/// Wait until the coordinator has processed everything submitted so far.
///
/// Queries share the coordinator's inbox, so the reply cannot arrive before earlier events
/// are fully handled (fan-out writes included).
pub async fn settle(coordinator: &CoordinatorHandle) {
    coordinator
        .list_rooms()
        .await
        .expect("Coordinator should be running");
}

pub fn chat_frame(sender: &str, body: &str) -> Value {
    json!({"sender": sender, "event": "message", "data": {"body": body}})
}

pub fn offer_send_frame(sender: &str, sdp: &str) -> Value {
    json!({"sender": sender, "event": "offer-send", "data": {"type": "offer", "sdp": sdp}})
}

pub fn candidate_send_frame(sender: &str, candidate: Value) -> Value {
    json!({"sender": sender, "event": "candidate-send", "data": candidate})
}

pub fn answer_send_frame(sender: &str, target: SessionId, sdp: &str) -> Value {
    json!({
        "sender": sender,
        "event": "answer-send",
        "data": {"target": target, "description": {"type": "answer", "sdp": sdp}},
    })
}

pub fn direct_frame(event: &str, from: &str, to: &str, sdp: &str) -> Value {
    let kind = if event == "offer" { "offer" } else { "answer" };
    json!({
        "sender": from,
        "event": event,
        "data": {"from": from, "to": to, "description": {"type": kind, "sdp": sdp}},
    })
}

pub fn direct_candidates_frame(from: &str, to: &str, candidates: Vec<Value>) -> Value {
    json!({
        "sender": from,
        "event": "candidates",
        "data": {"from": from, "to": to, "candidates": candidates},
    })
}
