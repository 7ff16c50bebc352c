use crate::model::session::SessionId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Answer,
    Pranswer,
    Rollback,
}

/// WebRTC session description, relayed without interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub kind: SdpType,
    pub sdp: String,
}

/// Opaque ICE candidate as produced by the browser.
pub type IceCandidate = Value;

/// Peer-addressed offer or answer. `to` is a username inside the sender's room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerSignal {
    pub from: String,
    pub to: String,
    pub description: SessionDescription,
}

/// One or more candidates addressed to a peer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateBatch {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub candidates: Vec<IceCandidate>,
}

/// Tells a room member that `session` has a pending offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferNotice {
    pub session: SessionId,
    pub username: String,
    pub description: SessionDescription,
}

/// Answer to the pending offer held by `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub target: SessionId,
    pub description: SessionDescription,
}

/// Acknowledgement naming the session the acknowledged action concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub session: SessionId,
}
