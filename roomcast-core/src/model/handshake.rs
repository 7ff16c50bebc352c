use crate::error::EnvelopeError;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};

/// First frame on a new connection: who is connecting, and to which room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handshake {
    pub username: String,
    pub room: RoomId,
}

impl Handshake {
    pub fn decode(text: &str) -> Result<Self, EnvelopeError> {
        serde_json::from_str(text).map_err(EnvelopeError::Malformed)
    }
}
