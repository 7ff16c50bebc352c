use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const ROOM_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const ROOM_ID_LEN: usize = 5;

/// Short, human-shareable room identifier.
#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Generate a fresh 5-character alphanumeric id.
    pub fn generate() -> Self {
        let entropy = Uuid::new_v4();
        let id = entropy
            .as_bytes()
            .iter()
            .take(ROOM_ID_LEN)
            .map(|b| ROOM_ID_CHARSET[*b as usize % ROOM_ID_CHARSET.len()] as char)
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Point-in-time snapshot of a room, safe to hand to any receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: RoomId,
    pub name: String,
    /// Member count.
    pub users: usize,
    /// Member usernames in join order.
    #[serde(default)]
    pub members: Vec<String>,
}

/// Room lifecycle notifications consumed by the room-list stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RoomNotice {
    Created { room: RoomSummary },
    Deleted { id: RoomId },
}

impl RoomNotice {
    pub fn name(&self) -> &'static str {
        match self {
            RoomNotice::Created { .. } => "created",
            RoomNotice::Deleted { .. } => "deleted",
        }
    }
}
