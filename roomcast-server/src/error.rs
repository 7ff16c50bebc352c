//! Relay error taxonomy.
//!
//! Every variant is local to the gateway: it is logged where it happens and never
//! written back to a remote peer.

use roomcast_core::{EnvelopeError, RoomId, SessionId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// Room lookup miss.
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// Peer lookup miss inside a room.
    #[error("peer {name} not found in room {room}")]
    PeerNotFound { room: RoomId, name: String },

    #[error("session {session} already in room {room}")]
    DuplicateMember { room: RoomId, session: SessionId },

    #[error("session {session} not in room {room}")]
    NotAMember { room: RoomId, session: SessionId },

    /// Write to one connection failed; other fan-out targets are unaffected.
    #[error("write to session {session} failed: {reason}")]
    TransportWrite { session: SessionId, reason: String },

    #[error(transparent)]
    MalformedEnvelope(#[from] EnvelopeError),

    /// A well-formed envelope whose kind only the server may emit.
    #[error("unexpected {0} event from client")]
    UnexpectedEvent(&'static str),

    #[error("coordinator unavailable: {0}")]
    CoordinatorUnavailable(String),
}
