use crate::error::RelayError;
use crate::transport::ConnectionSink;
use roomcast_core::{Envelope, RoomId, SessionId};
use std::fmt;
use std::sync::Arc;

/// A registered connection as seen by rooms and the coordinator.
///
/// Cloning shares the same outbound sink; the socket itself stays with its reader.
#[derive(Clone)]
pub struct Connection {
    pub session: SessionId,
    pub username: String,
    pub room: RoomId,
    sink: Arc<dyn ConnectionSink>,
}

impl Connection {
    pub fn new(
        session: SessionId,
        username: impl Into<String>,
        room: RoomId,
        sink: Arc<dyn ConnectionSink>,
    ) -> Self {
        Self {
            session,
            username: username.into(),
            room,
            sink,
        }
    }

    pub async fn send(&self, envelope: &Envelope) -> Result<(), RelayError> {
        self.sink.send(envelope).await
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("session", &self.session)
            .field("username", &self.username)
            .field("room", &self.room)
            .finish_non_exhaustive()
    }
}
