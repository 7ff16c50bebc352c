use crate::coordinator::{CoordinatorEvent, CoordinatorHandle};
use crate::error::RelayError;
use crate::transport::Connection;
use roomcast_core::{Envelope, SessionId};
use tracing::{debug, warn};

/// Inbound side of one registered connection.
///
/// Created by registering the connection; dropping it unregisters the connection. Since
/// `Drop` runs exactly once, so does the Unregister, whether the read loop ended on
/// close, on error, or by being aborted.
pub struct Reader {
    connection: Connection,
    coordinator: CoordinatorHandle,
}

impl Reader {
    pub fn attach(connection: Connection, coordinator: CoordinatorHandle) -> Result<Self, RelayError> {
        coordinator.register(connection.clone())?;
        Ok(Self {
            connection,
            coordinator,
        })
    }

    pub fn session(&self) -> SessionId {
        self.connection.session
    }

    /// Decode one text frame and hand it to the coordinator.
    ///
    /// A malformed or server-only envelope is rejected on its own; the caller decides
    /// whether an error should end the connection (only `CoordinatorUnavailable` should).
    pub fn handle_text(&self, text: &str) -> Result<(), RelayError> {
        let envelope = Envelope::decode(text)?;
        debug!(
            "Received {} from {} ({})",
            envelope.event.kind(),
            self.connection.username,
            self.connection.session
        );
        let event = CoordinatorEvent::from_client(&self.connection, envelope)?;
        self.coordinator.submit(event)
    }
}

impl Drop for Reader {
    fn drop(&mut self) {
        if let Err(e) = self
            .coordinator
            .unregister(self.connection.session, self.connection.room.clone())
        {
            warn!(
                "Could not unregister {} ({}): {}",
                self.connection.username, self.connection.session, e
            );
        }
    }
}
