use crate::error::RelayError;
use crate::transport::ConnectionSink;
use async_trait::async_trait;
use axum::extract::ws::Message;
use roomcast_core::{Envelope, SessionId};
use tokio::sync::mpsc;

/// Queues encoded envelopes for the connection's single writer task.
pub struct WsSink {
    session: SessionId,
    tx: mpsc::UnboundedSender<Message>,
}

impl WsSink {
    pub fn new(session: SessionId, tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { session, tx }
    }
}

#[async_trait]
impl ConnectionSink for WsSink {
    async fn send(&self, envelope: &Envelope) -> Result<(), RelayError> {
        let json = envelope.encode()?;
        self.tx
            .send(Message::Text(json.into()))
            .map_err(|e| RelayError::TransportWrite {
                session: self.session,
                reason: e.to_string(),
            })
    }
}
