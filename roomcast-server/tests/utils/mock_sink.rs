use async_trait::async_trait;
use roomcast_core::{Envelope, SessionId};
use roomcast_server::{ConnectionSink, RelayError};
use std::sync::Arc;
use tokio::sync::Mutex;

/// ConnectionSink that captures every envelope written to it.
#[derive(Clone, Default)]
pub struct MockConnectionSink {
    received: Arc<Mutex<Vec<Envelope>>>,
}

impl MockConnectionSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far, in delivery order.
    pub async fn received(&self) -> Vec<Envelope> {
        self.received.lock().await.clone()
    }

    /// Received envelopes of one event kind.
    pub async fn received_of(&self, kind: &str) -> Vec<Envelope> {
        self.received
            .lock()
            .await
            .iter()
            .filter(|e| e.event.kind() == kind)
            .cloned()
            .collect()
    }

    pub async fn clear(&self) {
        self.received.lock().await.clear();
    }
}

#[async_trait]
impl ConnectionSink for MockConnectionSink {
    async fn send(&self, envelope: &Envelope) -> Result<(), RelayError> {
        tracing::debug!("[MockSink] {} from {}", envelope.event.kind(), envelope.sender);
        self.received.lock().await.push(envelope.clone());
        Ok(())
    }
}

/// ConnectionSink whose writes always fail, as if the peer's socket were gone.
pub struct FailingSink {
    pub session: SessionId,
}

#[async_trait]
impl ConnectionSink for FailingSink {
    async fn send(&self, _envelope: &Envelope) -> Result<(), RelayError> {
        Err(RelayError::TransportWrite {
            session: self.session,
            reason: "peer went away".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomcast_core::{Event, MediaControl};

    #[tokio::test]
    async fn test_mock_sink_captures_envelopes() {
        let sink = MockConnectionSink::new();
        let envelope = Envelope::new("alice", Event::Play(MediaControl::default()));

        sink.send(&envelope).await.unwrap();

        assert_eq!(sink.received().await, vec![envelope]);
        assert_eq!(sink.received_of("play").await.len(), 1);
        assert!(sink.received_of("pause").await.is_empty());
    }

    #[tokio::test]
    async fn test_failing_sink_reports_transport_write() {
        let sink = FailingSink {
            session: SessionId::new(),
        };
        let envelope = Envelope::new("alice", Event::Play(MediaControl::default()));

        let err = sink.send(&envelope).await.unwrap_err();

        assert!(matches!(err, RelayError::TransportWrite { .. }));
    }
}
