use crate::error::RelayError;
use async_trait::async_trait;
use roomcast_core::Envelope;

/// Outbound half of one connection.
///
/// Implementations must serialize their own writes: the coordinator and relay may both
/// target the same connection, and frames must never interleave.
#[async_trait]
pub trait ConnectionSink: Send + Sync {
    async fn send(&self, envelope: &Envelope) -> Result<(), RelayError>;
}
