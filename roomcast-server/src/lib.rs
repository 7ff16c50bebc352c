//! Room-scoped relay gateway.
//!
//! Connections are grouped into rooms; chat and media events fan out to a room, and
//! WebRTC offers, answers, and ICE candidates are routed between peers sharing one.
//!
//! All room, offer, and candidate state belongs to a single [`Coordinator`] task. Readers,
//! HTTP handlers, and the WebSocket gateway only talk to it through a
//! [`CoordinatorHandle`].

pub mod config;
pub mod coordinator;
pub mod error;
pub mod http;
pub mod room;
pub mod signaling;
pub mod transport;


pub use config::{Config, ConfigError};
pub use coordinator::*;
pub use error::RelayError;
pub use http::{AppState, router};
pub use room::*;
pub use signaling::*;
pub use transport::*;
