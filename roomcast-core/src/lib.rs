//! Wire model shared by the roomcast gateway and its clients.

mod error;
pub mod model;

pub use error::EnvelopeError;
pub use model::*;
