mod connection;
mod connection_sink;
mod ws_sink;

pub use connection::*;
pub use connection_sink::*;
pub use ws_sink::*;
