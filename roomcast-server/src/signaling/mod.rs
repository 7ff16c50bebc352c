mod reader;
mod signaling_relay;
mod ws_handler;

pub use reader::*;
pub use signaling_relay::*;
pub use ws_handler::*;
