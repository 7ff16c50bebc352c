mod coordinator;
mod coordinator_event;
mod coordinator_handle;

pub use coordinator::*;
pub use coordinator_event::*;
pub use coordinator_handle::*;
