mod app_state;
mod error_response;
mod http_router;
mod room_routes;

pub use app_state::*;
pub use http_router::*;
pub use room_routes::{ActiveRooms, CreateRoomRequest};
