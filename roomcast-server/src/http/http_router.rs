use crate::http::AppState;
use crate::http::room_routes::{active_rooms, create_room, get_room, rooms_sse};
use crate::signaling::ws_handler;
use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/create_room", post(create_room))
        .route("/active_rooms", get(active_rooms))
        .route("/room/{id}", get(get_room))
        .route("/rooms_sse", get(rooms_sse))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
