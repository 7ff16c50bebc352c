use crate::error::RelayError;
use crate::http::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use roomcast_core::{RoomId, RoomSummary};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateRoomRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ActiveRooms {
    pub rooms: Vec<RoomSummary>,
}

pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<Json<RoomSummary>, RelayError> {
    let summary = state.coordinator.create_room(request.name).await?;
    info!("Room {} ID:{} created successfully", summary.name, summary.id);
    Ok(Json(summary))
}

pub async fn active_rooms(State(state): State<AppState>) -> Result<Json<ActiveRooms>, RelayError> {
    let rooms = state.coordinator.list_rooms().await?;
    info!("{} rooms were found", rooms.len());
    Ok(Json(ActiveRooms { rooms }))
}

pub async fn get_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RoomSummary>, RelayError> {
    let summary = state.coordinator.get_room(RoomId::from(id)).await?;
    Ok(Json(summary))
}

/// Room created/deleted notices as server-sent events.
pub async fn rooms_sse(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let notices = state.coordinator.subscribe();

    let stream = futures::stream::unfold(notices, |mut notices| async move {
        loop {
            match notices.recv().await {
                Ok(notice) => {
                    let event = Event::default().event(notice.name()).json_data(&notice);
                    return Some((event, notices));
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Room notice subscriber lagged, skipped {}", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
