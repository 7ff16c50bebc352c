use crate::coordinator::{Coordinator, CoordinatorEvent};
use crate::error::RelayError;
use crate::transport::Connection;
use roomcast_core::{Envelope, RoomId, RoomNotice, RoomSummary, SessionId};
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::info;

/// Cloneable entry point to the coordinator task.
///
/// Event submission is synchronous so it can run from `Drop`. Queries round-trip through
/// the same inbox and are therefore ordered after every event submitted before them.
#[derive(Clone)]
pub struct CoordinatorHandle {
    sender: mpsc::UnboundedSender<CoordinatorEvent>,
    notices: broadcast::Sender<RoomNotice>,
}

impl CoordinatorHandle {
    /// Spawn the coordinator and return a handle to it.
    ///
    /// `notice_capacity` bounds how many room notices a slow subscriber may fall behind
    /// before it starts skipping.
    pub fn spawn(notice_capacity: usize) -> Self {
        let (sender, inbox) = mpsc::unbounded_channel();
        let (notices, _) = broadcast::channel(notice_capacity.max(1));

        let coordinator = Coordinator::new(inbox, notices.clone());
        tokio::spawn(coordinator.run());
        info!("Coordinator spawned");

        Self { sender, notices }
    }

    pub fn submit(&self, event: CoordinatorEvent) -> Result<(), RelayError> {
        self.sender
            .send(event)
            .map_err(|e| RelayError::CoordinatorUnavailable(format!("channel send failed: {e}")))
    }

    pub fn register(&self, connection: Connection) -> Result<(), RelayError> {
        self.submit(CoordinatorEvent::Register { connection })
    }

    pub fn unregister(&self, session: SessionId, room: RoomId) -> Result<(), RelayError> {
        self.submit(CoordinatorEvent::Unregister { session, room })
    }

    pub fn broadcast(&self, room: RoomId, envelope: Envelope) -> Result<(), RelayError> {
        self.submit(CoordinatorEvent::Broadcast { room, envelope })
    }

    pub async fn create_room(&self, name: impl Into<String>) -> Result<RoomSummary, RelayError> {
        let (tx, rx) = oneshot::channel();
        self.submit(CoordinatorEvent::CreateRoom {
            name: name.into(),
            respond_to: tx,
        })?;
        rx.await
            .map_err(|e| RelayError::CoordinatorUnavailable(format!("response receive failed: {e}")))
    }

    pub async fn list_rooms(&self) -> Result<Vec<RoomSummary>, RelayError> {
        let (tx, rx) = oneshot::channel();
        self.submit(CoordinatorEvent::ListRooms { respond_to: tx })?;
        rx.await
            .map_err(|e| RelayError::CoordinatorUnavailable(format!("response receive failed: {e}")))
    }

    pub async fn get_room(&self, room: RoomId) -> Result<RoomSummary, RelayError> {
        let (tx, rx) = oneshot::channel();
        self.submit(CoordinatorEvent::GetRoom {
            room: room.clone(),
            respond_to: tx,
        })?;
        rx.await
            .map_err(|e| RelayError::CoordinatorUnavailable(format!("response receive failed: {e}")))?
            .ok_or(RelayError::RoomNotFound(room))
    }

    /// Subscribe to room created/deleted notices.
    pub fn subscribe(&self) -> broadcast::Receiver<RoomNotice> {
        self.notices.subscribe()
    }
}
