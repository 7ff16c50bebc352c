use crate::error::RelayError;
use crate::room::Room;
use crate::transport::Connection;
use roomcast_core::{RoomId, RoomSummary, SessionId};
use std::collections::HashMap;
use tracing::info;

/// What became of a room after one of its members left.
#[derive(Debug, PartialEq, Eq)]
pub enum Departure {
    /// The room still has members; here is its state after the removal.
    Remaining(RoomSummary),
    /// The last member left and the room was dropped from the registry.
    Deleted(RoomId),
}

/// room-id → Room. Owned by the coordinator and never shared.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: HashMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty room under a fresh id.
    pub fn create(&mut self, name: impl Into<String>) -> RoomSummary {
        let mut id = RoomId::generate();
        while self.rooms.contains_key(&id) {
            id = RoomId::generate();
        }
        let room = Room::new(id.clone(), name);
        let summary = room.to_summary();
        info!("Room {} ({}) created", summary.name, id);
        self.rooms.insert(id, room);
        summary
    }

    pub fn get(&self, id: &RoomId) -> Result<&Room, RelayError> {
        self.rooms
            .get(id)
            .ok_or_else(|| RelayError::RoomNotFound(id.clone()))
    }

    #[cfg(test)]
    pub fn contains(&self, id: &RoomId) -> bool {
        self.rooms.contains_key(id)
    }

    /// Add `connection` to the room it names and return the room's new state.
    pub fn join(&mut self, connection: Connection) -> Result<RoomSummary, RelayError> {
        let room = self
            .rooms
            .get_mut(&connection.room)
            .ok_or_else(|| RelayError::RoomNotFound(connection.room.clone()))?;
        room.add_client(connection)?;
        Ok(room.to_summary())
    }

    /// Remove `session` from room `id`, dropping the room if that empties it.
    pub fn leave(&mut self, id: &RoomId, session: SessionId) -> Result<Departure, RelayError> {
        let room = self
            .rooms
            .get_mut(id)
            .ok_or_else(|| RelayError::RoomNotFound(id.clone()))?;
        room.remove_client(session)?;

        if room.is_empty() {
            info!("Deleting room {} ({}) as it is now empty", room.name(), id);
            self.rooms.remove(id);
            return Ok(Departure::Deleted(id.clone()));
        }

        Ok(Departure::Remaining(room.to_summary()))
    }

    /// Snapshots of every room, ordered by id.
    pub fn summaries(&self) -> Vec<RoomSummary> {
        let mut summaries: Vec<_> = self.rooms.values().map(Room::to_summary).collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
