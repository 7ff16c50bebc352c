use crate::error::RelayError;
use crate::transport::Connection;
use roomcast_core::{RoomId, RoomSummary, SessionId};

/// Membership of one room, in join order.
///
/// A session appears at most once. Emptying a room is handled by the registry, which
/// drops it in the same step.
pub struct Room {
    id: RoomId,
    name: String,
    members: Vec<Connection>,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Connection] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, session: SessionId) -> bool {
        self.get(session).is_some()
    }

    pub fn get(&self, session: SessionId) -> Option<&Connection> {
        self.members.iter().find(|c| c.session == session)
    }

    /// First member called `name`, skipping `except`.
    pub fn find_by_name(&self, name: &str, except: SessionId) -> Option<&Connection> {
        self.members
            .iter()
            .find(|c| c.username == name && c.session != except)
    }

    pub fn add_client(&mut self, connection: Connection) -> Result<(), RelayError> {
        if self.contains(connection.session) {
            return Err(RelayError::DuplicateMember {
                room: self.id.clone(),
                session: connection.session,
            });
        }
        self.members.push(connection);
        Ok(())
    }

    pub fn remove_client(&mut self, session: SessionId) -> Result<Connection, RelayError> {
        let Some(index) = self.members.iter().position(|c| c.session == session) else {
            return Err(RelayError::NotAMember {
                room: self.id.clone(),
                session,
            });
        };
        Ok(self.members.remove(index))
    }

    pub fn to_summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            users: self.members.len(),
            members: self.members.iter().map(|c| c.username.clone()).collect(),
        }
    }
}
