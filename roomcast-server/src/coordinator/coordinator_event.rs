use crate::error::RelayError;
use crate::transport::Connection;
use roomcast_core::{
    AnswerRequest, CandidateBatch, ChatMessage, Envelope, Event, IceCandidate, PeerSignal,
    RoomId, RoomSummary, SessionDescription, SessionId,
};
use tokio::sync::oneshot;

/// Everything the coordinator acts on. Processed strictly one at a time.
#[derive(Debug)]
pub enum CoordinatorEvent {
    /// A connection finished its handshake and wants into its room.
    Register { connection: Connection },

    /// A reader exited. Sent exactly once per registered connection.
    Unregister { session: SessionId, room: RoomId },

    /// Deliver `envelope` to every current member of `room`, sender included.
    Broadcast { room: RoomId, envelope: Envelope },

    /// Negotiation traffic from `from`, a member of `room`.
    Signal {
        from: SessionId,
        room: RoomId,
        signal: SignalEvent,
    },

    CreateRoom {
        name: String,
        respond_to: oneshot::Sender<RoomSummary>,
    },

    ListRooms {
        respond_to: oneshot::Sender<Vec<RoomSummary>>,
    },

    GetRoom {
        room: RoomId,
        respond_to: oneshot::Sender<Option<RoomSummary>>,
    },
}

/// Client-originated negotiation events.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalEvent {
    /// Buffered: store the caller's offer and tell the room.
    OfferSend(SessionDescription),
    /// Buffered: append to the caller's candidate buffer.
    CandidateSend(IceCandidate),
    /// Buffered: answer a stored offer.
    AnswerSend(AnswerRequest),
    /// Direct relay to a named peer.
    Offer(PeerSignal),
    /// Direct relay to a named peer.
    Answer(PeerSignal),
    /// Direct relay to a named peer.
    Candidates(CandidateBatch),
}

impl CoordinatorEvent {
    /// Turn an envelope read from `origin` into the event the coordinator should see.
    ///
    /// Chat and media events are re-stamped with the connection's own identity and room.
    /// Kinds only the server emits are rejected.
    pub fn from_client(origin: &Connection, envelope: Envelope) -> Result<Self, RelayError> {
        let stamp = |event: Event| Envelope::new(origin.username.clone(), event);
        let broadcast = |event: Event| CoordinatorEvent::Broadcast {
            room: origin.room.clone(),
            envelope: stamp(event),
        };
        let signal = |signal: SignalEvent| CoordinatorEvent::Signal {
            from: origin.session,
            room: origin.room.clone(),
            signal,
        };

        let event = match envelope.event {
            Event::Message(chat) => broadcast(Event::Message(ChatMessage {
                room: origin.room.to_string(),
                body: chat.body,
                sender: origin.username.clone(),
            })),
            e @ (Event::Load(_) | Event::Play(_) | Event::Pause(_)) => broadcast(e),
            Event::OfferSend(desc) => signal(SignalEvent::OfferSend(desc)),
            Event::CandidateSend(candidate) => signal(SignalEvent::CandidateSend(candidate)),
            Event::AnswerSend(request) => signal(SignalEvent::AnswerSend(request)),
            Event::Offer(s) => signal(SignalEvent::Offer(s)),
            Event::Answer(s) => signal(SignalEvent::Answer(s)),
            Event::Candidates(batch) => signal(SignalEvent::Candidates(batch)),
            other @ (Event::OfferRecv(_)
            | Event::OfferFound(_)
            | Event::AnswerRecv(_)
            | Event::RoomUpdate(_)
            | Event::UserJoined(_)
            | Event::UserLeft(_)) => return Err(RelayError::UnexpectedEvent(other.kind())),
        };
        Ok(event)
    }
}
