mod envelope;
mod handshake;
mod room;
mod session;
mod signaling;

pub use envelope::{ChatMessage, Envelope, Event, MediaControl, Presence};
pub use handshake::Handshake;
pub use room::{RoomId, RoomNotice, RoomSummary};
pub use session::SessionId;
pub use signaling::{
    AnswerRequest, CandidateBatch, IceCandidate, OfferNotice, PeerSignal, Receipt, SdpType,
    SessionDescription,
};
