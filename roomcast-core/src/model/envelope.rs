use crate::error::EnvelopeError;
use crate::model::room::RoomSummary;
use crate::model::session::SessionId;
use crate::model::signaling::{
    AnswerRequest, CandidateBatch, IceCandidate, OfferNotice, PeerSignal, Receipt,
    SessionDescription,
};
use serde::{Deserialize, Deserializer, Serialize};

/// The only unit exchanged on a connection: who sent it, and what happened.
///
/// On the wire: `{"sender": "...", "event": "<kind>", "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub sender: String,
    #[serde(flatten)]
    pub event: Event,
}

impl Envelope {
    pub fn new(sender: impl Into<String>, event: Event) -> Self {
        Self {
            sender: sender.into(),
            event,
        }
    }

    /// Decode one text frame. A payload that does not fit its event kind is an error
    /// for this envelope only.
    pub fn decode(text: &str) -> Result<Self, EnvelopeError> {
        serde_json::from_str(text).map_err(EnvelopeError::Malformed)
    }

    pub fn encode(&self) -> Result<String, EnvelopeError> {
        serde_json::to_string(self).map_err(EnvelopeError::Encode)
    }
}

/// Closed set of event kinds, each with its own payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum Event {
    Message(ChatMessage),
    OfferSend(SessionDescription),
    OfferRecv(Receipt),
    OfferFound(OfferNotice),
    CandidateSend(IceCandidate),
    AnswerSend(AnswerRequest),
    AnswerRecv(Receipt),
    Answer(PeerSignal),
    Candidates(CandidateBatch),
    Offer(PeerSignal),
    RoomUpdate(RoomSummary),
    UserJoined(Presence),
    UserLeft(Presence),
    Load(MediaControl),
    Play(MediaControl),
    Pause(MediaControl),
}

impl Event {
    /// Wire name of the event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Message(_) => "message",
            Event::OfferSend(_) => "offer-send",
            Event::OfferRecv(_) => "offer-recv",
            Event::OfferFound(_) => "offer-found",
            Event::CandidateSend(_) => "candidate-send",
            Event::AnswerSend(_) => "answer-send",
            Event::AnswerRecv(_) => "answer-recv",
            Event::Answer(_) => "answer",
            Event::Candidates(_) => "candidates",
            Event::Offer(_) => "offer",
            Event::RoomUpdate(_) => "room-update",
            Event::UserJoined(_) => "user-joined",
            Event::UserLeft(_) => "user-left",
            Event::Load(_) => "load",
            Event::Play(_) => "play",
            Event::Pause(_) => "pause",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub room: String,
    pub body: String,
    #[serde(default)]
    pub sender: String,
}

/// Shared playback control (watch-party style).
///
/// Every field is optional, so a control frame may omit `data` entirely.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MediaControl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,
}

impl<'de> Deserialize<'de> for MediaControl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Fields {
            #[serde(default)]
            source: Option<String>,
            #[serde(default)]
            position: Option<f64>,
        }

        // A missing or null payload arrives here as `None`.
        let fields = Option::<Fields>::deserialize(deserializer)?;
        Ok(fields
            .map(|f| MediaControl {
                source: f.source,
                position: f.position,
            })
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presence {
    pub session: SessionId,
    pub username: String,
}
