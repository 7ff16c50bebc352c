use crate::coordinator::{CoordinatorEvent, SignalEvent};
use crate::error::RelayError;
use crate::room::{Departure, RoomRegistry};
use crate::signaling::{AnswerRoute, OfferState, SignalingRelay};
use crate::transport::Connection;
use roomcast_core::{
    AnswerRequest, CandidateBatch, Envelope, Event, IceCandidate, PeerSignal, Presence, Receipt,
    RoomId, RoomNotice, RoomSummary, SessionDescription, SessionId,
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};

/// Sender name on envelopes the gateway itself originates.
pub const SERVER_SENDER: &str = "server";

/// The single serialized owner of rooms, offers, and candidate buffers.
///
/// One event is handled to completion before the next is read. No other task ever
/// touches this state, so none of it is locked.
pub struct Coordinator {
    registry: RoomRegistry,
    relay: SignalingRelay,
    inbox: mpsc::UnboundedReceiver<CoordinatorEvent>,
    notices: broadcast::Sender<RoomNotice>,
}

impl Coordinator {
    pub fn new(
        inbox: mpsc::UnboundedReceiver<CoordinatorEvent>,
        notices: broadcast::Sender<RoomNotice>,
    ) -> Self {
        Self {
            registry: RoomRegistry::new(),
            relay: SignalingRelay::new(),
            inbox,
            notices,
        }
    }

    /// Main loop. Runs until every handle is dropped; spawn it with `tokio::spawn`.
    pub async fn run(mut self) {
        info!("Coordinator event loop started");

        while let Some(event) = self.inbox.recv().await {
            self.handle_event(event).await;
        }

        info!("Coordinator inbox closed. Event loop finished");
    }

    async fn handle_event(&mut self, event: CoordinatorEvent) {
        match event {
            CoordinatorEvent::Register { connection } => self.register(connection).await,

            CoordinatorEvent::Unregister { session, room } => {
                self.unregister(session, &room).await
            }

            CoordinatorEvent::Broadcast { room, envelope } => self.broadcast(&room, envelope).await,

            CoordinatorEvent::Signal { from, room, signal } => {
                self.signal(from, &room, signal).await
            }

            CoordinatorEvent::CreateRoom { name, respond_to } => {
                let summary = self.registry.create(name);
                self.notify(RoomNotice::Created {
                    room: summary.clone(),
                });
                if respond_to.send(summary).is_err() {
                    debug!("CreateRoom caller went away before the reply");
                }
            }

            CoordinatorEvent::ListRooms { respond_to } => {
                let _ = respond_to.send(self.registry.summaries());
            }

            CoordinatorEvent::GetRoom { room, respond_to } => {
                let summary = self.registry.get(&room).ok().map(|r| r.to_summary());
                let _ = respond_to.send(summary);
            }
        }
    }

    async fn register(&mut self, connection: Connection) {
        let session = connection.session;
        let room_id = connection.room.clone();
        let username = connection.username.clone();

        let summary = match self.registry.join(connection) {
            Ok(summary) => summary,
            Err(RelayError::RoomNotFound(id)) => {
                warn!(
                    "User {} ({}) tried to join room {} which doesn't exist; dropping",
                    username, session, id
                );
                return;
            }
            Err(e) => {
                warn!("Register of {} ({}) ignored: {}", username, session, e);
                return;
            }
        };

        info!(
            "User {} ({}) joined room {} ({}), {} member(s)",
            username, session, summary.name, room_id, summary.users
        );

        let Ok(room) = self.registry.get(&room_id) else {
            return;
        };
        let members = room.members();

        fan_out(members, &room_update(summary), None).await;

        let joined = Envelope::new(
            username.clone(),
            Event::UserJoined(Presence {
                session,
                username: username.clone(),
            }),
        );
        fan_out(members, &joined, Some(session)).await;

        let Some(newcomer) = room.get(session) else {
            return;
        };
        for offer in self.relay.offers_in(&room_id, session) {
            debug!(
                "Replaying pending offer of {} ({}) to {}",
                offer.username, offer.owner, username
            );
            let replay = Envelope::new(offer.username.clone(), Event::OfferFound(offer.to_notice()));
            deliver(newcomer, &replay).await;
        }
    }

    async fn unregister(&mut self, session: SessionId, room_id: &RoomId) {
        self.relay.clear(session);

        let username = self
            .registry
            .get(room_id)
            .ok()
            .and_then(|room| room.get(session))
            .map(|c| c.username.clone())
            .unwrap_or_default();

        let departure = match self.registry.leave(room_id, session) {
            Ok(departure) => departure,
            Err(e) => {
                debug!("Unregister of {} is a no-op: {}", session, e);
                return;
            }
        };

        match departure {
            Departure::Deleted(id) => {
                self.notify(RoomNotice::Deleted { id });
            }
            Departure::Remaining(summary) => {
                info!(
                    "User {} ({}) left room {} ({}), {} member(s) remain",
                    username, session, summary.name, room_id, summary.users
                );
                let Ok(room) = self.registry.get(room_id) else {
                    return;
                };
                let members = room.members();
                fan_out(members, &room_update(summary), None).await;

                let left = Envelope::new(
                    username.clone(),
                    Event::UserLeft(Presence { session, username }),
                );
                fan_out(members, &left, None).await;
            }
        }
    }

    async fn broadcast(&self, room_id: &RoomId, envelope: Envelope) {
        let room = match self.registry.get(room_id) {
            Ok(room) => room,
            Err(e) => {
                warn!("Dropping {} broadcast: {}", envelope.event.kind(), e);
                return;
            }
        };
        let delivered = fan_out(room.members(), &envelope, None).await;
        debug!(
            "Sent {} to {}/{} member(s) of room {}",
            envelope.event.kind(),
            delivered,
            room.len(),
            room_id
        );
    }

    async fn signal(&mut self, from: SessionId, room_id: &RoomId, signal: SignalEvent) {
        let origin = match self.registry.get(room_id) {
            Ok(room) => match room.get(from) {
                Some(origin) => origin.clone(),
                None => {
                    warn!("Dropping signal from {}: not a member of {}", from, room_id);
                    return;
                }
            },
            Err(e) => {
                warn!("Dropping signal from {}: {}", from, e);
                return;
            }
        };

        match signal {
            SignalEvent::OfferSend(description) => self.offer_send(&origin, description).await,
            SignalEvent::CandidateSend(candidate) => self.candidate_send(&origin, candidate),
            SignalEvent::AnswerSend(request) => self.answer_send(&origin, request).await,
            SignalEvent::Offer(signal) => {
                let to = signal.to.clone();
                self.relay_direct(&origin, &to, Event::Offer(signal)).await
            }
            SignalEvent::Answer(signal) => {
                let to = signal.to.clone();
                self.relay_direct(&origin, &to, Event::Answer(signal)).await
            }
            SignalEvent::Candidates(batch) => {
                let to = batch.to.clone();
                self.relay_direct(&origin, &to, Event::Candidates(batch)).await
            }
        }
    }

    async fn offer_send(&mut self, origin: &Connection, description: SessionDescription) {
        let replaced = self.relay.store_offer(
            origin.session,
            origin.username.clone(),
            origin.room.clone(),
            description,
        );
        info!(
            "Stored offer from {} ({}) in room {}{}",
            origin.username,
            origin.session,
            origin.room,
            if replaced { ", replacing the previous one" } else { "" }
        );

        let (Some(offer), Ok(room)) = (
            self.relay.offer(origin.session),
            self.registry.get(&origin.room),
        ) else {
            return;
        };
        let found = Envelope::new(origin.username.clone(), Event::OfferFound(offer.to_notice()));
        fan_out(room.members(), &found, Some(origin.session)).await;

        let receipt = Envelope::new(
            SERVER_SENDER,
            Event::OfferRecv(Receipt {
                session: origin.session,
            }),
        );
        deliver(origin, &receipt).await;
    }

    fn candidate_send(&mut self, origin: &Connection, candidate: IceCandidate) {
        let buffered = self.relay.push_candidate(origin.session, candidate);
        debug!(
            "Buffered candidate #{} for {} ({})",
            buffered, origin.username, origin.session
        );
    }

    async fn answer_send(&mut self, origin: &Connection, request: AnswerRequest) {
        let Ok(room) = self.registry.get(&origin.room) else {
            return;
        };
        let target = room.get(request.target).cloned();

        // Only a member of the answerer's own room can be answered; anyone else resolves
        // to an empty candidate list and no forwarded answer.
        let route = match &target {
            Some(_) => self.relay.answer(request.target),
            None => AnswerRoute::default(),
        };
        let target_name = target
            .as_ref()
            .map(|t| t.username.clone())
            .unwrap_or_default();

        let candidates = Envelope::new(
            SERVER_SENDER,
            Event::Candidates(CandidateBatch {
                from: target_name,
                to: origin.username.clone(),
                candidates: route.candidates,
            }),
        );
        deliver(origin, &candidates).await;

        match target {
            Some(target) => {
                match route.previous {
                    OfferState::NoOffer => debug!(
                        "Answer from {} targets {} which has no offer on record",
                        origin.session, target.session
                    ),
                    OfferState::Answered => debug!(
                        "Offer of {} answered again by {}",
                        target.session, origin.session
                    ),
                    OfferState::Offered => {}
                }
                let answer = Envelope::new(
                    origin.username.clone(),
                    Event::Answer(PeerSignal {
                        from: origin.username.clone(),
                        to: target.username.clone(),
                        description: request.description,
                    }),
                );
                deliver(&target, &answer).await;
            }
            None => {
                warn!(
                    "Answer from {} not forwarded: {} is not in room {}",
                    origin.session, request.target, origin.room
                );
            }
        }

        let receipt = Envelope::new(
            SERVER_SENDER,
            Event::AnswerRecv(Receipt {
                session: request.target,
            }),
        );
        deliver(origin, &receipt).await;
    }

    async fn relay_direct(&self, origin: &Connection, to: &str, event: Event) {
        let Ok(room) = self.registry.get(&origin.room) else {
            return;
        };
        let Some(peer) = room.find_by_name(to, origin.session) else {
            let e = RelayError::PeerNotFound {
                room: origin.room.clone(),
                name: to.to_owned(),
            };
            warn!("Dropping {} from {}: {}", event.kind(), origin.username, e);
            return;
        };
        let envelope = Envelope::new(origin.username.clone(), event);
        deliver(peer, &envelope).await;
    }

    fn notify(&self, notice: RoomNotice) {
        // No subscribers is not an error; the notice is simply unobserved.
        if self.notices.send(notice).is_err() {
            debug!("Room notice dropped: no subscribers");
        }
    }
}

fn room_update(summary: RoomSummary) -> Envelope {
    Envelope::new(SERVER_SENDER, Event::RoomUpdate(summary))
}

async fn deliver(target: &Connection, envelope: &Envelope) -> bool {
    match target.send(envelope).await {
        Ok(()) => true,
        Err(e) => {
            error!(
                "Failed to deliver {} to {} ({}): {}",
                envelope.event.kind(),
                target.username,
                target.session,
                e
            );
            false
        }
    }
}

/// Write `envelope` to every member except `except`. A failed write is logged and the
/// remaining members are still attempted.
async fn fan_out(members: &[Connection], envelope: &Envelope, except: Option<SessionId>) -> usize {
    let mut delivered = 0;
    for member in members.iter().filter(|m| Some(m.session) != except) {
        if deliver(member, envelope).await {
            delivered += 1;
        }
    }
    delivered
}
