use roomcast_core::{IceCandidate, OfferNotice, RoomId, SessionDescription, SessionId};
use std::collections::HashMap;
use tracing::debug;

/// Negotiation progress for one offerer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferState {
    NoOffer,
    Offered,
    /// At least one answer was routed. The offer stays on record.
    Answered,
}

#[derive(Debug, Clone)]
pub struct PendingOffer {
    pub owner: SessionId,
    pub username: String,
    pub room: RoomId,
    pub description: SessionDescription,
    pub answered: bool,
    seq: u64,
}

impl PendingOffer {
    pub fn to_notice(&self) -> OfferNotice {
        OfferNotice {
            session: self.owner,
            username: self.username.clone(),
            description: self.description.clone(),
        }
    }
}

/// What an answer-send resolves to.
#[derive(Debug)]
pub struct AnswerRoute {
    /// Everything the target has gathered so far, in arrival order.
    pub candidates: Vec<IceCandidate>,
    /// The target's offer state before this answer.
    pub previous: OfferState,
}

impl Default for AnswerRoute {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
            previous: OfferState::NoOffer,
        }
    }
}

/// What an unregister removed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Cleared {
    pub offer: bool,
    pub candidates: usize,
}

/// Offer and candidate state for buffered negotiation, keyed by session.
///
/// Lives inside the coordinator; every method runs within one serialized step.
#[derive(Default)]
pub struct SignalingRelay {
    offers: HashMap<SessionId, PendingOffer>,
    candidates: HashMap<SessionId, Vec<IceCandidate>>,
    next_seq: u64,
}

impl SignalingRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `description` as the current offer of `owner`. A later offer replaces an
    /// earlier one. Returns true when an offer was replaced.
    pub fn store_offer(
        &mut self,
        owner: SessionId,
        username: impl Into<String>,
        room: RoomId,
        description: SessionDescription,
    ) -> bool {
        let seq = self.next_seq;
        self.next_seq += 1;
        let offer = PendingOffer {
            owner,
            username: username.into(),
            room,
            description,
            answered: false,
            seq,
        };
        self.offers.insert(owner, offer).is_some()
    }

    /// Buffer a candidate for later bulk delivery. Returns the buffer length.
    pub fn push_candidate(&mut self, owner: SessionId, candidate: IceCandidate) -> usize {
        let buffer = self.candidates.entry(owner).or_default();
        buffer.push(candidate);
        buffer.len()
    }

    /// Resolve an answer aimed at `target`: hand back its candidates and mark its offer
    /// answered. The buffer is left intact, so a repeat answer sees the same list.
    pub fn answer(&mut self, target: SessionId) -> AnswerRoute {
        let previous = self.offer_state(target);
        if let Some(offer) = self.offers.get_mut(&target) {
            offer.answered = true;
        }
        AnswerRoute {
            candidates: self.candidates.get(&target).cloned().unwrap_or_default(),
            previous,
        }
    }

    /// Offers on record in `room` from anyone but `except`, oldest first.
    pub fn offers_in(&self, room: &RoomId, except: SessionId) -> Vec<&PendingOffer> {
        let mut offers: Vec<_> = self
            .offers
            .values()
            .filter(|o| &o.room == room && o.owner != except)
            .collect();
        offers.sort_by_key(|o| o.seq);
        offers
    }

    pub fn offer(&self, owner: SessionId) -> Option<&PendingOffer> {
        self.offers.get(&owner)
    }

    pub fn offer_state(&self, owner: SessionId) -> OfferState {
        match self.offers.get(&owner) {
            None => OfferState::NoOffer,
            Some(o) if o.answered => OfferState::Answered,
            Some(_) => OfferState::Offered,
        }
    }

    #[cfg(test)]
    pub fn candidates(&self, owner: SessionId) -> &[IceCandidate] {
        self.candidates
            .get(&owner)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Forget everything `owner` negotiated.
    pub fn clear(&mut self, owner: SessionId) -> Cleared {
        let cleared = Cleared {
            offer: self.offers.remove(&owner).is_some(),
            candidates: self.candidates.remove(&owner).map_or(0, |c| c.len()),
        };
        if cleared.offer || cleared.candidates > 0 {
            debug!(
                "Cleared signaling state for {}: offer={}, candidates={}",
                owner, cleared.offer, cleared.candidates
            );
        }
        cleared
    }
}
