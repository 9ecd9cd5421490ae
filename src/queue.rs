// Copyright 2026 the Flashdeck authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Study queue construction: selecting and ordering the cards for one
//! session, and the in-session re-insertion policy for lapsed cards.

use log::debug;

use crate::rng::SessionRng;
use crate::rng::sample;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// Default cap on the number of cards in a randomly-sampled session.
pub const DEFAULT_SESSION_CAP: usize = 10;

/// A lapsed card resurfaces at least this many positions later in the same
/// session.
const REINSERT_MIN_GAP: usize = 3;

/// Random extra positions (0..=2) added to the re-insertion gap.
const REINSERT_JITTER: u32 = 2;

/// How a session's queue is ordered and capped. Callers must pick one
/// explicitly; there is no implicit default policy.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QueueStrategy {
    /// Strict spaced-repetition order: unscheduled cards first, then
    /// earliest-due first. No cap.
    DueFirst,
    /// A uniform random sample of at most `max_cards`, in random order.
    RandomSample { max_cards: usize },
}

/// A session-construction policy: the ordering strategy, and whether to
/// restrict the session to cards that are currently due.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct QueueConfig {
    pub strategy: QueueStrategy,
    pub due_only: bool,
}

/// Builds the queue for one study session. An empty result is the "nothing
/// to study" state, not an error.
pub fn build_queue(
    cards: Vec<Card>,
    config: &QueueConfig,
    now: Timestamp,
    rng: &mut SessionRng,
) -> Vec<Card> {
    let candidates = if config.due_only {
        filter_due(cards, now)
    } else {
        cards
    };
    let queue = match config.strategy {
        QueueStrategy::DueFirst => sort_by_due(candidates),
        QueueStrategy::RandomSample { max_cards } => {
            draw_session_queue(candidates, max_cards, rng)
        }
    };
    debug!(
        "built study queue: {} cards ({:?})",
        queue.len(),
        config.strategy
    );
    queue
}

/// Whether a card is eligible for review right now.
pub fn is_due(card: &Card, now: Timestamp) -> bool {
    card.schedule.is_due(now)
}

/// Keeps only the cards that are due, preserving order.
pub fn filter_due(cards: Vec<Card>, now: Timestamp) -> Vec<Card> {
    cards.into_iter().filter(|c| is_due(c, now)).collect()
}

/// Orders cards for strict spaced-repetition study: cards that were never
/// scheduled (or just lapsed) first, then ascending by due time. The sort is
/// stable, so cards with equal keys keep their input order.
pub fn sort_by_due(mut cards: Vec<Card>) -> Vec<Card> {
    // Option's ordering puts None before Some, which is exactly the
    // "unscheduled first" rule.
    cards.sort_by_key(|c| c.schedule.next_review);
    cards
}

/// Selects the cards for a capped random session. Everything is kept, in
/// input order, when the deck fits under the cap; otherwise a uniform random
/// sample of exactly `max_cards`, in random order.
pub fn draw_session_queue(cards: Vec<Card>, max_cards: usize, rng: &mut SessionRng) -> Vec<Card> {
    if cards.len() <= max_cards {
        return cards;
    }
    sample(cards, max_cards, rng)
}

/// Where to splice a lapsed card back into the queue so it resurfaces later
/// in the same session, after a buffer of 3 to 5 cards. Returns `None` when
/// the lapse happened on the last card, in which case the session ends
/// without repeating it.
pub fn again_reinsert_index(
    current: usize,
    queue_len: usize,
    rng: &mut SessionRng,
) -> Option<usize> {
    if current + 1 >= queue_len {
        return None;
    }
    let gap = REINSERT_MIN_GAP + rng.between(0, REINSERT_JITTER) as usize;
    Some(usize::min(current + gap, queue_len))
}
