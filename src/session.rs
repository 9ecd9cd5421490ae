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

//! The in-session state machine: a queue cursor, per-rating counters, and a
//! review log for the caller to persist. Pure: timestamps and randomness are
//! passed in, nothing is read from the environment.

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::queue::again_reinsert_index;
use crate::rng::SessionRng;
use crate::sm2::review;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::rating::Rating;
use crate::types::schedule::CardSchedule;
use crate::types::timestamp::Timestamp;

/// Running counters for one study session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Cards in the queue at session start.
    pub total: usize,
    /// Card presentations rated so far. Can exceed `total` when lapsed cards
    /// are re-presented.
    pub reviewed: usize,
    pub again: usize,
    pub hard: usize,
    pub good: usize,
    pub easy: usize,
}

/// One recorded review: what the caller must persist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub card_id: CardId,
    pub rating: Rating,
    /// The schedule the card should have after this review.
    pub schedule: CardSchedule,
    pub reviewed_at: Timestamp,
}

/// End-of-session summary for the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_cards: usize,
    pub reviewed_cards: usize,
    pub duration_seconds: i64,
    pub again: usize,
    pub hard: usize,
    pub good: usize,
    pub easy: usize,
    /// Fraction of reviews rated Good or Easy.
    pub accuracy_rate: f64,
    /// Fraction of the queue presented.
    pub completion_rate: f64,
}

/// One study session over a prepared queue.
///
/// The caller presents `current_card()`, collects a rating, and calls
/// [`Session::record`], persisting the returned [`ReviewRecord`]. A lapsed
/// card is spliced back into the queue a few positions ahead so it resurfaces
/// before the session ends.
pub struct Session {
    queue: Vec<Card>,
    current: usize,
    stats: SessionStats,
    started_at: Timestamp,
}

impl Session {
    pub fn new(queue: Vec<Card>, started_at: Timestamp) -> Self {
        let stats = SessionStats {
            total: queue.len(),
            ..SessionStats::default()
        };
        Self {
            queue,
            current: 0,
            stats,
            started_at,
        }
    }

    /// The card awaiting a rating, or `None` when the session is over.
    pub fn current_card(&self) -> Option<&Card> {
        self.queue.get(self.current)
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.queue.len()
    }

    /// Cards left in the queue, including the current one.
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.current)
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Records a rating for the current card and advances the cursor.
    ///
    /// Computes the card's next schedule, updates the counters, and on a
    /// lapse re-inserts the card into the remaining queue (unless it was the
    /// last one). Returns `None` when the session is already finished.
    pub fn record(
        &mut self,
        rating: Rating,
        reviewed_at: Timestamp,
        rng: &mut SessionRng,
    ) -> Option<ReviewRecord> {
        if self.is_finished() {
            return None;
        }
        let schedule = review(rating, &self.queue[self.current].schedule, reviewed_at);
        self.queue[self.current].schedule = schedule;
        let card_id = self.queue[self.current].id.clone();

        self.stats.reviewed += 1;
        match rating {
            Rating::Again => self.stats.again += 1,
            Rating::Hard => self.stats.hard += 1,
            Rating::Good => self.stats.good += 1,
            Rating::Easy => self.stats.easy += 1,
        }

        if rating.is_lapse() {
            if let Some(at) = again_reinsert_index(self.current, self.queue.len(), rng) {
                let repeat = self.queue[self.current].clone();
                self.queue.insert(at, repeat);
                debug!("lapsed card {card_id} re-inserted at position {at}");
            }
        }

        debug!("recorded {} for card {card_id}", rating.as_str());
        self.current += 1;
        Some(ReviewRecord {
            card_id,
            rating,
            schedule,
            reviewed_at,
        })
    }

    pub fn summary(&self, ended_at: Timestamp) -> SessionSummary {
        let reviewed = self.stats.reviewed;
        let accuracy_rate = if reviewed == 0 {
            0.0
        } else {
            (self.stats.good + self.stats.easy) as f64 / reviewed as f64
        };
        let completion_rate = if self.queue.is_empty() {
            1.0
        } else {
            self.current as f64 / self.queue.len() as f64
        };
        SessionSummary {
            total_cards: self.stats.total,
            reviewed_cards: reviewed,
            duration_seconds: ended_at.seconds_since(self.started_at),
            again: self.stats.again,
            hard: self.stats.hard,
            good: self.stats.good,
            easy: self.stats.easy,
            accuracy_rate,
            completion_rate,
        }
    }
}
