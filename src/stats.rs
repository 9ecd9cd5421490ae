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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// Scheduling statistics over one deck.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckStats {
    pub total_cards: usize,
    /// Cards that were never scheduled.
    pub new_cards: usize,
    /// Scheduled cards whose due time has arrived.
    pub due_cards: usize,
    /// Scheduled cards not yet due.
    pub learned_cards: usize,
    /// Mean ease factor, rounded to 2 decimal places.
    pub avg_ease_factor: f64,
    /// Mean interval in days, rounded to 1 decimal place.
    pub avg_interval_days: f64,
}

/// Computes scheduling statistics for a deck's cards. Zero-safe: an empty
/// deck yields all-zero statistics.
pub fn deck_stats(cards: &[Card], now: Timestamp) -> DeckStats {
    let total_cards = cards.len();
    let mut new_cards = 0;
    let mut due_cards = 0;
    let mut learned_cards = 0;
    let mut ease_sum = 0.0;
    let mut interval_sum = 0i64;
    for card in cards {
        match card.schedule.next_review {
            None => new_cards += 1,
            Some(due) if due <= now => due_cards += 1,
            Some(_) => learned_cards += 1,
        }
        ease_sum += card.schedule.ease_factor;
        interval_sum += card.schedule.interval_days;
    }
    let (avg_ease_factor, avg_interval_days) = if total_cards == 0 {
        (0.0, 0.0)
    } else {
        let n = total_cards as f64;
        (
            (ease_sum / n * 100.0).round() / 100.0,
            (interval_sum as f64 / n * 10.0).round() / 10.0,
        )
    };
    DeckStats {
        total_cards,
        new_cards,
        due_cards,
        learned_cards,
        avg_ease_factor,
        avg_interval_days,
    }
}
