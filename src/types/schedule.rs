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

use crate::sm2::DEFAULT_EASE;
use crate::types::timestamp::Timestamp;

/// The persisted scheduling state of one flashcard.
///
/// Invariants, maintained by [`crate::sm2::review`]:
///
/// - `ease_factor` stays within [1.3, 3.0].
/// - `interval_days >= 0`, and `interval_days == 0` iff `next_review` is
///   `None` (the card is due immediately).
/// - `repetitions` counts consecutive non-lapse reviews and resets to zero
///   on a lapse.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardSchedule {
    /// Multiplier governing how quickly the review interval grows.
    pub ease_factor: f64,
    /// Days until the next review. Zero means due immediately.
    pub interval_days: i64,
    /// Consecutive non-lapse reviews since the last lapse.
    pub repetitions: u32,
    /// When the card was last reviewed, if ever.
    pub last_reviewed: Option<Timestamp>,
    /// When the card is next due. `None` means due now.
    pub next_review: Option<Timestamp>,
}

impl CardSchedule {
    /// The schedule of a card that has never been reviewed.
    pub fn initial() -> Self {
        Self {
            ease_factor: DEFAULT_EASE,
            interval_days: 0,
            repetitions: 0,
            last_reviewed: None,
            next_review: None,
        }
    }

    /// Whether the card has never been reviewed.
    pub fn is_new(&self) -> bool {
        self.last_reviewed.is_none()
    }

    /// Whether the card is eligible for review: never scheduled, or its due
    /// time has arrived.
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.next_review {
            None => true,
            Some(due) => due <= now,
        }
    }
}

impl Default for CardSchedule {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    #[test]
    fn test_initial_schedule() {
        let schedule = CardSchedule::initial();
        assert_eq!(schedule.ease_factor, 2.5);
        assert_eq!(schedule.interval_days, 0);
        assert_eq!(schedule.repetitions, 0);
        assert_eq!(schedule.last_reviewed, None);
        assert_eq!(schedule.next_review, None);
        assert!(schedule.is_new());
        assert_eq!(schedule, CardSchedule::default());
    }

    #[test]
    fn test_is_due() {
        let now = ts("2024-06-15T12:00:00.000");

        let new = CardSchedule::initial();
        assert!(new.is_due(now));

        let overdue = CardSchedule {
            next_review: Some(ts("2024-06-14T12:00:00.000")),
            ..CardSchedule::initial()
        };
        assert!(overdue.is_due(now));

        let due_exactly = CardSchedule {
            next_review: Some(now),
            ..CardSchedule::initial()
        };
        assert!(due_exactly.is_due(now));

        let not_yet = CardSchedule {
            next_review: Some(ts("2024-06-16T12:00:00.000")),
            ..CardSchedule::initial()
        };
        assert!(!not_yet.is_due(now));
    }

    #[test]
    fn test_serialization_roundtrip() -> Fallible<()> {
        let schedule = CardSchedule {
            ease_factor: 2.65,
            interval_days: 6,
            repetitions: 2,
            last_reviewed: Some(ts("2024-06-15T12:00:00.000")),
            next_review: Some(ts("2024-06-21T12:00:00.000")),
        };
        let serialized = serde_json::to_string(&schedule)?;
        let deserialized: CardSchedule = serde_json::from_str(&serialized)?;
        assert_eq!(schedule, deserialized);
        Ok(())
    }
}
