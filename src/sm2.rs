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

//! The review scheduler: an SM-2 variant with a gentler ease penalty than
//! the original SuperMemo-2 algorithm.
//!
//! [`review`] is a total, deterministic function from (rating, current
//! schedule, review instant) to the next schedule. Out-of-range input state
//! is clamped rather than rejected: a usable next schedule is worth more
//! than failing a study session over already-corrupted data.

use crate::types::rating::Rating;
use crate::types::schedule::CardSchedule;
use crate::types::timestamp::Timestamp;

/// The lowest an ease factor can fall.
pub const MIN_EASE: f64 = 1.3;

/// The highest an ease factor can climb.
pub const MAX_EASE: f64 = 3.0;

/// The ease factor of a card that has never been reviewed.
pub const DEFAULT_EASE: f64 = 2.5;

/// Ease lost on a lapse.
const AGAIN_EASE_PENALTY: f64 = 0.2;

/// Ease lost on a hard recall.
const HARD_EASE_PENALTY: f64 = 0.15;

/// Ease gained on an easy recall.
const EASY_EASE_BONUS: f64 = 0.15;

/// Interval growth on a hard recall, independent of ease.
const HARD_INTERVAL_FACTOR: f64 = 1.2;

/// Extra interval growth on an easy recall, on top of the ease factor.
const EASY_INTERVAL_FACTOR: f64 = 1.3;

/// Bootstrap interval after the first successful recall (4 if easy).
const FIRST_INTERVAL_GOOD: i64 = 1;
const FIRST_INTERVAL_EASY: i64 = 4;

/// Bootstrap interval after the second successful recall.
const SECOND_INTERVAL: i64 = 6;

fn clamp_ease(ease: f64) -> f64 {
    ease.clamp(MIN_EASE, MAX_EASE)
}

/// Ease factors are persisted rounded to two decimal places for stability.
fn round_ease(ease: f64) -> f64 {
    (ease * 100.0).round() / 100.0
}

fn new_ease(ease: f64, rating: Rating) -> f64 {
    let ease = match rating {
        Rating::Again => ease - AGAIN_EASE_PENALTY,
        Rating::Hard => ease - HARD_EASE_PENALTY,
        Rating::Good => ease,
        Rating::Easy => ease + EASY_EASE_BONUS,
    };
    clamp_ease(ease)
}

/// The next interval in days. `ease` is the already-updated ease factor;
/// `repetitions` is the count prior to this review. The first and second
/// successful recalls use fixed bootstrap intervals (1 day, then 6) before
/// multiplicative growth takes over.
fn new_interval(interval: i64, ease: f64, repetitions: u32, rating: Rating) -> i64 {
    let interval = match rating {
        Rating::Again => 0,
        Rating::Hard => ((interval as f64) * HARD_INTERVAL_FACTOR).round() as i64,
        Rating::Good => match repetitions {
            0 => FIRST_INTERVAL_GOOD,
            1 => SECOND_INTERVAL,
            _ => ((interval as f64) * ease).round() as i64,
        },
        Rating::Easy => match repetitions {
            0 => FIRST_INTERVAL_EASY,
            1 => SECOND_INTERVAL,
            _ => ((interval as f64) * ease * EASY_INTERVAL_FACTOR).round() as i64,
        },
    };
    interval.max(0)
}

/// Computes a card's next schedule from a review.
///
/// On `Again` the card's progress fully resets: interval zero, repetitions
/// zero, due immediately. On any other rating the repetition count
/// increments and the interval grows per the rating. The due date is
/// `reviewed_at` plus the new interval, or `None` when the interval is zero.
pub fn review(rating: Rating, current: &CardSchedule, reviewed_at: Timestamp) -> CardSchedule {
    // Persisted state may be out of range; clamping is authoritative
    // recovery.
    let ease = clamp_ease(current.ease_factor);
    let interval = current.interval_days.max(0);

    let ease = new_ease(ease, rating);
    let interval = new_interval(interval, ease, current.repetitions, rating);
    let repetitions = match rating {
        Rating::Again => 0,
        _ => current.repetitions + 1,
    };
    let next_review = if interval == 0 {
        None
    } else {
        Some(reviewed_at.plus_days(interval))
    };
    CardSchedule {
        ease_factor: round_ease(ease),
        interval_days: interval,
        repetitions,
        last_reviewed: Some(reviewed_at),
        next_review,
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;

    /// Approximate equality.
    fn feq(a: f64, b: f64) -> bool {
        f64::abs(a - b) < 0.001
    }

    fn make_timestamp(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn check_invariants(schedule: &CardSchedule) {
        assert!(schedule.ease_factor >= MIN_EASE);
        assert!(schedule.ease_factor <= MAX_EASE);
        assert!(schedule.interval_days >= 0);
        assert_eq!(schedule.interval_days == 0, schedule.next_review.is_none());
    }

    /// A simulation step: the schedule expected after one review.
    #[derive(Clone, Copy, Debug)]
    struct Step {
        ease: f64,
        interval: i64,
        repetitions: u32,
    }

    /// Simulate a series of reviews one day apart, starting from a new card,
    /// checking the invariants at every step.
    fn sim(ratings: Vec<Rating>) -> Vec<Step> {
        let start = make_timestamp("2024-01-01T09:00:00.000");
        let mut schedule = CardSchedule::initial();
        let mut steps = vec![];
        for (n, rating) in ratings.into_iter().enumerate() {
            let reviewed_at = start.plus_days(n as i64);
            schedule = review(rating, &schedule, reviewed_at);
            check_invariants(&schedule);
            assert_eq!(schedule.last_reviewed, Some(reviewed_at));
            steps.push(Step {
                ease: schedule.ease_factor,
                interval: schedule.interval_days,
                repetitions: schedule.repetitions,
            });
        }
        steps
    }

    fn check_sim(ratings: Vec<Rating>, expected: Vec<Step>) {
        let actual = sim(ratings);
        assert_eq!(expected.len(), actual.len());
        for (expected, actual) in zip(expected, actual) {
            assert!(
                feq(expected.ease, actual.ease)
                    && expected.interval == actual.interval
                    && expected.repetitions == actual.repetitions,
                "expected {expected:?}, got {actual:?}"
            );
        }
    }

    /// Good bootstraps 1 day, then 6, then multiplicative growth.
    #[test]
    fn test_3g() {
        let g = Rating::Good;
        check_sim(
            vec![g, g, g],
            vec![
                Step {
                    ease: 2.5,
                    interval: 1,
                    repetitions: 1,
                },
                Step {
                    ease: 2.5,
                    interval: 6,
                    repetitions: 2,
                },
                Step {
                    ease: 2.5,
                    interval: 15,
                    repetitions: 3,
                },
            ],
        );
    }

    /// Easy bootstraps 4 days, then 6, then grows with a 1.3 bonus.
    #[test]
    fn test_3e() {
        let e = Rating::Easy;
        check_sim(
            vec![e, e, e],
            vec![
                Step {
                    ease: 2.65,
                    interval: 4,
                    repetitions: 1,
                },
                Step {
                    ease: 2.8,
                    interval: 6,
                    repetitions: 2,
                },
                // round(6 * 2.95 * 1.3) = 23
                Step {
                    ease: 2.95,
                    interval: 23,
                    repetitions: 3,
                },
            ],
        );
    }

    /// Hard on a new card leaves the interval at zero but still counts as a
    /// successful repetition.
    #[test]
    fn test_hard_on_new_card() {
        let reviewed_at = make_timestamp("2024-01-01T09:00:00.000");
        let result = review(Rating::Hard, &CardSchedule::initial(), reviewed_at);
        assert!(feq(result.ease_factor, 2.35));
        assert_eq!(result.interval_days, 0);
        assert_eq!(result.repetitions, 1);
        assert_eq!(result.next_review, None);
        check_invariants(&result);
    }

    /// Hard grows the interval slowly without resetting progress.
    #[test]
    fn test_hard_growth() {
        let reviewed_at = make_timestamp("2024-01-01T09:00:00.000");
        let current = CardSchedule {
            ease_factor: 2.5,
            interval_days: 10,
            repetitions: 3,
            last_reviewed: None,
            next_review: None,
        };
        let result = review(Rating::Hard, &current, reviewed_at);
        assert!(feq(result.ease_factor, 2.35));
        assert_eq!(result.interval_days, 12);
        assert_eq!(result.repetitions, 4);
        assert_eq!(result.next_review, Some(reviewed_at.plus_days(12)));
    }

    /// A lapse resets progress regardless of the prior state.
    #[test]
    fn test_again_resets_progress() {
        let reviewed_at = make_timestamp("2024-01-01T09:00:00.000");
        let priors = [
            CardSchedule::initial(),
            CardSchedule {
                ease_factor: 2.8,
                interval_days: 120,
                repetitions: 9,
                last_reviewed: None,
                next_review: Some(reviewed_at),
            },
        ];
        for prior in priors {
            let result = review(Rating::Again, &prior, reviewed_at);
            assert_eq!(result.interval_days, 0);
            assert_eq!(result.repetitions, 0);
            assert_eq!(result.next_review, None);
            assert_eq!(result.last_reviewed, Some(reviewed_at));
            check_invariants(&result);
        }
    }

    /// Easy on a new card: interval 4, ease 2.65, due four days out.
    #[test]
    fn test_easy_on_new_card() {
        let reviewed_at = make_timestamp("2024-01-01T09:00:00.000");
        let result = review(Rating::Easy, &CardSchedule::initial(), reviewed_at);
        assert!(feq(result.ease_factor, 2.65));
        assert_eq!(result.interval_days, 4);
        assert_eq!(result.repetitions, 1);
        assert_eq!(
            result.next_review,
            Some(make_timestamp("2024-01-05T09:00:00.000"))
        );
    }

    /// The ease factor never leaves [1.3, 3.0].
    #[test]
    fn test_ease_bounds() {
        let reviewed_at = make_timestamp("2024-01-01T09:00:00.000");
        let mut floor = CardSchedule {
            ease_factor: 1.3,
            ..CardSchedule::initial()
        };
        for _ in 0..5 {
            floor = review(Rating::Hard, &floor, reviewed_at);
            assert!(feq(floor.ease_factor, 1.3));
        }
        let mut ceiling = CardSchedule {
            ease_factor: 2.95,
            ..CardSchedule::initial()
        };
        for _ in 0..5 {
            ceiling = review(Rating::Easy, &ceiling, reviewed_at);
            assert!(ceiling.ease_factor <= 3.0);
        }
        assert!(feq(ceiling.ease_factor, 3.0));
    }

    /// Corrupted persisted state is clamped, never rejected.
    #[test]
    fn test_clamps_corrupted_input() {
        let reviewed_at = make_timestamp("2024-01-01T09:00:00.000");

        let too_high = CardSchedule {
            ease_factor: 9.9,
            ..CardSchedule::initial()
        };
        let result = review(Rating::Good, &too_high, reviewed_at);
        assert!(feq(result.ease_factor, 3.0));

        let too_low = CardSchedule {
            ease_factor: 0.5,
            ..CardSchedule::initial()
        };
        let result = review(Rating::Good, &too_low, reviewed_at);
        assert!(feq(result.ease_factor, 1.3));

        let negative_interval = CardSchedule {
            interval_days: -7,
            repetitions: 4,
            ..CardSchedule::initial()
        };
        let result = review(Rating::Good, &negative_interval, reviewed_at);
        check_invariants(&result);
        assert_eq!(result.interval_days, 0);
        assert_eq!(result.next_review, None);
    }

    /// A realistic history: two goods, a lapse, then recovery restarts the
    /// bootstrap sequence with the reduced ease.
    #[test]
    fn test_good_good_again_good() {
        let g = Rating::Good;
        check_sim(
            vec![g, g, Rating::Again, g],
            vec![
                Step {
                    ease: 2.5,
                    interval: 1,
                    repetitions: 1,
                },
                Step {
                    ease: 2.5,
                    interval: 6,
                    repetitions: 2,
                },
                Step {
                    ease: 2.3,
                    interval: 0,
                    repetitions: 0,
                },
                Step {
                    ease: 2.3,
                    interval: 1,
                    repetitions: 1,
                },
            ],
        );
    }
}
