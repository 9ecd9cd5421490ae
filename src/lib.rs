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

//! flashdeck-core: Scheduling core for the Flashdeck spaced repetition app.
//!
//! This library provides the algorithmic heart of the application as pure,
//! deterministic functions over values:
//! - The SM-2-derived review scheduler
//! - Study queue construction (due-first ordering and capped random
//!   sampling) and the in-session re-insertion policy for lapsed cards
//! - A pure session state machine with statistics
//!
//! Persistence, authentication, rendering and the web request cycle all live
//! in the surrounding application. The core consumes cards and timestamps,
//! and produces new schedules and ordered queues.

pub mod error;
pub mod queue;
pub mod rng;
pub mod session;
pub mod sm2;
pub mod stats;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use queue::{
    DEFAULT_SESSION_CAP, QueueConfig, QueueStrategy, again_reinsert_index, build_queue,
    draw_session_queue, filter_due, is_due, sort_by_due,
};
pub use rng::SessionRng;
pub use session::{ReviewRecord, Session, SessionStats, SessionSummary};
pub use sm2::review;
pub use stats::{DeckStats, deck_stats};
pub use types::card::{Card, CardId};
pub use types::rating::Rating;
pub use types::schedule::CardSchedule;
pub use types::timestamp::Timestamp;
