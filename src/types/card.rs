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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::schedule::CardSchedule;

/// A card's storage identifier, assigned by the persistence layer.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A flashcard, as the scheduling core sees it: identity, the two sides, and
/// the embedded scheduling state. Everything else about a card (markdown
/// rendering, timestamps, ownership) belongs to the application layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub deck_id: String,
    pub front: String,
    pub back: String,
    pub schedule: CardSchedule,
}

impl Card {
    /// A card that has never been reviewed.
    pub fn new(
        id: impl Into<String>,
        deck_id: impl Into<String>,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Self {
        Self {
            id: CardId::new(id),
            deck_id: deck_id.into(),
            front: front.into(),
            back: back.into(),
            schedule: CardSchedule::initial(),
        }
    }
}
