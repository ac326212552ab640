use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Identifier of a question, or of an option, row or column inside a question.
///
/// Ids are only ever minted by an [`IdGenerator`], so two items created in
/// the same burst of edits never share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    /// Wrap a raw id, e.g. one received from the persistence API.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Identifier of a question type in the lookup service.
///
/// `0` means "no type selected yet".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionTypeId(u32);

impl QuestionTypeId {
    /// The type id of a question whose type has not been chosen.
    pub const UNSET: Self = Self(0);

    /// Wrap a raw type id.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Check whether no type has been chosen.
    pub const fn is_unset(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for QuestionTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a persisted survey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyId(u64);

impl SurveyId {
    /// Wrap a raw survey id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurveyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic source of fresh [`ItemId`]s.
///
/// One generator is shared by every question, option, row and column of an
/// editing session. Ids start at 1 and are never handed out twice.
#[derive(Debug)]
pub struct IdGenerator {
    next: AtomicU64,
}

impl IdGenerator {
    /// Create a generator whose first id is 1.
    pub const fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }

    /// Create a generator that only hands out ids greater than every id in `existing`.
    ///
    /// Used when a survey is loaded from the API so newly added items cannot
    /// collide with persisted ones.
    pub fn starting_after(existing: impl IntoIterator<Item = ItemId>) -> Self {
        let generator = Self::new();
        for id in existing {
            generator.observe(id);
        }
        generator
    }

    /// Mint a fresh id.
    pub fn next_id(&self) -> ItemId {
        ItemId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Make sure `id` will never be minted by this generator.
    pub fn observe(&self, id: ItemId) {
        self.next.fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
