//! Data models for the flashcard system

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Interval assigned to a freshly created card
pub const DEFAULT_INTERVAL: i32 = 1;

/// Ease factor assigned to a freshly created card
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Cards with an interval above this many days count as mastered
pub const DEFAULT_MASTERY_THRESHOLD_DAYS: i32 = 30;

/// Repetition count at which a card leaves the fixed learning table
const MATURE_REPETITIONS: i32 = 3;

/// A flashcard together with its spaced repetition state.
///
/// Cards are treated as values: scheduling never mutates a card in place,
/// it returns a new one that replaces the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub front: String,
    pub back: String,
    /// Days until the card is next due
    pub interval: i32,
    /// Consecutive successful reviews since the last failure
    pub repetitions: i32,
    /// SM-2 ease factor (default 2.5, never below 1.3 after a success)
    pub ease_factor: f64,
    /// When the card is due for review
    pub next_review: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

/// Implicit phase of a card, derived from its repetition count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardPhase {
    /// Repetitions 0-2, interval comes from a fixed table
    Learning,
    /// Repetitions 3+, interval grows by the ease factor
    Mature,
}

impl Card {
    pub fn phase(&self) -> CardPhase {
        if self.repetitions < MATURE_REPETITIONS {
            CardPhase::Learning
        } else {
            CardPhase::Mature
        }
    }

    /// Check if the card is due for review
    pub fn is_due(&self) -> bool {
        self.is_due_at(Utc::now())
    }

    pub fn is_due_at(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }

    pub fn is_mastered(&self) -> bool {
        self.is_mastered_after(DEFAULT_MASTERY_THRESHOLD_DAYS)
    }

    pub fn is_mastered_after(&self, threshold_days: i32) -> bool {
        self.interval > threshold_days
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}
