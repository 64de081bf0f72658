//! Review sessions over a collection of cards
//!
//! A session owns its queue and applies one rating at a time, so each
//! card's next state is always computed from the state before it.

use std::collections::{BTreeSet, VecDeque};

use chrono::{DateTime, Utc};

use super::algorithm::{update_card_at, SchedulerError};
use super::models::Card;

/// Cards due at `now`, oldest due first
pub fn due_cards_at(cards: &[Card], now: DateTime<Utc>) -> Vec<&Card> {
    let mut due: Vec<&Card> = cards.iter().filter(|c| c.is_due_at(now)).collect();
    due.sort_by(|a, b| a.next_review.cmp(&b.next_review));
    due
}

/// Unique tags across all cards
pub fn all_tags(cards: &[Card]) -> BTreeSet<String> {
    cards.iter().flat_map(|c| c.tags.iter().cloned()).collect()
}

/// Keep cards carrying every selected tag. An empty selection keeps all cards.
pub fn filter_by_tags<'a, I>(cards: I, selected: &BTreeSet<String>) -> Vec<&'a Card>
where
    I: IntoIterator<Item = &'a Card>,
{
    cards
        .into_iter()
        .filter(|card| selected.iter().all(|tag| card.has_tag(tag)))
        .collect()
}

/// A single pass over a queue of cards
#[derive(Debug, Clone)]
pub struct ReviewSession {
    queue: VecDeque<Card>,
    reviewed: Vec<Card>,
    total: usize,
}

impl ReviewSession {
    pub fn new(cards: Vec<Card>) -> Self {
        let total = cards.len();
        Self {
            queue: cards.into(),
            reviewed: Vec::with_capacity(total),
            total,
        }
    }

    /// Build a session from the cards due at `now` that carry every selected tag
    pub fn due_at(cards: &[Card], selected_tags: &BTreeSet<String>, now: DateTime<Utc>) -> Self {
        let due = due_cards_at(cards, now);
        let queue = filter_by_tags(due, selected_tags).into_iter().cloned().collect();
        Self::new(queue)
    }

    /// The card awaiting a rating
    pub fn current(&self) -> Option<&Card> {
        self.queue.front()
    }

    pub fn rate(&mut self, quality: i32) -> Result<Option<&Card>, SchedulerError> {
        self.rate_at(quality, Utc::now())
    }

    /// Rate the current card and move to the next one.
    ///
    /// Returns the updated card, or `None` once the queue is empty. An invalid
    /// quality leaves the session untouched.
    pub fn rate_at(&mut self, quality: i32, now: DateTime<Utc>) -> Result<Option<&Card>, SchedulerError> {
        let Some(card) = self.queue.front() else {
            return Ok(None);
        };

        let updated = update_card_at(card, quality, now)?;
        self.queue.pop_front();
        self.reviewed.push(updated);
        Ok(self.reviewed.last())
    }

    pub fn is_complete(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Percentage of the queue already rated, rounded to the nearest whole number
    pub fn progress_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.reviewed.len() as f64 / self.total as f64) * 100.0).round() as u32
    }

    /// End the session, returning the cards rated so far
    pub fn finish(self) -> Vec<Card> {
        self.reviewed
    }
}
