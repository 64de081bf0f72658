//! Flashcards and spaced repetition
//!
//! This module provides:
//! - Card records and their scheduling state
//! - SM-2 spaced repetition algorithm
//! - Review sessions over due cards
//! - Collection statistics
//! - JSON file storage for the command-line front end

pub mod algorithm;
pub mod models;
pub mod review;
pub mod stats;
pub mod storage;

pub use algorithm::{
    create_card, create_card_at, update_card, update_card_at, Rating, SchedulerError,
    MIN_EASE_FACTOR,
};
pub use models::*;
pub use review::ReviewSession;
pub use stats::{DueDay, ReviewStats};
pub use storage::{DeckStorage, DeckStorageError};
