//! Storage operations for flashcards
//!
//! Directory structure:
//! ```text
//! {data-dir}/
//! └── cards.json   # Array of all cards
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::algorithm::{update_card_at, SchedulerError};
use super::models::Card;

const CARDS_FILE: &str = "cards.json";

#[derive(Error, Debug)]
pub enum DeckStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Card not found: {0}")]
    CardNotFound(String),

    #[error("Card already exists: {0}")]
    DuplicateCard(String),

    #[error("Could not determine data directory")]
    DataDirNotFound,

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

pub type Result<T> = std::result::Result<T, DeckStorageError>;

/// JSON file backed card collection
pub struct DeckStorage {
    base_path: PathBuf,
}

impl DeckStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("spaced-flash"))
            .ok_or(DeckStorageError::DataDirNotFound)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn cards_path(&self) -> PathBuf {
        self.base_path.join(CARDS_FILE)
    }

    /// Create the data directory and an empty card file if missing
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;

        let cards_path = self.cards_path();
        if !cards_path.exists() {
            let empty: Vec<Card> = Vec::new();
            fs::write(&cards_path, serde_json::to_string_pretty(&empty)?)?;
            log::info!("Created card store at {:?}", cards_path);
        }

        Ok(())
    }

    /// List all cards
    pub fn list_cards(&self) -> Result<Vec<Card>> {
        let cards_path = self.cards_path();
        if !cards_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&cards_path)?;
        let cards: Vec<Card> = serde_json::from_str(&content)?;
        Ok(cards)
    }

    /// Overwrite the whole collection
    pub fn save_all(&self, cards: &[Card]) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        fs::write(self.cards_path(), serde_json::to_string_pretty(cards)?)?;
        log::debug!("Saved {} cards", cards.len());
        Ok(())
    }

    /// Get a specific card
    pub fn get_card(&self, card_id: &str) -> Result<Card> {
        self.list_cards()?
            .into_iter()
            .find(|c| c.id == card_id)
            .ok_or_else(|| DeckStorageError::CardNotFound(card_id.to_string()))
    }

    /// Add a new card, rejecting ids already in the collection
    pub fn insert_card(&self, card: Card) -> Result<Card> {
        let mut cards = self.list_cards()?;
        if cards.iter().any(|c| c.id == card.id) {
            return Err(DeckStorageError::DuplicateCard(card.id));
        }

        cards.push(card.clone());
        self.save_all(&cards)?;
        log::info!("Added card {}", card.id);

        Ok(card)
    }

    /// Replace the stored record with the same id
    pub fn replace_card(&self, card: &Card) -> Result<()> {
        let mut cards = self.list_cards()?;
        let pos = cards
            .iter()
            .position(|c| c.id == card.id)
            .ok_or_else(|| DeckStorageError::CardNotFound(card.id.clone()))?;

        cards[pos] = card.clone();
        self.save_all(&cards)
    }

    /// Replace every stored record that appears in `updated`.
    /// Cards deleted since the session started are skipped.
    pub fn replace_cards(&self, updated: &[Card]) -> Result<usize> {
        let mut cards = self.list_cards()?;
        let mut replaced = 0;

        for card in updated {
            match cards.iter_mut().find(|c| c.id == card.id) {
                Some(slot) => {
                    *slot = card.clone();
                    replaced += 1;
                }
                None => log::warn!("Skipping review for missing card {}", card.id),
            }
        }

        self.save_all(&cards)?;
        Ok(replaced)
    }

    /// Delete a card
    pub fn delete_card(&self, card_id: &str) -> Result<Card> {
        let mut cards = self.list_cards()?;
        let pos = cards
            .iter()
            .position(|c| c.id == card_id)
            .ok_or_else(|| DeckStorageError::CardNotFound(card_id.to_string()))?;

        let removed = cards.remove(pos);
        self.save_all(&cards)?;
        log::info!("Deleted card {}", card_id);

        Ok(removed)
    }

    /// Submit a review for a card and store the result
    pub fn submit_review(&self, card_id: &str, quality: i32) -> Result<Card> {
        self.submit_review_at(card_id, quality, Utc::now())
    }

    pub fn submit_review_at(&self, card_id: &str, quality: i32, now: DateTime<Utc>) -> Result<Card> {
        let card = self.get_card(card_id)?;
        let updated = update_card_at(&card, quality, now)?;
        self.replace_card(&updated)?;
        Ok(updated)
    }
}
