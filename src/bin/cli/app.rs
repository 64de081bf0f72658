use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use spaced_flash_lib::flashcards::{Card, DeckStorage, ReviewStats};
use spaced_flash_lib::Config;

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub storage: DeckStorage,
}

impl App {
    /// Load config and open the card store.
    ///
    /// `--data-dir` wins over the config file, which wins over the platform default.
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Config::default_path().context("Failed to get config directory")?,
        };
        let config = Config::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        let data_dir = match data_dir.or_else(|| config.data_dir.clone()) {
            Some(dir) => dir,
            None => DeckStorage::default_data_dir().context("Failed to get data directory")?,
        };
        log::debug!("Using card store at {:?}", data_dir);

        let storage = DeckStorage::new(data_dir);
        storage.init().context("Failed to initialize card storage")?;

        Ok(Self { config, storage })
    }

    /// List all cards
    pub fn list_cards(&self) -> Result<Vec<Card>> {
        self.storage.list_cards().context("Failed to list cards")
    }

    /// Get a card by id
    pub fn get_card(&self, id: &str) -> Result<Card> {
        self.storage.get_card(id).with_context(|| format!("No card with id '{}'", id))
    }

    /// Store a newly created card
    pub fn insert_card(&self, card: Card) -> Result<Card> {
        self.storage.insert_card(card).context("Failed to add card")
    }

    /// Rate a card and store the result
    pub fn submit_review(&self, id: &str, quality: i32) -> Result<Card> {
        self.storage
            .submit_review(id, quality)
            .with_context(|| format!("Failed to rate card '{}'", id))
    }

    /// Store the results of a review session
    pub fn save_reviewed(&self, reviewed: &[Card]) -> Result<usize> {
        self.storage.replace_cards(reviewed).context("Failed to save reviewed cards")
    }

    /// Delete a card
    pub fn delete_card(&self, id: &str) -> Result<Card> {
        self.storage.delete_card(id).with_context(|| format!("Failed to delete card '{}'", id))
    }

    /// Collection statistics using the configured mastery threshold
    pub fn stats(&self, cards: &[Card]) -> ReviewStats {
        ReviewStats::from_cards_at(cards, chrono::Utc::now(), self.config.mastery_threshold_days)
    }
}

/// Parse a comma-separated tag list
pub fn parse_tags(tags: Option<&str>) -> BTreeSet<String> {
    tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Normalize repeated `--tag` flags
pub fn tag_selection(tags: &[String]) -> BTreeSet<String> {
    tags.iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
