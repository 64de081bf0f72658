//! SM-2 Spaced Repetition Algorithm
//!
//! Implementation of the SuperMemo 2 algorithm for calculating
//! review intervals based on self-reported recall quality.
//!
//! Quality ratings (0-5):
//! - 0: Complete blackout, no recall
//! - 1: Incorrect, but upon seeing answer, remembered
//! - 2: Incorrect, but answer seemed easy to recall
//! - 3: Correct response with serious difficulty
//! - 4: Correct response after hesitation
//! - 5: Perfect response with no hesitation
//!
//! Every time-dependent function has an `_at` variant that takes the
//! current time explicitly, so schedules can be computed deterministically.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use super::models::{Card, DEFAULT_EASE_FACTOR, DEFAULT_INTERVAL};

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Lowest accepted quality rating
pub const MIN_QUALITY: i32 = 0;

/// Highest accepted quality rating
pub const MAX_QUALITY: i32 = 5;

/// Ratings at or above this value count as a successful recall
const PASSING_QUALITY: i32 = 3;

/// Interval after the second consecutive success
const SECOND_INTERVAL: i32 = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Quality must be between 0 and 5, got {0}")]
    InvalidQuality(i32),
}

/// Result of calculating the next review
#[derive(Debug, Clone, PartialEq)]
struct ReviewResult {
    interval: i32,
    repetitions: i32,
    ease_factor: f64,
}

/// Initialize a new card for spaced repetition, due immediately
pub fn create_card(id: String, front: String, back: String, tags: BTreeSet<String>) -> Card {
    create_card_at(id, front, back, tags, Utc::now())
}

pub fn create_card_at(
    id: String,
    front: String,
    back: String,
    tags: BTreeSet<String>,
    now: DateTime<Utc>,
) -> Card {
    Card {
        id,
        front,
        back,
        interval: DEFAULT_INTERVAL,
        repetitions: 0,
        ease_factor: DEFAULT_EASE_FACTOR,
        next_review: now,
        tags,
    }
}

/// Reject quality ratings outside 0..=5
pub fn validate_quality(quality: i32) -> Result<i32, SchedulerError> {
    if (MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
        Ok(quality)
    } else {
        Err(SchedulerError::InvalidQuality(quality))
    }
}

/// Calculate the next interval, repetition count and ease factor.
///
/// `quality` must already be validated.
fn calculate_next_review(card: &Card, quality: i32) -> ReviewResult {
    if quality < PASSING_QUALITY {
        // Failure resets the streak; ease factor is left alone
        return ReviewResult {
            interval: 1,
            repetitions: 0,
            ease_factor: card.ease_factor,
        };
    }

    let repetitions = card.repetitions + 1;
    let interval = match repetitions {
        1 => 1,
        2 => SECOND_INTERVAL,
        _ => (card.interval as f64 * card.ease_factor).round() as i32,
    };

    // EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))
    let miss = (MAX_QUALITY - quality) as f64;
    let ease_factor = (card.ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR);

    ReviewResult {
        interval,
        repetitions,
        ease_factor,
    }
}

/// Add whole days to `now`, keeping the time of day
fn due_after(now: DateTime<Utc>, interval: i32) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(interval as i64))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Apply a review to a card and return its next state
pub fn update_card(card: &Card, quality: i32) -> Result<Card, SchedulerError> {
    update_card_at(card, quality, Utc::now())
}

pub fn update_card_at(card: &Card, quality: i32, now: DateTime<Utc>) -> Result<Card, SchedulerError> {
    let quality = validate_quality(quality)?;

    let ReviewResult {
        interval,
        repetitions,
        ease_factor,
    } = calculate_next_review(card, quality);

    log::debug!(
        "Scheduled card {} with quality {}: interval {} -> {}, repetitions {} -> {}, ease {:.2} -> {:.2}",
        card.id,
        quality,
        card.interval,
        interval,
        card.repetitions,
        repetitions,
        card.ease_factor,
        ease_factor
    );

    Ok(Card {
        interval,
        repetitions,
        ease_factor,
        next_review: due_after(now, interval),
        ..card.clone()
    })
}

/// The three review buttons offered by the study screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Forgot,
    Medium,
    Easy,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown rating '{0}' (expected forgot, medium or easy)")]
pub struct ParseRatingError(String);

impl Rating {
    pub const ALL: [Rating; 3] = [Rating::Forgot, Rating::Medium, Rating::Easy];

    /// SM-2 quality this button submits
    pub fn quality(self) -> i32 {
        match self {
            Rating::Forgot => 1,
            Rating::Medium => 3,
            Rating::Easy => 5,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::Forgot => "forgot",
            Rating::Medium => "medium",
            Rating::Easy => "easy",
        };
        f.write_str(label)
    }
}

impl FromStr for Rating {
    type Err = ParseRatingError;

    /// Accepts the button names and the keyboard shortcuts 1, 2, 3
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "forgot" | "1" => Ok(Rating::Forgot),
            "medium" | "2" => Ok(Rating::Medium),
            "easy" | "3" => Ok(Rating::Easy),
            other => Err(ParseRatingError(other.to_string())),
        }
    }
}

/// Intervals each rating would give, in `Rating::ALL` order.
/// Used to show users what each button does before they press it.
pub fn preview_intervals(card: &Card) -> [i32; 3] {
    Rating::ALL.map(|rating| calculate_next_review(card, rating.quality()).interval)
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: i32) -> String {
    if days <= 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, 14, 45, 30).unwrap()
    }

    fn new_card() -> Card {
        let tags = ["geo", "capitals"].iter().map(|t| t.to_string()).collect();
        create_card_at(
            "card-1".to_string(),
            "What is the capital of France?".to_string(),
            "Paris".to_string(),
            tags,
            fixed_now(),
        )
    }

    fn card_with(repetitions: i32, interval: i32, ease_factor: f64) -> Card {
        Card {
            repetitions,
            interval,
            ease_factor,
            ..new_card()
        }
    }

    #[test]
    fn test_create_card_defaults() {
        let card = create_card("x".to_string(), "Q".to_string(), "A".to_string(), BTreeSet::new());

        assert_eq!(card.id, "x");
        assert_eq!(card.front, "Q");
        assert_eq!(card.back, "A");
        assert_eq!(card.interval, 1);
        assert_eq!(card.repetitions, 0);
        assert_eq!(card.ease_factor, 2.5);
        assert!((Utc::now() - card.next_review).num_seconds().abs() < 5);
    }

    #[test]
    fn test_create_card_accepts_empty_text() {
        let card = create_card_at(String::new(), String::new(), String::new(), BTreeSet::new(), fixed_now());
        assert_eq!(card.front, "");
        assert_eq!(card.next_review, fixed_now());
    }

    #[test]
    fn test_rejects_out_of_range_quality() {
        let card = card_with(4, 20, 2.1);
        let before = card.clone();

        for quality in [-100, -1, 6, 7, i32::MAX, i32::MIN] {
            let err = update_card_at(&card, quality, fixed_now()).unwrap_err();
            assert_eq!(err, SchedulerError::InvalidQuality(quality));
        }
        assert_eq!(card, before);
    }

    #[test]
    fn test_error_message_names_value() {
        let err = update_card(&new_card(), 9).unwrap_err();
        assert_eq!(err.to_string(), "Quality must be between 0 and 5, got 9");
    }

    #[test]
    fn test_failure_resets_streak_and_keeps_ease() {
        for quality in 0..3 {
            let card = card_with(7, 45, 1.87);
            let result = update_card_at(&card, quality, fixed_now()).unwrap();

            assert_eq!(result.repetitions, 0);
            assert_eq!(result.interval, 1);
            assert_eq!(result.ease_factor, 1.87);
            assert_eq!(result.next_review, fixed_now() + Duration::days(1));
        }
    }

    #[test]
    fn test_first_success_interval_one() {
        let result = update_card_at(&new_card(), 3, fixed_now()).unwrap();

        assert_eq!(result.repetitions, 1);
        assert_eq!(result.interval, 1);
    }

    #[test]
    fn test_second_success_interval_six() {
        let card = card_with(1, 1, 2.5);
        let result = update_card_at(&card, 4, fixed_now()).unwrap();

        assert_eq!(result.repetitions, 2);
        assert_eq!(result.interval, 6);
        assert_eq!(result.next_review, fixed_now() + Duration::days(6));
    }

    #[test]
    fn test_third_success_multiplies_by_ease() {
        let card = card_with(2, 6, 2.5);
        let result = update_card_at(&card, 4, fixed_now()).unwrap();

        // 6 * 2.5 = 15
        assert_eq!(result.repetitions, 3);
        assert_eq!(result.interval, 15);
        assert!((result.ease_factor - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_mature_interval_uses_previous_ease() {
        // 10 * 1.7 = 17 even though ease rises to 1.8 with quality 5
        let card = card_with(5, 10, 1.7);
        let result = update_card_at(&card, 5, fixed_now()).unwrap();

        assert_eq!(result.interval, 17);
        assert!((result.ease_factor - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_mature_interval_rounds_to_nearest() {
        // 15 * 2.36 = 35.4
        let card = card_with(3, 15, 2.36);
        assert_eq!(update_card_at(&card, 4, fixed_now()).unwrap().interval, 35);

        // 16 * 2.22 = 35.52
        let card = card_with(3, 16, 2.22);
        assert_eq!(update_card_at(&card, 4, fixed_now()).unwrap().interval, 36);
    }

    #[test]
    fn test_ease_factor_deltas_by_quality() {
        let card = card_with(3, 15, 2.5);

        let q3 = update_card_at(&card, 3, fixed_now()).unwrap();
        let q4 = update_card_at(&card, 4, fixed_now()).unwrap();
        let q5 = update_card_at(&card, 5, fixed_now()).unwrap();

        assert!((q3.ease_factor - 2.36).abs() < 1e-9);
        assert!((q4.ease_factor - 2.5).abs() < 1e-9);
        assert!((q5.ease_factor - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_ease_factor_floor_clamps() {
        let card = card_with(4, 10, 1.4);
        let result = update_card_at(&card, 3, fixed_now()).unwrap();

        // 1.4 - 0.14 = 1.26, clamped
        assert_eq!(result.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_repeated_hard_reviews_never_drop_below_floor() {
        let mut card = new_card();
        for _ in 0..20 {
            card = update_card_at(&card, 3, fixed_now()).unwrap();
            assert!(card.ease_factor >= MIN_EASE_FACTOR);
        }
        assert_eq!(card.ease_factor, MIN_EASE_FACTOR);
        assert_eq!(card.repetitions, 20);
    }

    #[test]
    fn test_update_does_not_mutate_input() {
        let card = card_with(2, 6, 2.5);
        let before = card.clone();

        let _ = update_card_at(&card, 5, fixed_now()).unwrap();
        let _ = update_card_at(&card, 0, fixed_now()).unwrap();

        assert_eq!(card, before);
    }

    #[test]
    fn test_identity_fields_copied_for_every_quality() {
        let card = card_with(3, 15, 2.2);

        for quality in MIN_QUALITY..=MAX_QUALITY {
            let result = update_card_at(&card, quality, fixed_now()).unwrap();
            assert_eq!(result.id, card.id);
            assert_eq!(result.front, card.front);
            assert_eq!(result.back, card.back);
            assert_eq!(result.tags, card.tags);
        }
    }

    #[test]
    fn test_next_review_preserves_time_of_day() {
        let card = card_with(2, 6, 2.5);
        let result = update_card_at(&card, 4, fixed_now()).unwrap();

        assert_eq!(result.next_review, Utc.with_ymd_and_hms(2024, 5, 25, 14, 45, 30).unwrap());
    }

    #[test]
    fn test_full_learning_sequence() {
        let mut card = new_card();
        let mut intervals = Vec::new();
        for _ in 0..4 {
            card = update_card_at(&card, 5, fixed_now()).unwrap();
            intervals.push(card.interval);
        }
        // 1, 6, round(6 * 2.7), round(16 * 2.8)
        assert_eq!(intervals, vec![1, 6, 16, 45]);
        assert!((card.ease_factor - 2.9).abs() < 1e-9);

        card = update_card_at(&card, 1, fixed_now()).unwrap();
        assert_eq!(card.interval, 1);
        assert_eq!(card.repetitions, 0);
        assert!((card.ease_factor - 2.9).abs() < 1e-9);
    }

    #[test]
    fn test_rating_quality_mapping() {
        assert_eq!(Rating::Forgot.quality(), 1);
        assert_eq!(Rating::Medium.quality(), 3);
        assert_eq!(Rating::Easy.quality(), 5);
    }

    #[test]
    fn test_rating_from_str() {
        assert_eq!("forgot".parse::<Rating>().unwrap(), Rating::Forgot);
        assert_eq!(" Medium ".parse::<Rating>().unwrap(), Rating::Medium);
        assert_eq!("3".parse::<Rating>().unwrap(), Rating::Easy);
        assert!("hard".parse::<Rating>().is_err());
    }

    #[test]
    fn test_preview_intervals() {
        assert_eq!(preview_intervals(&new_card()), [1, 1, 1]);
        assert_eq!(preview_intervals(&card_with(1, 1, 2.5)), [1, 6, 6]);
        assert_eq!(preview_intervals(&card_with(2, 6, 2.5)), [1, 15, 15]);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(5), "5d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(90), "3mo");
        assert_eq!(format_interval(365), "1y");
        assert_eq!(format_interval(730), "2y");
    }
}
