//! Aggregate statistics over a card collection. Read-only.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::models::{Card, CardPhase};

/// Statistics for a card collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_cards: usize,
    pub due_cards: usize,
    pub mastered_cards: usize,
    pub learning_cards: usize,
    pub mature_cards: usize,
    pub average_ease: f64,
    /// Mastered cards as a rounded percentage of all cards
    pub completion_rate: u32,
}

impl ReviewStats {
    pub fn from_cards_at(cards: &[Card], now: DateTime<Utc>, mastery_threshold_days: i32) -> Self {
        let mut stats = ReviewStats {
            total_cards: cards.len(),
            ..Default::default()
        };

        let mut ease_sum = 0.0;
        for card in cards {
            match card.phase() {
                CardPhase::Learning => stats.learning_cards += 1,
                CardPhase::Mature => stats.mature_cards += 1,
            }
            if card.is_due_at(now) {
                stats.due_cards += 1;
            }
            if card.is_mastered_after(mastery_threshold_days) {
                stats.mastered_cards += 1;
            }
            ease_sum += card.ease_factor;
        }

        if stats.total_cards > 0 {
            stats.average_ease = ease_sum / stats.total_cards as f64;
            stats.completion_rate =
                ((stats.mastered_cards as f64 / stats.total_cards as f64) * 100.0).round() as u32;
        }

        stats
    }
}

/// Number of cards becoming due on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDay {
    pub date: NaiveDate,
    /// Short weekday name, e.g. "Mon"
    pub day: String,
    pub count: usize,
}

/// Count cards coming due on each of the next `days` days, today first.
///
/// Cards already overdue are not counted; they belong to the due pile.
pub fn due_forecast_at(cards: &[Card], now: DateTime<Utc>, days: u32) -> Vec<DueDay> {
    let today = now.date_naive();
    let mut forecast: Vec<DueDay> = (0..days)
        .map(|offset| {
            let date = today + Duration::days(offset as i64);
            DueDay {
                date,
                day: date.weekday().to_string(),
                count: 0,
            }
        })
        .collect();

    for card in cards.iter().filter(|c| c.next_review >= now) {
        let offset = (card.next_review.date_naive() - today).num_days();
        if let Some(slot) = usize::try_from(offset).ok().and_then(|i| forecast.get_mut(i)) {
            slot.count += 1;
        }
    }

    forecast
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::BTreeSet;

    fn now() -> DateTime<Utc> {
        // A Monday
        Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap()
    }

    fn card(interval: i32, repetitions: i32, ease_factor: f64, next_review: DateTime<Utc>) -> Card {
        Card {
            id: format!("{}-{}", interval, repetitions),
            front: "Q".to_string(),
            back: "A".to_string(),
            interval,
            repetitions,
            ease_factor,
            next_review,
            tags: BTreeSet::new(),
        }
    }

    #[test]
    fn test_stats_empty_collection() {
        let stats = ReviewStats::from_cards_at(&[], now(), 30);
        assert_eq!(stats, ReviewStats::default());
    }

    #[test]
    fn test_stats_counts() {
        let cards = vec![
            card(1, 0, 2.5, now()),
            card(6, 2, 2.4, now() + Duration::days(6)),
            card(45, 5, 2.1, now() - Duration::hours(1)),
            card(31, 4, 1.8, now() + Duration::days(31)),
        ];

        let stats = ReviewStats::from_cards_at(&cards, now(), 30);

        assert_eq!(stats.total_cards, 4);
        assert_eq!(stats.due_cards, 2);
        assert_eq!(stats.mastered_cards, 2);
        assert_eq!(stats.learning_cards, 2);
        assert_eq!(stats.mature_cards, 2);
        assert!((stats.average_ease - 2.2).abs() < 1e-9);
        assert_eq!(stats.completion_rate, 50);
    }

    #[test]
    fn test_completion_rate_rounds() {
        let cards = vec![
            card(40, 4, 2.5, now()),
            card(1, 0, 2.5, now()),
            card(1, 0, 2.5, now()),
        ];
        let stats = ReviewStats::from_cards_at(&cards, now(), 30);
        assert_eq!(stats.completion_rate, 33);
    }

    #[test]
    fn test_forecast_buckets_by_day() {
        let cards = vec![
            card(1, 1, 2.5, now() + Duration::hours(2)),
            card(1, 1, 2.5, now() + Duration::days(1)),
            card(6, 2, 2.5, now() + Duration::days(6)),
            card(15, 3, 2.5, now() + Duration::days(7)),
            card(1, 0, 2.5, now() - Duration::days(1)),
        ];

        let forecast = due_forecast_at(&cards, now(), 7);

        assert_eq!(forecast.len(), 7);
        assert_eq!(forecast[0].day, "Mon");
        assert_eq!(forecast[0].date, now().date_naive());
        let counts: Vec<usize> = forecast.iter().map(|d| d.count).collect();
        assert_eq!(counts, vec![1, 1, 0, 0, 0, 0, 1]);
    }
}
