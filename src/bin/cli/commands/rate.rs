use anyhow::Result;
use chrono::Utc;

use spaced_flash_lib::flashcards::algorithm::format_interval;

use crate::app::App;
use crate::render::terminal::{card_json, paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, id: &str, quality: i32, format: &OutputFormat, use_color: bool) -> Result<()> {
    let card = app.submit_review(id, quality)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card_json(&card, Utc::now()))?);
        }
        OutputFormat::Plain => {
            let color = if quality >= 3 { Color::GREEN } else { Color::RED };
            println!("{} \"{}\" with quality {}", paint("Rated", color, use_color), card.front, quality);
            println!("  Next review: {} ({})",
                card.next_review.format("%Y-%m-%d"), format_interval(card.interval));
            println!("  Repetitions: {}  Ease: {:.2}", card.repetitions, card.ease_factor);
        }
    }

    Ok(())
}
