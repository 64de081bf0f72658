use anyhow::Result;
use chrono::Utc;

use spaced_flash_lib::flashcards::algorithm::{format_interval, preview_intervals};
use spaced_flash_lib::flashcards::Rating;

use crate::app::App;
use crate::render::terminal::{card_json, due_label, format_tags, paint, phase_label, render_text, Color};
use crate::OutputFormat;

pub fn run(app: &App, id: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let card = app.get_card(id)?;
    let now = Utc::now();
    let preview = preview_intervals(&card);

    match format {
        OutputFormat::Json => {
            let mut output = card_json(&card, now);
            output["preview"] = Rating::ALL
                .iter()
                .zip(preview)
                .map(|(rating, days)| (rating.to_string(), serde_json::json!(days)))
                .collect::<serde_json::Map<_, _>>()
                .into();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint("Front", Color::BOLD, use_color));
            println!("{}", render_text(&card.front, "  "));
            println!();
            println!("{}", paint("Back", Color::BOLD, use_color));
            println!("{}", render_text(&card.back, "  "));
            println!();

            println!("ID:          {}", card.id);
            if !card.tags.is_empty() {
                println!("Tags:        {}", format_tags(&card));
            }
            println!("Phase:       {}", phase_label(&card));
            println!("Interval:    {}", format_interval(card.interval));
            println!("Repetitions: {}", card.repetitions);
            println!("Ease:        {:.2}", card.ease_factor);
            println!("Next review: {} ({})", card.next_review.format("%Y-%m-%d %H:%M"), due_label(&card, now));

            let preview_line = Rating::ALL
                .iter()
                .zip(preview)
                .map(|(rating, days)| format!("{} {}", rating, format_interval(days)))
                .collect::<Vec<_>>()
                .join(" \u{00b7} ");
            println!("Preview:     {}", paint(&preview_line, Color::GRAY, use_color));
        }
    }

    Ok(())
}
