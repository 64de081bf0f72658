use anyhow::Result;
use chrono::Utc;

use spaced_flash_lib::flashcards::review::{due_cards_at, filter_by_tags};

use crate::app::{tag_selection, App};
use crate::render::terminal::{card_json, due_label, format_tags, paint, truncate, Color};
use crate::OutputFormat;

pub fn run(app: &App, tags: &[String], due_only: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let cards = app.list_cards()?;
    let now = Utc::now();

    let pool = if due_only {
        due_cards_at(&cards, now)
    } else {
        cards.iter().collect()
    };
    let selected = filter_by_tags(pool, &tag_selection(tags));

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = selected.iter().map(|c| card_json(c, now)).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if selected.is_empty() {
                println!("No cards{}.", if due_only { " due" } else { "" });
                return Ok(());
            }

            let id_width = selected.iter().map(|c| c.id.chars().count()).max().unwrap_or(2).clamp(2, 36);
            let front_width = 40;
            let due_width = 10;

            println!("{:<iw$} {:<fw$} {:<dw$} {:>8} {:>5} Tags",
                "ID", "Front", "Due", "Interval", "Ease",
                iw = id_width, fw = front_width, dw = due_width);
            println!("{} {} {} {} {} {}",
                "\u{2500}".repeat(id_width),
                "\u{2500}".repeat(front_width),
                "\u{2500}".repeat(due_width),
                "\u{2500}".repeat(8),
                "\u{2500}".repeat(5),
                "\u{2500}".repeat(10));

            for card in &selected {
                let due = due_label(card, now);
                let due = if card.is_due_at(now) {
                    paint(&format!("{:<dw$}", due, dw = due_width), Color::RED, use_color)
                } else {
                    format!("{:<dw$}", due, dw = due_width)
                };

                println!("{:<iw$} {:<fw$} {} {:>7}d {:>5.2} {}",
                    truncate(&card.id, id_width), truncate(&card.front, front_width), due,
                    card.interval, card.ease_factor, format_tags(card),
                    iw = id_width, fw = front_width);
            }

            println!("\n{} cards total", selected.len());
        }
    }

    Ok(())
}
