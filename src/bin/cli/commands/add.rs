use anyhow::Result;
use uuid::Uuid;

use spaced_flash_lib::flashcards::create_card;

use crate::app::{parse_tags, App};
use crate::render::terminal::{card_json, format_tags, paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    front: String,
    back: String,
    tags: Option<&str>,
    id: Option<String>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let card = app.insert_card(create_card(id, front, back, parse_tags(tags)))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&card_json(&card, card.next_review))?);
        }
        OutputFormat::Plain => {
            println!("{} \"{}\"", paint("Added card", Color::GREEN, use_color), card.front);
            if !card.tags.is_empty() {
                println!("  Tags: {}", format_tags(&card));
            }
            println!("  ID: {}", card.id);
        }
    }

    Ok(())
}
