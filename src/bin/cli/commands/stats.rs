use anyhow::Result;
use chrono::Utc;

use spaced_flash_lib::flashcards::stats::due_forecast_at;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let cards = app.list_cards()?;
    let stats = app.stats(&cards);
    let forecast = due_forecast_at(&cards, Utc::now(), app.config.forecast_days);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "stats": stats,
                "forecast": forecast,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let due_color = if stats.due_cards > 0 { Color::RED } else { Color::GREEN };

            println!("Total cards:     {}", stats.total_cards);
            println!("Due now:         {}", paint(&stats.due_cards.to_string(), due_color, use_color));
            println!("Mastered:        {} ({}%)", stats.mastered_cards, stats.completion_rate);
            println!("Learning:        {}", stats.learning_cards);
            println!("Mature:          {}", stats.mature_cards);
            println!("Average ease:    {:.2}", stats.average_ease);

            if forecast.is_empty() {
                return Ok(());
            }

            let max_count = forecast.iter().map(|d| d.count).max().unwrap_or(0).max(1);
            println!("\nUpcoming reviews");
            for day in &forecast {
                let bar = "\u{2588}".repeat(day.count * 30 / max_count);
                println!("  {} {} {:>4} {}",
                    day.day, day.date.format("%m-%d"), day.count, paint(&bar, Color::BLUE, use_color));
            }
        }
    }

    Ok(())
}
