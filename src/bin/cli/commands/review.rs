use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use chrono::Utc;

use spaced_flash_lib::flashcards::algorithm::format_interval;
use spaced_flash_lib::flashcards::{Rating, ReviewSession};

use crate::app::{tag_selection, App};
use crate::render::terminal::{card_json, paint, render_text, Color};
use crate::OutputFormat;

/// What the user typed at the rating prompt
enum Answer {
    Rate(Rating),
    Quit,
}

fn parse_answer(input: &str) -> Option<Answer> {
    match input.trim().to_lowercase().as_str() {
        "q" | "quit" => Some(Answer::Quit),
        other => other.parse::<Rating>().ok().map(Answer::Rate),
    }
}

pub fn run(
    app: &App,
    tags: &[String],
    fixed_rating: Option<Rating>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let cards = app.list_cards()?;
    let mut session = ReviewSession::due_at(&cards, &tag_selection(tags), Utc::now());

    if session.is_complete() {
        match format {
            OutputFormat::Json => println!("[]"),
            OutputFormat::Plain => {
                println!("You're all caught up! There are no cards due for review right now.")
            }
        }
        return Ok(());
    }

    match fixed_rating {
        Some(rating) => {
            while !session.is_complete() {
                session.rate(rating.quality())?;
            }
        }
        None => prompt_loop(&mut session, use_color)?,
    }

    let reviewed = session.finish();
    let saved = app.save_reviewed(&reviewed)?;
    log::info!("Review session finished: {} rated, {} saved", reviewed.len(), saved);

    match format {
        OutputFormat::Json => {
            let now = Utc::now();
            let output: Vec<serde_json::Value> = reviewed.iter().map(|c| card_json(c, now)).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("\nReviewed {} cards. Keep up the good work!", reviewed.len());
            for card in &reviewed {
                println!("  {:<40} next in {}", card.front.lines().next().unwrap_or(""), format_interval(card.interval));
            }
        }
    }

    Ok(())
}

/// Show each card, wait for the answer reveal, then ask for a rating
fn prompt_loop(session: &mut ReviewSession, use_color: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    while let Some(card) = session.current() {
        let position = session.total() - session.remaining() + 1;
        println!("\n{} ({}%)",
            paint(&format!("Card {} of {}", position, session.total()), Color::BOLD, use_color),
            session.progress_percent());
        println!("{}", render_text(&card.front, "  "));

        print!("{}", paint("[Enter] show answer ", Color::GRAY, use_color));
        stdout.flush().context("Failed to flush stdout")?;
        if lines.next().transpose().context("Failed to read input")?.is_none() {
            return Ok(());
        }
        println!("{}", render_text(&card.back, "  "));

        let answer = loop {
            print!("Rate: [1] forgot  [2] medium  [3] easy  [q] quit > ");
            stdout.flush().context("Failed to flush stdout")?;

            let Some(line) = lines.next().transpose().context("Failed to read input")? else {
                break Answer::Quit;
            };
            match parse_answer(&line) {
                Some(answer) => break answer,
                None => println!("{}", paint("Please answer 1, 2, 3 or q", Color::YELLOW, use_color)),
            }
        };

        match answer {
            Answer::Quit => return Ok(()),
            Answer::Rate(rating) => {
                if let Some(updated) = session.rate(rating.quality())? {
                    println!("  next review in {}", format_interval(updated.interval));
                }
            }
        }
    }

    Ok(())
}
