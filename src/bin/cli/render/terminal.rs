use chrono::{DateTime, Utc};
use spaced_flash_lib::flashcards::algorithm::format_interval;
use spaced_flash_lib::flashcards::{Card, CardPhase};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap text in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Cut text to `width` characters, ending in "..." when shortened
pub fn truncate(text: &str, width: usize) -> String {
    let single_line = text.lines().next().unwrap_or("");
    if single_line.chars().count() <= width && !text.contains('\n') {
        return single_line.to_string();
    }
    let kept: String = single_line.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

pub fn format_tags(card: &Card) -> String {
    card.tags
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// "due" for cards due now, otherwise the time until due
pub fn due_label(card: &Card, now: DateTime<Utc>) -> String {
    if card.is_due_at(now) {
        "due".to_string()
    } else {
        let days = (card.next_review - now).num_days();
        if days == 0 {
            "today".to_string()
        } else {
            format!("in {}", format_interval(days as i32))
        }
    }
}

pub fn phase_label(card: &Card) -> &'static str {
    match card.phase() {
        CardPhase::Learning => "learning",
        CardPhase::Mature => "mature",
    }
}

/// JSON view of a card for `--format json`
pub fn card_json(card: &Card, now: DateTime<Utc>) -> serde_json::Value {
    serde_json::json!({
        "id": card.id,
        "front": card.front,
        "back": card.back,
        "interval": card.interval,
        "repetitions": card.repetitions,
        "easeFactor": card.ease_factor,
        "nextReview": card.next_review.to_rfc3339(),
        "tags": card.tags,
        "phase": phase_label(card),
        "isDue": card.is_due_at(now),
    })
}

/// Indent card text for display, wrapping long lines
pub fn render_text(text: &str, prefix: &str) -> String {
    wrap_lines(text, prefix, 80).join("\n")
}

/// Simple word-wrapping for terminal output
fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_line.chars().count() + 1 + word.chars().count() <= effective_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                lines.push(format!("{}{}", prefix, current_line));
                current_line = word.to_string();
            }
        }
        if !current_line.is_empty() {
            lines.push(format!("{}{}", prefix, current_line));
        }
    }

    if lines.is_empty() {
        lines.push(prefix.to_string());
    }

    lines
}
