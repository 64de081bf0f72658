mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use spaced_flash_lib::flashcards::Rating;

#[derive(Parser)]
#[command(name = "spaced-flash-cli", about = "Spaced repetition flashcards in the terminal", version)]
struct Cli {
    /// Card store directory (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new card
    Add {
        /// Question side (use "-" to read from stdin)
        front: String,
        /// Answer side
        back: String,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        /// Card id (defaults to a random UUID)
        #[arg(long)]
        id: Option<String>,
    },

    /// List cards
    List {
        /// Only cards carrying this tag (repeatable, all must match)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Only cards due now
        #[arg(long)]
        due: bool,
    },

    /// Show a card with its scheduling state
    Show {
        /// Card id
        id: String,
    },

    /// Record a review with an SM-2 quality score
    Rate {
        /// Card id
        id: String,
        /// Recall quality, 0 (blackout) to 5 (perfect)
        #[arg(allow_negative_numbers = true)]
        quality: i32,
    },

    /// Review all due cards
    Review {
        /// Only cards carrying this tag (repeatable, all must match)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Apply the same rating to every card instead of prompting
        #[arg(long)]
        rating: Option<Rating>,
    },

    /// Collection statistics and due forecast
    Stats,

    /// List tags with counts
    Tags,

    /// Delete a card
    Delete {
        /// Card id
        id: String,
    },
}

/// Read content from stdin when "-" is given
fn resolve_content(content: String) -> String {
    if content == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
        buf.trim_end().to_string()
    } else {
        content
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir)?;

    match cli.command {
        Command::Add { front, back, tags, id } => {
            let front = resolve_content(front);
            commands::add::run(&app, front, back, tags.as_deref(), id, &cli.format, use_color)?;
        }
        Command::List { tags, due } => {
            commands::list::run(&app, &tags, due, &cli.format, use_color)?;
        }
        Command::Show { id } => {
            commands::show::run(&app, &id, &cli.format, use_color)?;
        }
        Command::Rate { id, quality } => {
            commands::rate::run(&app, &id, quality, &cli.format, use_color)?;
        }
        Command::Review { tags, rating } => {
            commands::review::run(&app, &tags, rating, &cli.format, use_color)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Tags => {
            commands::tags::run(&app, &cli.format, use_color)?;
        }
        Command::Delete { id } => {
            commands::delete::run(&app, &id, &cli.format, use_color)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
