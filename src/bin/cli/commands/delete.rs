use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, id: &str, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let card = app.delete_card(id)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "deleted": card.id });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted card \"{}\" ({})", card.front, card.id);
        }
    }

    Ok(())
}
