use anyhow::{Result, ensure};
use odgrid_types::{DatasetSpec, Gateway};

use crate::types::OutputFormat;
use crate::ui::console;

use super::parse;

pub async fn handle<G: Gateway>(
    gateway: &G,
    dataset: &DatasetSpec,
    raw_id: &str,
    set_args: &[String],
    format: OutputFormat,
) -> Result<()> {
    let id = parse::row_id(raw_id);
    let fields = parse::assignments(dataset, set_args, true)?;
    ensure!(!fields.is_empty(), "Nothing to update: pass --set Field=Value");

    let echo = gateway.update(&dataset.resource, &id, &fields).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&echo)?),
        OutputFormat::Plain => {
            println!("Updated {}({})", dataset.resource, id);
            console::print_fields(&echo);
        }
    }

    Ok(())
}
