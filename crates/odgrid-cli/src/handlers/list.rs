use anyhow::Result;
use odgrid_types::{DatasetSpec, Gateway};

use crate::types::OutputFormat;
use crate::ui::console;

use super::{load_lookups, parse};

pub async fn handle<G: Gateway>(
    gateway: &G,
    dataset: &DatasetSpec,
    sort_args: &[String],
    filter_args: &[String],
    format: OutputFormat,
) -> Result<()> {
    let sort = parse::sort_state(sort_args)?;
    let filter = parse::filter_state(filter_args)?;

    let rows = gateway.list(&dataset.resource, &sort, &filter).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Plain => {
            let lookups = load_lookups(gateway, dataset).await;
            console::print_rows(dataset, &rows, &lookups);
        }
    }

    Ok(())
}
