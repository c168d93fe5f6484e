use anyhow::Result;
use odgrid_types::{DatasetSpec, Gateway};

use crate::types::OutputFormat;

use super::parse;

pub async fn handle<G: Gateway>(
    gateway: &G,
    dataset: &DatasetSpec,
    raw_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let id = parse::row_id(raw_id);

    gateway.delete(&dataset.resource, &id).await?;

    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "deleted": format!("{}({})", dataset.resource, id) })
        ),
        OutputFormat::Plain => println!("Deleted {}({})", dataset.resource, id),
    }

    Ok(())
}
