use anyhow::Result;
use odgrid_types::{DatasetSpec, Gateway};

use crate::types::OutputFormat;
use crate::ui::console;

use super::parse;

pub async fn handle<G: Gateway>(
    gateway: &G,
    dataset: &DatasetSpec,
    set_args: &[String],
    format: OutputFormat,
) -> Result<()> {
    let fields = parse::assignments(dataset, set_args, false)?;

    let created = gateway.create(&dataset.resource, &fields).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&created)?),
        OutputFormat::Plain => {
            match created.id(&dataset.id_field) {
                Some(id) => println!("Created {}({})", dataset.resource, id),
                None => println!("Created {} row", dataset.resource),
            }
            console::print_fields(&created);
        }
    }

    Ok(())
}
