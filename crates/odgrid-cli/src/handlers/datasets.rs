use anyhow::Result;
use serde_json::json;

use crate::config::Config;
use crate::types::OutputFormat;

pub fn handle(config: &Config, format: OutputFormat) -> Result<()> {
    let specs: Vec<_> = config
        .dataset_names()
        .iter()
        .filter_map(|name| config.resolve_dataset(Some(name)).ok())
        .collect();

    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = specs
                .iter()
                .map(|d| {
                    json!({
                        "name": d.name,
                        "resource": d.resource,
                        "id_field": d.id_field,
                        "columns": d.columns.len(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Plain => {
            println!("{:<12} {:<12} {:<12} COLUMNS", "NAME", "RESOURCE", "ID FIELD");
            for d in &specs {
                println!(
                    "{:<12} {:<12} {:<12} {}",
                    d.name,
                    d.resource,
                    d.id_field,
                    d.columns.len()
                );
            }
        }
    }

    Ok(())
}
