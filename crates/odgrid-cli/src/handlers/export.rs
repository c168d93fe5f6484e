use std::path::PathBuf;

use anyhow::{Context, Result};
use odgrid_engine::worksheet;
use odgrid_types::{DatasetSpec, Gateway};

use super::parse;

pub async fn handle<G: Gateway>(
    gateway: &G,
    dataset: &DatasetSpec,
    output: Option<PathBuf>,
    sort_args: &[String],
    filter_args: &[String],
) -> Result<()> {
    let sort = parse::sort_state(sort_args)?;
    let filter = parse::filter_state(filter_args)?;

    let rows = gateway.list(&dataset.resource, &sort, &filter).await?;
    let sheet = worksheet(&dataset.name, &rows);

    let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.csv", dataset.name)));
    write_csv(&sheet, &path)?;

    println!("Exported {} row(s) to {}", sheet.records.len(), path.display());
    Ok(())
}

pub(crate) fn write_csv(sheet: &odgrid_engine::Worksheet, path: &std::path::Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    writer.write_record(&sheet.header)?;
    for record in &sheet.records {
        writer.write_record(record)?;
    }
    writer.flush()?;
    Ok(())
}
