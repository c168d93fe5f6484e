pub mod browse;
pub mod create;
pub mod datasets;
pub mod delete;
pub mod export;
pub mod list;
pub mod parse;
pub mod update;

use odgrid_engine::{LookupSet, LookupTable};
use odgrid_types::{DatasetSpec, FilterState, Gateway, SortState};

/// Fetch every lookup resource a dataset declares. A failed lookup only
/// degrades that column to raw keys, so errors are warnings, not failures.
pub(crate) async fn load_lookups<G: Gateway>(gateway: &G, dataset: &DatasetSpec) -> LookupSet {
    let mut lookups = LookupSet::default();
    for spec in &dataset.lookups {
        match gateway
            .list(&spec.resource, &SortState::default(), &FilterState::default())
            .await
        {
            Ok(rows) => lookups.insert(spec.field.clone(), LookupTable::from_rows(&rows, spec)),
            Err(e) => eprintln!("Warning: lookup fetch failed for {}: {}", spec.resource, e),
        }
    }
    lookups
}
