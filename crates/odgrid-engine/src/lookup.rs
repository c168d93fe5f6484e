use indexmap::IndexMap;
use odgrid_types::{Choice, LookupSpec, Row};

use crate::cell::value_text;

/// Key -> display label mapping built from one side-loaded resource.
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    labels: IndexMap<String, String>,
}

impl LookupTable {
    /// Build the mapping from fetched rows. Multi-field labels are joined
    /// with spaces (e.g. FirstName + LastName); rows without a key are
    /// skipped.
    pub fn from_rows(rows: &[Row], spec: &LookupSpec) -> Self {
        let mut labels = IndexMap::new();
        for row in rows {
            let key = value_text(row.get(&spec.key_field));
            if key.is_empty() {
                continue;
            }
            let label = spec
                .label_fields
                .iter()
                .map(|f| value_text(row.get(f)))
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            labels.insert(key, label);
        }
        LookupTable { labels }
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The closed option set this lookup offers, in key first-seen order.
    pub fn choices(&self) -> Vec<Choice> {
        self.labels
            .iter()
            .map(|(value, label)| Choice::new(value.clone(), label.clone()))
            .collect()
    }
}

/// All lookup tables for a dataset, keyed by the column field they back.
#[derive(Debug, Clone, Default)]
pub struct LookupSet {
    tables: IndexMap<String, LookupTable>,
}

impl LookupSet {
    pub fn insert(&mut self, field: impl Into<String>, table: LookupTable) {
        self.tables.insert(field.into(), table);
    }

    pub fn get(&self, field: &str) -> Option<&LookupTable> {
        self.tables.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
