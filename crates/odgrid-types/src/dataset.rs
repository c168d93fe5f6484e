use serde::{Deserialize, Serialize};

use crate::column::ColumnSpec;

/// Foreign-key resolution for one column: rows of `resource` are
/// side-loaded once and `key_field` -> joined `label_fields` becomes the
/// display mapping (and the option list when the column is enumerated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupSpec {
    pub field: String,
    pub resource: String,
    pub key_field: String,
    pub label_fields: Vec<String>,
}

/// Declarative description of one remote collection as a grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpec {
    pub name: String,
    pub resource: String,
    pub id_field: String,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub lookups: Vec<LookupSpec>,
}

impl DatasetSpec {
    pub fn column(&self, field: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.field == field)
    }

    pub fn lookup_for(&self, field: &str) -> Option<&LookupSpec> {
        self.lookups.iter().find(|l| l.field == field)
    }

    pub fn editable_fields(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| c.editable)
            .map(|c| c.field.as_str())
    }
}
