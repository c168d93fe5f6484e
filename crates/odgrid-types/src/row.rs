use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Ordered field name -> value buffer used for pending edits and write payloads.
pub type FieldMap = IndexMap<String, Value>;

/// Stable row identity extracted from a dataset's id field.
///
/// Identity is by this value, never by array position or object identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Str(String),
}

impl RowId {
    /// Extract an id from a field value. Non-integer numbers and
    /// non-scalar values have no identity.
    pub fn from_value(value: &Value) -> Option<RowId> {
        match value {
            Value::Number(n) => n.as_i64().map(RowId::Int),
            Value::String(s) => Some(RowId::Str(s.clone())),
            _ => None,
        }
    }

    /// Render as an OData key literal: integers bare, strings quoted
    /// with embedded quotes doubled (`O'Brien` -> `'O''Brien'`).
    pub fn to_key_literal(&self) -> String {
        match self {
            RowId::Int(n) => n.to_string(),
            RowId::Str(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(n) => write!(f, "{}", n),
            RowId::Str(s) => write!(f, "{}", s),
        }
    }
}

/// A single remote entity: an ordered mapping from field name to scalar.
///
/// Field order is first-seen order and survives fetch, edit and export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(values: IndexMap<String, Value>) -> Self {
        Row { values }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.values.insert(field.into(), value);
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Identity under the given id field, if the row carries one.
    pub fn id(&self, id_field: &str) -> Option<RowId> {
        self.values.get(id_field).and_then(RowId::from_value)
    }

    /// Copy of the field map, used to seed an edit session.
    pub fn to_field_map(&self) -> FieldMap {
        self.values.clone()
    }

    /// Overlay `fields` onto this row, keeping unmentioned fields as-is.
    pub fn merged(&self, fields: &FieldMap) -> Row {
        let mut merged = self.clone();
        for (field, value) in fields {
            merged.values.insert(field.clone(), value.clone());
        }
        merged
    }
}

/// The fetched collection plus the field that names each row.
///
/// Replaced wholesale on fetch; patched in place (single entry, keyed by
/// id) after a successful write; never partially merged.
#[derive(Debug, Clone, Default)]
pub struct RowSet {
    id_field: String,
    rows: Vec<Row>,
}

impl RowSet {
    pub fn new(id_field: impl Into<String>, rows: Vec<Row>) -> Self {
        RowSet {
            id_field: id_field.into(),
            rows,
        }
    }

    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn id_at(&self, index: usize) -> Option<RowId> {
        self.rows.get(index).and_then(|r| r.id(&self.id_field))
    }

    pub fn position_of(&self, id: &RowId) -> Option<usize> {
        self.rows
            .iter()
            .position(|r| r.id(&self.id_field).as_ref() == Some(id))
    }

    pub fn find(&self, id: &RowId) -> Option<&Row> {
        self.position_of(id).map(|i| &self.rows[i])
    }

    /// Replace the entry identified by `id`. Returns false when no row
    /// carries that id; the collection is left untouched in that case.
    pub fn replace(&mut self, id: &RowId, row: Row) -> bool {
        match self.position_of(id) {
            Some(index) => {
                self.rows[index] = row;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &RowId) -> bool {
        match self.position_of(id) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn insert_front(&mut self, row: Row) {
        self.rows.insert(0, row);
    }
}
