//! Per-cell behavior, derived exhaustively from a column's `InputKind`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use odgrid_types::{Choice, ColumnSpec, InputKind, Row};
use serde_json::Value;

use crate::lookup::LookupSet;

/// Text form of a cell value: missing and null render empty, strings
/// render raw, everything else renders as compact JSON.
pub fn value_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// The control presented while a cell is in edit mode.
#[derive(Debug, Clone, PartialEq)]
pub enum EditControl {
    TextInput,
    NumberInput,
    DateInput,
    SelectList(Vec<Choice>),
    RadioGroup(Vec<Choice>),
}

/// Derive the edit control for a kind. Exhaustive by construction:
/// a new `InputKind` variant will not compile until it is handled here.
pub fn edit_control(kind: &InputKind) -> EditControl {
    match kind {
        InputKind::Text | InputKind::Email => EditControl::TextInput,
        InputKind::Number => EditControl::NumberInput,
        InputKind::Date => EditControl::DateInput,
        InputKind::Select { options } => EditControl::SelectList(options.clone()),
        InputKind::Radio { options } => EditControl::RadioGroup(options.clone()),
    }
}

/// Coerce a raw input buffer to the cell's value on commit.
///
/// Returns None when the input is not representable for the kind, in
/// which case the edit is discarded and the prior value stands:
/// - Number: parses integer or float; anything else is dropped.
/// - Date: normalized to an ISO-8601 date (`YYYY-MM-DD`); accepts a bare
///   date or a full timestamp.
/// - Select/Radio: must be one of the closed option values.
/// - Text/Email: raw string buffer, taken verbatim.
pub fn commit_input(kind: &InputKind, raw: &str) -> Option<Value> {
    match kind {
        InputKind::Text | InputKind::Email => Some(Value::String(raw.to_string())),
        InputKind::Number => {
            let trimmed = raw.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Some(Value::Number(n.into()));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
        }
        InputKind::Date => normalize_date(raw).map(Value::String),
        InputKind::Select { options } | InputKind::Radio { options } => options
            .iter()
            .any(|c| c.value == raw)
            .then(|| Value::String(raw.to_string())),
    }
}

fn normalize_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive().format("%Y-%m-%d").to_string());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(ts.date().format("%Y-%m-%d").to_string());
    }
    None
}

/// The render/edit seam for a cell. The grid asks this capability what to
/// show in read mode and which control to present in edit mode; custom
/// grids supply their own implementation instead of per-column closures.
pub trait CellRenderer {
    /// Read-mode projection of the cell.
    fn display(&self, column: &ColumnSpec, row: &Row) -> String;

    /// Edit-mode control for the column.
    fn control(&self, column: &ColumnSpec) -> EditControl;
}

/// Lookup-aware default renderer: foreign keys display as their resolved
/// labels, and enumerated columns with an empty declared option list draw
/// their choices from the side-loaded lookup.
pub struct DefaultRenderer<'a> {
    lookups: &'a LookupSet,
}

impl<'a> DefaultRenderer<'a> {
    pub fn new(lookups: &'a LookupSet) -> Self {
        DefaultRenderer { lookups }
    }
}

impl CellRenderer for DefaultRenderer<'_> {
    fn display(&self, column: &ColumnSpec, row: &Row) -> String {
        let text = value_text(row.get(&column.field));
        match self.lookups.get(&column.field) {
            // Unresolvable keys fall back to the raw value
            Some(table) => table.label(&text).map(str::to_string).unwrap_or(text),
            None => text,
        }
    }

    fn control(&self, column: &ColumnSpec) -> EditControl {
        match edit_control(&column.input) {
            EditControl::SelectList(options) if options.is_empty() => {
                EditControl::SelectList(self.choices_for(&column.field))
            }
            EditControl::RadioGroup(options) if options.is_empty() => {
                EditControl::RadioGroup(self.choices_for(&column.field))
            }
            control => control,
        }
    }
}

impl DefaultRenderer<'_> {
    fn choices_for(&self, field: &str) -> Vec<Choice> {
        self.lookups
            .get(field)
            .map(|table| table.choices())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupTable;
    use odgrid_types::LookupSpec;
    use serde_json::json;

    #[test]
    fn number_input_parses_or_discards() {
        assert_eq!(commit_input(&InputKind::Number, "42"), Some(json!(42)));
        assert_eq!(commit_input(&InputKind::Number, "3.5"), Some(json!(3.5)));
        assert_eq!(commit_input(&InputKind::Number, "not a number"), None);
        assert_eq!(commit_input(&InputKind::Number, ""), None);
    }

    #[test]
    fn date_input_normalizes_to_iso_date() {
        assert_eq!(
            commit_input(&InputKind::Date, "1996-07-04"),
            Some(json!("1996-07-04"))
        );
        assert_eq!(
            commit_input(&InputKind::Date, "1996-07-04T00:00:00Z"),
            Some(json!("1996-07-04"))
        );
        assert_eq!(commit_input(&InputKind::Date, "04/07/1996"), None);
    }

    #[test]
    fn select_is_bounded_to_its_options() {
        let kind = InputKind::Select {
            options: vec![Choice::new("ALFKI", "Alfreds Futterkiste")],
        };
        assert_eq!(commit_input(&kind, "ALFKI"), Some(json!("ALFKI")));
        assert_eq!(commit_input(&kind, "NOPE"), None);
    }

    #[test]
    fn text_and_email_take_the_raw_buffer() {
        assert_eq!(commit_input(&InputKind::Text, "  x "), Some(json!("  x ")));
        assert_eq!(
            commit_input(&InputKind::Email, "a@b.example"),
            Some(json!("a@b.example"))
        );
    }

    #[test]
    fn default_renderer_resolves_lookup_labels() {
        let spec = LookupSpec {
            field: "CustomerID".into(),
            resource: "Customers".into(),
            key_field: "CustomerID".into(),
            label_fields: vec!["CompanyName".into()],
        };
        let mut customer = Row::new();
        customer.set("CustomerID", json!("ALFKI"));
        customer.set("CompanyName", json!("Alfreds Futterkiste"));
        let mut lookups = LookupSet::default();
        lookups.insert("CustomerID", LookupTable::from_rows(&[customer], &spec));

        let renderer = DefaultRenderer::new(&lookups);
        let column = ColumnSpec::new("CustomerID", "Customer")
            .editable()
            .with_input(InputKind::Select { options: vec![] });

        let mut row = Row::new();
        row.set("CustomerID", json!("ALFKI"));
        assert_eq!(renderer.display(&column, &row), "Alfreds Futterkiste");

        // Unknown keys fall back to the raw id
        row.set("CustomerID", json!("ZZZZ"));
        assert_eq!(renderer.display(&column, &row), "ZZZZ");

        // Empty declared options are filled from the lookup
        match renderer.control(&column) {
            EditControl::SelectList(options) => {
                assert_eq!(options.len(), 1);
                assert_eq!(options[0].label, "Alfreds Futterkiste");
            }
            other => panic!("expected select list, got {:?}", other),
        }
    }
}
