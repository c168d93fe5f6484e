//! Parsing of command-line sort, filter and assignment arguments into
//! the grid's query and edit types.

use anyhow::{Context, Result, bail};
use odgrid_engine::commit_input;
use odgrid_types::{DatasetSpec, FieldMap, FilterState, InputKind, RowId, SortState};
use serde_json::Value;

/// `Field` or `Field:desc` (or `Field:asc`), repeatable, left-to-right.
pub fn sort_state(args: &[String]) -> Result<SortState> {
    let mut sort = SortState::default();
    for arg in args {
        match arg.split_once(':') {
            None => sort.push(arg.clone(), false),
            Some((field, "asc")) => sort.push(field, false),
            Some((field, "desc")) => sort.push(field, true),
            Some((_, other)) => bail!("Invalid sort direction '{}': use asc or desc", other),
        }
    }
    Ok(sort)
}

/// `Field=Value`, repeatable, AND-combined.
pub fn filter_state(args: &[String]) -> Result<FilterState> {
    let mut filter = FilterState::default();
    for arg in args {
        let (field, value) = arg
            .split_once('=')
            .with_context(|| format!("Invalid filter '{}': expected Field=Value", arg))?;
        filter.set(field, value);
    }
    Ok(filter)
}

/// A row key: integer when it parses as one, string otherwise.
pub fn row_id(raw: &str) -> RowId {
    match raw.parse::<i64>() {
        Ok(n) => RowId::Int(n),
        Err(_) => RowId::Str(raw.to_string()),
    }
}

/// `Field=Value` assignments coerced through each column's input kind.
/// Unknown fields are rejected; with `require_editable` set, so are
/// read-only columns.
pub fn assignments(
    dataset: &DatasetSpec,
    args: &[String],
    require_editable: bool,
) -> Result<FieldMap> {
    let mut fields = FieldMap::new();
    for arg in args {
        let (field, raw) = arg
            .split_once('=')
            .with_context(|| format!("Invalid assignment '{}': expected Field=Value", arg))?;
        let column = dataset
            .column(field)
            .with_context(|| format!("Unknown column: {}", field))?;
        if require_editable && !column.editable {
            bail!("Column {} is not editable", field);
        }
        let value = coerce(&column.input, raw)
            .with_context(|| format!("Invalid {} value: '{}'", field, raw))?;
        fields.insert(field.to_string(), value);
    }
    Ok(fields)
}

// Enumerated columns whose options come from a lookup cannot be
// validated here; take the raw value, numeric when it parses as one.
fn coerce(kind: &InputKind, raw: &str) -> Option<Value> {
    if kind.is_enumerated() && kind.options().is_empty() {
        return Some(match raw.parse::<i64>() {
            Ok(n) => Value::Number(n.into()),
            Err(_) => Value::String(raw.to_string()),
        });
    }
    commit_input(kind, raw)
}
