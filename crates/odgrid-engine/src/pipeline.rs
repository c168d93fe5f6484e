//! The row-model pipeline: filter then stable multi-key sort.
//!
//! This is the single definition of sort/filter semantics. The remote
//! gateway translates the same state into `$orderby`/`$filter` instead of
//! running this code; `LocalGateway` runs it so demo mode and tests
//! observe exactly what a conforming server would return.

use crate::cell::value_text;
use odgrid_types::{FilterState, Row, SortState};
use serde_json::Value;
use std::cmp::Ordering;

/// Exact, case-sensitive match of every predicate against the row's
/// text-coerced field values, AND-combined.
pub fn matches(row: &Row, filter: &FilterState) -> bool {
    filter
        .iter()
        .all(|(field, predicate)| value_text(row.get(field)) == *predicate)
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(Value::Null), Some(Value::Null)) => Ordering::Equal,
        (Some(Value::Null), Some(_)) => Ordering::Less,
        (Some(_), Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => value_text(Some(x)).cmp(&value_text(Some(y))),
    }
}

/// Stable multi-key sort, criteria applied left-to-right.
pub fn sort_rows(rows: &mut [Row], sort: &SortState) {
    if sort.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        for key in sort.keys() {
            let ordering = compare_values(a.get(&key.field), b.get(&key.field));
            let ordering = if key.descending {
                ordering.reverse()
            } else {
                ordering
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// Apply FilterState then SortState to a row collection.
pub fn row_model(rows: Vec<Row>, filter: &FilterState, sort: &SortState) -> Vec<Row> {
    let mut rows: Vec<Row> = rows.into_iter().filter(|r| matches(r, filter)).collect();
    sort_rows(&mut rows, sort);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(id: i64, city: &str, date: &str) -> Row {
        let mut row = Row::new();
        row.set("OrderID", json!(id));
        row.set("ShipCity", json!(city));
        row.set("OrderDate", json!(date));
        row
    }

    fn sample() -> Vec<Row> {
        vec![
            order(1, "London", "1996-07-04"),
            order(2, "Reims", "1996-07-05"),
            order(3, "London", "1996-07-01"),
            order(4, "london", "1996-07-02"),
        ]
    }

    #[test]
    fn filter_is_exact_and_case_sensitive() {
        let mut filter = FilterState::default();
        filter.set("ShipCity", "London");
        let rows = row_model(sample(), &filter, &SortState::default());
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.get("ShipCity") == Some(&json!("London"))));
    }

    #[test]
    fn sort_toggle_flips_direction_on_the_same_data() {
        let mut sort = SortState::default();
        sort.toggle("OrderDate");
        let asc = row_model(sample(), &FilterState::default(), &sort);
        assert_eq!(asc.first().unwrap().get("OrderID"), Some(&json!(3)));

        sort.toggle("OrderDate");
        let desc = row_model(sample(), &FilterState::default(), &sort);
        assert_eq!(desc.first().unwrap().get("OrderID"), Some(&json!(2)));
        assert_eq!(sort.keys().len(), 1);
    }

    #[test]
    fn multi_key_sort_is_stable_left_to_right() {
        let mut sort = SortState::default();
        sort.push("ShipCity", false);
        sort.push("OrderDate", false);
        let rows = row_model(sample(), &FilterState::default(), &sort);
        let ids: Vec<_> = rows
            .iter()
            .map(|r| r.get("OrderID").and_then(|v| v.as_i64()).unwrap())
            .collect();
        // "London" < "Reims" < "london" (case-sensitive), dates ascending within
        assert_eq!(ids, vec![3, 1, 2, 4]);
    }

    #[test]
    fn numbers_sort_numerically_not_lexically() {
        let mut rows = vec![order(9, "a", "x"), order(10, "b", "x"), order(2, "c", "x")];
        let mut sort = SortState::default();
        sort.push("OrderID", false);
        sort_rows(&mut rows, &sort);
        let ids: Vec<_> = rows
            .iter()
            .map(|r| r.get("OrderID").and_then(|v| v.as_i64()).unwrap())
            .collect();
        assert_eq!(ids, vec![2, 9, 10]);
    }

    #[test]
    fn missing_and_null_fields_sort_first() {
        let mut no_date = Row::new();
        no_date.set("OrderID", json!(5));
        let mut rows = vec![order(1, "a", "1996-07-04"), no_date];
        let mut sort = SortState::default();
        sort.push("OrderDate", false);
        sort_rows(&mut rows, &sort);
        assert_eq!(rows[0].get("OrderID"), Some(&json!(5)));
    }
}
