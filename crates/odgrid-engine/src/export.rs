//! Export record building: rows to a single rectangular sheet.
//!
//! Pure transform only - the CLI layer owns serialization to disk.

use odgrid_types::Row;

use crate::cell::value_text;

/// A single-sheet spreadsheet: header row plus text-coerced data records.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    /// Sheet name; derived from the dataset.
    pub name: String,
    /// Field names in first-seen order across the row set.
    pub header: Vec<String>,
    /// One record per row, cells aligned to the header.
    pub records: Vec<Vec<String>>,
}

/// Materialize the whole row set into one worksheet. Column order follows
/// field first-seen order; rows missing a field get an empty cell. No
/// streaming - the entire collection is in memory already.
pub fn worksheet(name: &str, rows: &[Row]) -> Worksheet {
    let mut header: Vec<String> = Vec::new();
    for row in rows {
        for field in row.field_names() {
            if !header.iter().any(|h| h == field) {
                header.push(field.clone());
            }
        }
    }

    let records = rows
        .iter()
        .map(|row| header.iter().map(|f| value_text(row.get(f))).collect())
        .collect();

    Worksheet {
        name: name.to_string(),
        header,
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_follows_first_seen_field_order() {
        let mut a = Row::new();
        a.set("OrderID", json!(1));
        a.set("ShipCity", json!("Reims"));
        let mut b = Row::new();
        b.set("OrderID", json!(2));
        b.set("Freight", json!(32.38));

        let sheet = worksheet("orders", &[a, b]);
        assert_eq!(sheet.header, vec!["OrderID", "ShipCity", "Freight"]);
        assert_eq!(sheet.records[0], vec!["1", "Reims", ""]);
        assert_eq!(sheet.records[1], vec!["2", "", "32.38"]);
    }

    #[test]
    fn three_rows_four_fields_yield_header_plus_three_records() {
        let rows: Vec<Row> = (1..=3)
            .map(|i| {
                let mut row = Row::new();
                row.set("OrderID", json!(i));
                row.set("CustomerID", json!("ALFKI"));
                row.set("OrderDate", json!("1996-07-04"));
                row.set("ShipCity", json!("Reims"));
                row
            })
            .collect();

        let sheet = worksheet("orders", &rows);
        assert_eq!(sheet.header.len(), 4);
        assert_eq!(sheet.records.len(), 3);
        assert_eq!(sheet.name, "orders");
    }

    #[test]
    fn empty_row_set_exports_an_empty_sheet() {
        let sheet = worksheet("orders", &[]);
        assert!(sheet.header.is_empty());
        assert!(sheet.records.is_empty());
    }
}
