//! Grid application state: one dataset bound to one gateway.
//!
//! All remote calls are awaited inline before the next input is handled,
//! so a fetch can never land on top of a newer grid state. Errors never
//! unwind the grid; they land in the status log and the last good rows
//! stay on screen.

use odgrid_engine::{CellRenderer, DefaultRenderer, EditSession, LookupTable, commit_input};
use odgrid_types::{
    ColumnSpec, DatasetSpec, FieldMap, FilterState, Gateway, InputKind, Row, RowSet, SortState,
};
use serde_json::Value;

const STATUS_CAPACITY: usize = 50;

pub struct GridApp<'a, G: Gateway> {
    gateway: &'a G,
    pub dataset: DatasetSpec,
    pub rows: RowSet,
    pub lookups: odgrid_engine::LookupSet,
    pub session: EditSession,
    pub sort: SortState,
    pub filter: FilterState,
    pub selected: usize,
    status: Vec<String>,
}

impl<'a, G: Gateway> GridApp<'a, G> {
    pub fn new(gateway: &'a G, dataset: DatasetSpec) -> Self {
        let rows = RowSet::new(dataset.id_field.clone(), Vec::new());
        GridApp {
            gateway,
            dataset,
            rows,
            lookups: odgrid_engine::LookupSet::default(),
            session: EditSession::default(),
            sort: SortState::default(),
            filter: FilterState::default(),
            selected: 0,
            status: Vec::new(),
        }
    }

    /// Initial load: the collection plus one fetch per lookup resource.
    /// A failed lookup degrades that column to raw keys, nothing more.
    pub async fn load(&mut self) {
        self.refresh().await;
        for spec in self.dataset.lookups.clone() {
            match self
                .gateway
                .list(&spec.resource, &SortState::default(), &FilterState::default())
                .await
            {
                Ok(rows) => self
                    .lookups
                    .insert(spec.field.clone(), LookupTable::from_rows(&rows, &spec)),
                Err(e) => self.log(format!("Lookup load failed for {}: {}", spec.resource, e)),
            }
        }
    }

    /// Re-fetch the collection under the current sort and filter. The row
    /// set is replaced wholesale; on error the previous rows stand.
    pub async fn refresh(&mut self) {
        match self
            .gateway
            .list(&self.dataset.resource, &self.sort, &self.filter)
            .await
        {
            Ok(rows) => {
                self.rows = RowSet::new(self.dataset.id_field.clone(), rows);
                self.clamp_selection();
            }
            Err(e) => self.log(format!("Load failed: {}", e)),
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }

    /// Put the selected row into edit mode. Any other row's unsaved
    /// buffer is discarded without a write.
    pub fn begin_edit_selected(&mut self) {
        let Some(id) = self.rows.id_at(self.selected) else {
            return;
        };
        if let Some(row) = self.rows.get(self.selected) {
            self.session.begin_edit(id, row);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.session.cancel();
    }

    /// Commit a raw input buffer into the edit session. Values the
    /// column's input kind cannot represent are discarded and the prior
    /// value stands.
    pub fn commit_cell(&mut self, field: &str, raw: &str) {
        let Some(column) = self.dataset.column(field).cloned() else {
            return;
        };
        if !column.editable {
            return;
        }
        let kind = self.effective_kind(&column);
        match commit_input(&kind, raw) {
            Some(value) => {
                let value = self.keep_numeric_key_type(field, value);
                self.session.set_field(field, value);
            }
            None => self.log(format!("Invalid {} value, edit discarded", field)),
        }
    }

    /// Enumerated columns with no declared options draw their choices
    /// from the side-loaded lookup.
    pub fn effective_kind(&self, column: &ColumnSpec) -> InputKind {
        match &column.input {
            InputKind::Select { options } if options.is_empty() => InputKind::Select {
                options: self.lookup_choices(&column.field),
            },
            InputKind::Radio { options } if options.is_empty() => InputKind::Radio {
                options: self.lookup_choices(&column.field),
            },
            other => other.clone(),
        }
    }

    fn lookup_choices(&self, field: &str) -> Vec<odgrid_types::Choice> {
        self.lookups
            .get(field)
            .map(|table| table.choices())
            .unwrap_or_default()
    }

    // Choice values are strings; numeric foreign keys keep their stored type
    fn keep_numeric_key_type(&self, field: &str, value: Value) -> Value {
        if let Value::String(s) = &value
            && let Some(row) = self.rows.get(self.selected)
            && matches!(row.get(field), Some(Value::Number(_)))
            && let Ok(n) = s.parse::<i64>()
        {
            return Value::Number(n.into());
        }
        value
    }

    /// Persist the edit buffer: one PATCH carrying the buffered fields.
    /// On success the echoed row replaces the stored one in place; on
    /// failure the buffer is gone and the pre-edit row stands.
    pub async fn save(&mut self) {
        let Some((id, pending)) = self.session.take_pending() else {
            return;
        };
        match self
            .gateway
            .update(&self.dataset.resource, &id, &pending)
            .await
        {
            Ok(echo) => {
                // A bodyless reply echoes only the written fields; merge
                // it over the prior copy instead of shrinking the row
                let updated = match self.rows.find(&id) {
                    Some(prior) if echo.len() < prior.len() => prior.merged(&pending),
                    _ => echo,
                };
                self.rows.replace(&id, updated);
                self.log(format!("Saved {}({})", self.dataset.resource, id));
            }
            Err(e) => self.log(format!("Save failed: {}", e)),
        }
    }

    /// Create a row remotely and show it at the top of the grid.
    pub async fn create(&mut self, fields: FieldMap) {
        match self.gateway.create(&self.dataset.resource, &fields).await {
            Ok(row) => {
                let id = row.id(&self.dataset.id_field);
                self.rows.insert_front(row);
                self.selected = 0;
                match id {
                    Some(id) => self.log(format!("Created {}({})", self.dataset.resource, id)),
                    None => self.log(format!("Created {} row", self.dataset.resource)),
                }
            }
            Err(e) => self.log(format!("Create failed: {}", e)),
        }
    }

    /// Delete the selected row remotely, then drop it from the grid.
    pub async fn delete_selected(&mut self) {
        let Some(id) = self.rows.id_at(self.selected) else {
            return;
        };
        match self.gateway.delete(&self.dataset.resource, &id).await {
            Ok(()) => {
                if self.session.is_editing(&id) {
                    self.session.cancel();
                }
                self.rows.remove(&id);
                self.clamp_selection();
                self.log(format!("Deleted {}({})", self.dataset.resource, id));
            }
            Err(e) => self.log(format!("Delete failed: {}", e)),
        }
    }

    /// Cycle the sort on a column and re-fetch under the new order.
    pub async fn toggle_sort(&mut self, field: &str) {
        self.sort.toggle(field);
        self.refresh().await;
    }

    /// Set or clear (empty value) a column filter and re-fetch.
    pub async fn apply_filter(&mut self, field: &str, value: &str) {
        self.filter.set(field, value);
        self.refresh().await;
    }

    /// Read-mode text for a cell, with foreign keys shown as labels.
    pub fn display_value(&self, row: &Row, column: &ColumnSpec) -> String {
        DefaultRenderer::new(&self.lookups).display(column, row)
    }

    /// Edit-mode text for a cell of the active row: the buffered value.
    pub fn pending_text(&self, field: &str) -> String {
        odgrid_engine::value_text(self.session.pending_value(field))
    }

    pub fn log(&mut self, message: impl Into<String>) {
        self.status.push(message.into());
        if self.status.len() > STATUS_CAPACITY {
            self.status.remove(0);
        }
    }

    pub fn status(&self) -> &[String] {
        &self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{datasets, demo};
    use odgrid_engine::LocalGateway;
    use serde_json::json;

    async fn loaded_app(gateway: &LocalGateway) -> GridApp<'_, LocalGateway> {
        let mut app = GridApp::new(gateway, datasets::builtin("orders").unwrap());
        app.load().await;
        app
    }

    fn write_calls(gateway: &LocalGateway) -> Vec<String> {
        gateway
            .calls()
            .into_iter()
            .filter(|c| !c.starts_with("GET"))
            .collect()
    }

    #[tokio::test]
    async fn buffered_keystrokes_issue_no_writes() {
        let gateway = demo::gateway();
        let mut app = loaded_app(&gateway).await;

        app.begin_edit_selected();
        app.commit_cell("ShipCity", "Lisbon");
        app.commit_cell("Freight", "99.5");

        assert!(write_calls(&gateway).is_empty());
        assert_eq!(app.session.pending_value("ShipCity"), Some(&json!("Lisbon")));
    }

    #[tokio::test]
    async fn editing_another_row_discards_the_first_buffer_silently() {
        let gateway = demo::gateway();
        let mut app = loaded_app(&gateway).await;

        app.begin_edit_selected();
        app.commit_cell("ShipCity", "Lisbon");

        app.select_next();
        app.begin_edit_selected();

        assert!(write_calls(&gateway).is_empty());
        let second_id = app.rows.id_at(1).unwrap();
        assert!(app.session.is_editing(&second_id));
        // The second buffer holds row 2's own city, not the abandoned edit
        assert_eq!(app.session.pending_value("ShipCity"), Some(&json!("Muenster")));
    }

    #[tokio::test]
    async fn cancel_restores_nothing_because_nothing_changed() {
        let gateway = demo::gateway();
        let mut app = loaded_app(&gateway).await;
        let before = app.rows.get(0).unwrap().clone();

        app.begin_edit_selected();
        app.commit_cell("ShipCity", "Lisbon");
        app.cancel_edit();

        assert!(app.session.is_idle());
        assert_eq!(app.rows.get(0), Some(&before));
        assert!(write_calls(&gateway).is_empty());
    }

    #[tokio::test]
    async fn save_patches_exactly_the_edited_row() {
        let gateway = demo::gateway();
        let mut app = loaded_app(&gateway).await;
        let id = app.rows.id_at(0).unwrap();
        let untouched = app.rows.get(1).unwrap().clone();

        app.begin_edit_selected();
        app.commit_cell("ShipCity", "Lisbon");
        app.save().await;

        assert!(app.session.is_idle());
        assert_eq!(
            app.rows.find(&id).unwrap().get("ShipCity"),
            Some(&json!("Lisbon"))
        );
        assert_eq!(app.rows.get(1), Some(&untouched));
        assert_eq!(
            write_calls(&gateway),
            vec![format!("PATCH Orders({})", id)]
        );
    }

    #[tokio::test]
    async fn failed_save_drops_the_buffer_and_keeps_prior_values() {
        let gateway = demo::gateway();
        let mut app = loaded_app(&gateway).await;
        let before = app.rows.get(0).unwrap().clone();

        app.begin_edit_selected();
        app.commit_cell("ShipCity", "Lisbon");
        gateway.fail_writes(true);
        app.save().await;

        assert!(app.session.is_idle());
        assert_eq!(app.rows.get(0), Some(&before));
        assert!(app.status().iter().any(|m| m.starts_with("Save failed")));
    }

    #[tokio::test]
    async fn sort_toggle_cycles_through_desc_to_unsorted() {
        let gateway = demo::gateway();
        let mut app = loaded_app(&gateway).await;

        app.toggle_sort("Freight").await;
        assert_eq!(
            app.rows.get(0).unwrap().get("Freight"),
            Some(&json!(11.61))
        );

        app.toggle_sort("Freight").await;
        assert_eq!(
            app.rows.get(0).unwrap().get("Freight"),
            Some(&json!(148.33))
        );

        app.toggle_sort("Freight").await;
        assert!(app.sort.is_empty());
        assert_eq!(app.rows.id_at(0), Some(odgrid_types::RowId::Int(10248)));
    }

    #[tokio::test]
    async fn filter_narrows_and_clearing_restores() {
        let gateway = demo::gateway();
        let mut app = loaded_app(&gateway).await;
        let full = app.rows.len();

        app.apply_filter("ShipCity", "London").await;
        assert_eq!(app.rows.len(), 2);
        assert!(
            app.rows
                .rows()
                .iter()
                .all(|r| r.get("ShipCity") == Some(&json!("London")))
        );

        app.apply_filter("ShipCity", "").await;
        assert_eq!(app.rows.len(), full);
    }

    #[tokio::test]
    async fn created_row_lands_at_the_top() {
        let gateway = demo::gateway();
        let mut app = loaded_app(&gateway).await;

        let mut fields = FieldMap::new();
        fields.insert("CustomerID".to_string(), json!("VINET"));
        fields.insert("ShipCity".to_string(), json!("Reims"));
        app.create(fields).await;

        assert_eq!(app.selected, 0);
        assert_eq!(app.rows.get(0).unwrap().get("ShipCity"), Some(&json!("Reims")));
        assert_eq!(app.rows.id_at(0), Some(odgrid_types::RowId::Int(10256)));
    }

    #[tokio::test]
    async fn delete_removes_by_identity_and_clamps_selection() {
        let gateway = demo::gateway();
        let mut app = loaded_app(&gateway).await;
        let last = app.rows.len() - 1;
        app.selected = last;
        let id = app.rows.id_at(last).unwrap();

        app.delete_selected().await;

        assert_eq!(app.rows.len(), last);
        assert!(app.rows.find(&id).is_none());
        assert_eq!(app.selected, last - 1);
    }

    #[tokio::test]
    async fn invalid_number_input_is_discarded() {
        let gateway = demo::gateway();
        let mut app = loaded_app(&gateway).await;

        app.begin_edit_selected();
        let before = app.session.pending_value("Freight").cloned();
        app.commit_cell("Freight", "not a number");

        assert_eq!(app.session.pending_value("Freight"), before.as_ref());
        assert!(app.status().iter().any(|m| m.contains("Invalid Freight")));
    }

    #[tokio::test]
    async fn select_choices_come_from_the_lookup_and_keep_key_types() {
        let gateway = demo::gateway();
        let mut app = loaded_app(&gateway).await;

        let column = app.dataset.column("EmployeeID").unwrap().clone();
        let kind = app.effective_kind(&column);
        assert_eq!(kind.options().len(), 5);

        app.begin_edit_selected();
        app.commit_cell("EmployeeID", "4");
        // Stored as a number, matching the remote field type
        assert_eq!(app.session.pending_value("EmployeeID"), Some(&json!(4)));

        // A value outside the closed set is rejected
        app.commit_cell("EmployeeID", "77");
        assert_eq!(app.session.pending_value("EmployeeID"), Some(&json!(4)));
    }

    #[tokio::test]
    async fn lookup_labels_resolve_in_display() {
        let gateway = demo::gateway();
        let app = loaded_app(&gateway).await;

        let column = app.dataset.column("CustomerID").unwrap().clone();
        let row = app.rows.get(0).unwrap();
        assert_eq!(app.display_value(row, &column), "Vins et alcools Chevalier");
    }
}
