use odgrid_types::{FieldMap, Row, RowId};
use serde_json::Value;

/// The edit-mode lifecycle for the whole grid.
///
/// At most one row renders input controls at a time; that invariant is
/// the shape of this enum rather than a nullable id plus a side buffer.
/// The buffer is purely local - nothing here touches the network.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing { row_id: RowId, pending: FieldMap },
}

impl EditSession {
    /// Enter edit mode on a row, seeding the buffer from its current
    /// values. Beginning an edit while another row is active discards
    /// that row's unsaved buffer without issuing any write.
    pub fn begin_edit(&mut self, row_id: RowId, row: &Row) {
        *self = EditSession::Editing {
            row_id,
            pending: row.to_field_map(),
        };
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditSession::Idle)
    }

    /// The row currently in edit mode, if any.
    pub fn active_row(&self) -> Option<&RowId> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { row_id, .. } => Some(row_id),
        }
    }

    pub fn is_editing(&self, id: &RowId) -> bool {
        self.active_row() == Some(id)
    }

    /// Buffer a field edit. Ignored when idle. Never triggers a remote
    /// call; intermediate keystrokes stay local until `take_pending`.
    pub fn set_field(&mut self, field: &str, value: Value) {
        if let EditSession::Editing { pending, .. } = self {
            pending.insert(field.to_string(), value);
        }
    }

    pub fn pending_value(&self, field: &str) -> Option<&Value> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing { pending, .. } => pending.get(field),
        }
    }

    /// Consume the session for a save: hand the buffer to the caller and
    /// reset to idle. The caller drives the remote update; on failure the
    /// buffer is gone - edits are dropped, not restored.
    pub fn take_pending(&mut self) -> Option<(RowId, FieldMap)> {
        match std::mem::take(self) {
            EditSession::Idle => None,
            EditSession::Editing { row_id, pending } => Some((row_id, pending)),
        }
    }

    /// Discard the buffer without any remote call.
    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: i64, city: &str) -> Row {
        let mut row = Row::new();
        row.set("OrderID", json!(id));
        row.set("ShipCity", json!(city));
        row
    }

    #[test]
    fn begin_edit_seeds_pending_from_row() {
        let mut session = EditSession::default();
        session.begin_edit(RowId::Int(1), &row(1, "Reims"));
        assert!(session.is_editing(&RowId::Int(1)));
        assert_eq!(session.pending_value("ShipCity"), Some(&json!("Reims")));
    }

    #[test]
    fn at_most_one_row_is_ever_editing() {
        let mut session = EditSession::default();
        session.begin_edit(RowId::Int(1), &row(1, "Reims"));
        session.set_field("ShipCity", json!("London"));
        session.begin_edit(RowId::Int(2), &row(2, "Oslo"));

        assert!(!session.is_editing(&RowId::Int(1)));
        assert!(session.is_editing(&RowId::Int(2)));
        // Row 1's unsaved buffer is gone, not merged into row 2's
        assert_eq!(session.pending_value("ShipCity"), Some(&json!("Oslo")));
    }

    #[test]
    fn set_field_is_ignored_when_idle() {
        let mut session = EditSession::default();
        session.set_field("ShipCity", json!("London"));
        assert!(session.is_idle());
        assert_eq!(session.pending_value("ShipCity"), None);
    }

    #[test]
    fn take_pending_resets_to_idle() {
        let mut session = EditSession::default();
        session.begin_edit(RowId::Int(1), &row(1, "Reims"));
        session.set_field("ShipCity", json!("London"));

        let (id, pending) = session.take_pending().unwrap();
        assert_eq!(id, RowId::Int(1));
        assert_eq!(pending.get("ShipCity"), Some(&json!("London")));
        assert!(session.is_idle());
        assert!(session.take_pending().is_none());
    }

    #[test]
    fn cancel_discards_the_buffer() {
        let mut session = EditSession::default();
        session.begin_edit(RowId::Int(1), &row(1, "Reims"));
        session.set_field("ShipCity", json!("London"));
        session.cancel();
        assert!(session.is_idle());
        assert!(session.take_pending().is_none());
    }
}
