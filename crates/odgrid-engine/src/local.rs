//! In-process gateway over an in-memory table set.
//!
//! Backs the CLI's demo mode and the test suites with a deterministic
//! remote. Sorting and filtering run through the engine pipeline, so the
//! behavior matches what a conforming OData server returns for the same
//! translated query.

use std::cell::{Cell, RefCell};

use indexmap::IndexMap;
use odgrid_types::{
    FieldMap, FilterState, Gateway, GatewayError, Result, Row, RowId, SortState,
};
use serde_json::Value;

use crate::pipeline;

#[derive(Debug, Clone)]
struct Table {
    id_field: String,
    rows: Vec<Row>,
}

/// A fake remote: whole tables held in memory, single-threaded interior
/// mutability, injectable write failures for error-path tests.
#[derive(Debug, Default)]
pub struct LocalGateway {
    tables: RefCell<IndexMap<String, Table>>,
    fail_writes: Cell<bool>,
    calls: RefCell<Vec<String>>,
}

impl LocalGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(
        self,
        resource: impl Into<String>,
        id_field: impl Into<String>,
        rows: Vec<Row>,
    ) -> Self {
        self.tables.borrow_mut().insert(
            resource.into(),
            Table {
                id_field: id_field.into(),
                rows,
            },
        );
        self
    }

    /// Make every subsequent write fail with HTTP 500.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Every operation issued so far, e.g. `PATCH Orders(10248)`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Current table contents, unsorted and unfiltered.
    pub fn table_rows(&self, resource: &str) -> Vec<Row> {
        self.tables
            .borrow()
            .get(resource)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.get() {
            return Err(GatewayError::RemoteWrite {
                status: 500,
                body: "injected write failure".to_string(),
            });
        }
        Ok(())
    }

    fn next_int_id(table: &Table) -> i64 {
        table
            .rows
            .iter()
            .filter_map(|r| match r.id(&table.id_field) {
                Some(RowId::Int(n)) => Some(n),
                _ => None,
            })
            .max()
            .unwrap_or(0)
            + 1
    }
}

impl Gateway for LocalGateway {
    async fn list(
        &self,
        resource: &str,
        sort: &SortState,
        filter: &FilterState,
    ) -> Result<Vec<Row>> {
        self.record(format!("GET {}", resource));
        let tables = self.tables.borrow();
        let table = tables
            .get(resource)
            .ok_or_else(|| GatewayError::Network(format!("unknown resource: {}", resource)))?;
        Ok(pipeline::row_model(table.rows.clone(), filter, sort))
    }

    async fn create(&self, resource: &str, fields: &FieldMap) -> Result<Row> {
        self.record(format!("POST {}", resource));
        self.check_writable()?;
        let mut tables = self.tables.borrow_mut();
        let table = tables
            .get_mut(resource)
            .ok_or_else(|| GatewayError::Network(format!("unknown resource: {}", resource)))?;

        let mut row = Row::new();
        if fields.get(&table.id_field).and_then(RowId::from_value).is_none() {
            row.set(table.id_field.clone(), Value::from(Self::next_int_id(table)));
        }
        for (field, value) in fields {
            row.set(field.clone(), value.clone());
        }
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, resource: &str, id: &RowId, fields: &FieldMap) -> Result<Row> {
        self.record(format!("PATCH {}({})", resource, id.to_key_literal()));
        self.check_writable()?;
        let mut tables = self.tables.borrow_mut();
        let table = tables
            .get_mut(resource)
            .ok_or_else(|| GatewayError::Network(format!("unknown resource: {}", resource)))?;

        let id_field = table.id_field.clone();
        let entry = table
            .rows
            .iter_mut()
            .find(|r| r.id(&id_field).as_ref() == Some(id))
            .ok_or_else(|| GatewayError::RemoteWrite {
                status: 404,
                body: format!("{}({}) not found", resource, id.to_key_literal()),
            })?;

        *entry = entry.merged(fields);
        Ok(entry.clone())
    }

    async fn delete(&self, resource: &str, id: &RowId) -> Result<()> {
        self.record(format!("DELETE {}({})", resource, id.to_key_literal()));
        self.check_writable()?;
        let mut tables = self.tables.borrow_mut();
        let table = tables
            .get_mut(resource)
            .ok_or_else(|| GatewayError::Network(format!("unknown resource: {}", resource)))?;

        let id_field = table.id_field.clone();
        // Repeating a delete is safe; absent rows are already gone
        table
            .rows
            .retain(|r| r.id(&id_field).as_ref() != Some(id));
        Ok(())
    }
}
