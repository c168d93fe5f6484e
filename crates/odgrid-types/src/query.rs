use serde::{Deserialize, Serialize};

/// One sort criterion; part of an ordered multi-key sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

/// Ordered sort criteria, applied left-to-right as a stable multi-key
/// sort or rendered to an `$orderby` clause.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortState {
    keys: Vec<SortKey>,
}

impl SortState {
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Current direction for a field: None when unsorted, otherwise
    /// whether the sort is descending.
    pub fn direction(&self, field: &str) -> Option<bool> {
        self.keys
            .iter()
            .find(|k| k.field == field)
            .map(|k| k.descending)
    }

    /// Append a criterion without touching existing ones.
    pub fn push(&mut self, field: impl Into<String>, descending: bool) {
        self.keys.push(SortKey {
            field: field.into(),
            descending,
        });
    }

    /// Single-click sort cycle: unsorted -> ascending -> descending ->
    /// unsorted. Toggling the same column flips the direction in place and
    /// never duplicates the key; toggling a different column resets all
    /// prior criteria.
    pub fn toggle(&mut self, field: &str) {
        let current = if self.keys.len() == 1 && self.keys[0].field == field {
            Some(self.keys[0].descending)
        } else {
            None
        };
        self.keys.clear();
        match current {
            None => self.push(field, false),
            Some(false) => self.push(field, true),
            Some(true) => {} // back to unsorted
        }
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// `$orderby` clause, e.g. `OrderDate desc,Freight asc`.
    pub fn to_orderby(&self) -> Option<String> {
        if self.keys.is_empty() {
            return None;
        }
        let clause = self
            .keys
            .iter()
            .map(|k| {
                format!(
                    "{} {}",
                    k.field,
                    if k.descending { "desc" } else { "asc" }
                )
            })
            .collect::<Vec<_>>()
            .join(",");
        Some(clause)
    }
}

/// Per-field predicate values, AND-combined into a `$filter` clause.
///
/// Matching is exact and case-sensitive; that contract is shared by the
/// query translation here and the in-process pipeline evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterState {
    predicates: indexmap::IndexMap<String, String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.predicates.get(field).map(String::as_str)
    }

    /// Set a field predicate; an empty value removes it.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        if value.is_empty() {
            self.predicates.shift_remove(&field);
        } else {
            self.predicates.insert(field, value);
        }
    }

    pub fn clear(&mut self) {
        self.predicates.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.predicates.iter()
    }

    /// `$filter` clause, e.g. `ShipCity eq 'London' and ShipCountry eq 'UK'`.
    pub fn to_filter(&self) -> Option<String> {
        if self.predicates.is_empty() {
            return None;
        }
        let clause = self
            .predicates
            .iter()
            .map(|(field, value)| format!("{} eq '{}'", field, value.replace('\'', "''")))
            .collect::<Vec<_>>()
            .join(" and ");
        Some(clause)
    }
}

/// Render sort and filter state to OData query parameters.
pub fn to_query_params(sort: &SortState, filter: &FilterState) -> Vec<(String, String)> {
    let mut params = Vec::new();
    if let Some(orderby) = sort.to_orderby() {
        params.push(("$orderby".to_string(), orderby));
    }
    if let Some(clause) = filter.to_filter() {
        params.push(("$filter".to_string(), clause));
    }
    params
}
