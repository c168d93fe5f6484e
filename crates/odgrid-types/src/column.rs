use serde::{Deserialize, Serialize};

/// One entry of a closed option set for enumerated input kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Choice {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// The edit control a cell presents, as a closed set.
///
/// Option lists live inside the enumerated variants, so "options present
/// iff the kind is enumerated" cannot be violated by construction. Adding
/// a kind is a compile-time exercise for every consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Number,
    Date,
    Email,
    Select {
        #[serde(default)]
        options: Vec<Choice>,
    },
    Radio {
        #[serde(default)]
        options: Vec<Choice>,
    },
}

impl InputKind {
    /// Options for enumerated kinds; empty for free-form kinds.
    pub fn options(&self) -> &[Choice] {
        match self {
            InputKind::Select { options } | InputKind::Radio { options } => options,
            InputKind::Text | InputKind::Number | InputKind::Date | InputKind::Email => &[],
        }
    }

    pub fn is_enumerated(&self) -> bool {
        matches!(self, InputKind::Select { .. } | InputKind::Radio { .. })
    }
}

/// Declarative mapping from a row field to display and edit behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub field: String,
    pub header: String,
    #[serde(default)]
    pub width: Option<u16>,
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub input: InputKind,
}

impl ColumnSpec {
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        ColumnSpec {
            field: field.into(),
            header: header.into(),
            width: None,
            editable: false,
            input: InputKind::Text,
        }
    }

    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    pub fn with_input(mut self, input: InputKind) -> Self {
        self.input = input;
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_form_kinds_carry_no_options() {
        assert!(InputKind::Text.options().is_empty());
        assert!(InputKind::Date.options().is_empty());
        assert!(!InputKind::Text.is_enumerated());
    }

    #[test]
    fn select_options_are_part_of_the_kind() {
        let kind = InputKind::Select {
            options: vec![Choice::new("ALFKI", "Alfreds Futterkiste")],
        };
        assert!(kind.is_enumerated());
        assert_eq!(kind.options().len(), 1);
        assert_eq!(kind.options()[0].value, "ALFKI");
    }

    #[test]
    fn column_deserializes_from_toml_with_defaults() {
        let column: ColumnSpec = toml::from_str(
            r#"
            field = "ShipCity"
            header = "Ship City"
            editable = true
            input = { kind = "text" }
            "#,
        )
        .unwrap();
        assert!(column.editable);
        assert_eq!(column.input, InputKind::Text);
        assert_eq!(column.width, None);
    }
}
