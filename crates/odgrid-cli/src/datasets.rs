//! Built-in dataset definitions for the Northwind sample service.

use odgrid_types::{ColumnSpec, DatasetSpec, InputKind, LookupSpec};
use once_cell::sync::Lazy;

static BUILTIN: Lazy<Vec<DatasetSpec>> = Lazy::new(|| vec![orders(), suppliers()]);

pub fn builtin(name: &str) -> Option<DatasetSpec> {
    BUILTIN.iter().find(|d| d.name == name).cloned()
}

pub fn default_builtin() -> DatasetSpec {
    BUILTIN[0].clone()
}

pub fn builtin_names() -> Vec<&'static str> {
    BUILTIN.iter().map(|d| d.name.as_str()).collect()
}

fn orders() -> DatasetSpec {
    DatasetSpec {
        name: "orders".to_string(),
        resource: "Orders".to_string(),
        id_field: "OrderID".to_string(),
        columns: vec![
            ColumnSpec::new("OrderID", "Order ID").with_width(8),
            ColumnSpec::new("CustomerID", "Customer")
                .editable()
                .with_input(InputKind::Select { options: vec![] })
                .with_width(24),
            ColumnSpec::new("EmployeeID", "Employee")
                .editable()
                .with_input(InputKind::Select { options: vec![] })
                .with_width(18),
            ColumnSpec::new("OrderDate", "Order Date")
                .editable()
                .with_input(InputKind::Date)
                .with_width(12),
            ColumnSpec::new("Freight", "Freight")
                .editable()
                .with_input(InputKind::Number)
                .with_width(10),
            ColumnSpec::new("ShipCity", "Ship City").editable().with_width(14),
        ],
        lookups: vec![
            LookupSpec {
                field: "CustomerID".to_string(),
                resource: "Customers".to_string(),
                key_field: "CustomerID".to_string(),
                label_fields: vec!["CompanyName".to_string()],
            },
            LookupSpec {
                field: "EmployeeID".to_string(),
                resource: "Employees".to_string(),
                key_field: "EmployeeID".to_string(),
                label_fields: vec!["FirstName".to_string(), "LastName".to_string()],
            },
        ],
    }
}

fn suppliers() -> DatasetSpec {
    DatasetSpec {
        name: "suppliers".to_string(),
        resource: "Suppliers".to_string(),
        id_field: "SupplierID".to_string(),
        columns: vec![
            ColumnSpec::new("SupplierID", "Supplier ID").with_width(11),
            ColumnSpec::new("CompanyName", "Company").editable().with_width(28),
            ColumnSpec::new("ContactName", "Contact").editable().with_width(20),
            ColumnSpec::new("City", "City").editable().with_width(14),
        ],
        lookups: vec![],
    }
}
