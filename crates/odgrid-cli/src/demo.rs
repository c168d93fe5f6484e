//! Sample Northwind data served by the in-process gateway.
//!
//! `--demo` runs every command against this fixed snapshot, which is also
//! what the integration tests exercise.

use odgrid_engine::LocalGateway;
use odgrid_types::Row;
use serde_json::json;

pub fn gateway() -> LocalGateway {
    LocalGateway::new()
        .with_table("Orders", "OrderID", orders())
        .with_table("Customers", "CustomerID", customers())
        .with_table("Employees", "EmployeeID", employees())
        .with_table("Suppliers", "SupplierID", suppliers())
}

fn order(
    id: i64,
    customer: &str,
    employee: i64,
    date: &str,
    freight: f64,
    city: &str,
) -> Row {
    // Field insertion order is display order, so keep it fixed
    let mut row = Row::new();
    row.set("OrderID", json!(id));
    row.set("CustomerID", json!(customer));
    row.set("EmployeeID", json!(employee));
    row.set("OrderDate", json!(date));
    row.set("Freight", json!(freight));
    row.set("ShipCity", json!(city));
    row
}

fn orders() -> Vec<Row> {
    vec![
        order(10248, "VINET", 5, "1996-07-04", 32.38, "Reims"),
        order(10249, "TOMSP", 6, "1996-07-05", 11.61, "Muenster"),
        order(10250, "HANAR", 4, "1996-07-08", 65.83, "Rio de Janeiro"),
        order(10251, "VICTE", 3, "1996-07-08", 41.34, "Lyon"),
        order(10252, "AROUT", 4, "1996-07-09", 51.3, "London"),
        order(10253, "HANAR", 3, "1996-07-10", 58.17, "Rio de Janeiro"),
        order(10254, "AROUT", 5, "1996-07-11", 22.98, "London"),
        order(10255, "VINET", 9, "1996-07-12", 148.33, "Reims"),
    ]
}

fn customer(id: &str, company: &str, city: &str) -> Row {
    let mut row = Row::new();
    row.set("CustomerID", json!(id));
    row.set("CompanyName", json!(company));
    row.set("City", json!(city));
    row
}

fn customers() -> Vec<Row> {
    vec![
        customer("VINET", "Vins et alcools Chevalier", "Reims"),
        customer("TOMSP", "Toms Spezialitaeten", "Muenster"),
        customer("HANAR", "Hanari Carnes", "Rio de Janeiro"),
        customer("VICTE", "Victuailles en stock", "Lyon"),
        customer("AROUT", "Around the Horn", "London"),
    ]
}

fn employee(id: i64, first: &str, last: &str) -> Row {
    let mut row = Row::new();
    row.set("EmployeeID", json!(id));
    row.set("FirstName", json!(first));
    row.set("LastName", json!(last));
    row
}

fn employees() -> Vec<Row> {
    vec![
        employee(3, "Janet", "Leverling"),
        employee(4, "Margaret", "Peacock"),
        employee(5, "Steven", "Buchanan"),
        employee(6, "Michael", "Suyama"),
        employee(9, "Anne", "Dodsworth"),
    ]
}

fn supplier(id: i64, company: &str, contact: &str, city: &str) -> Row {
    let mut row = Row::new();
    row.set("SupplierID", json!(id));
    row.set("CompanyName", json!(company));
    row.set("ContactName", json!(contact));
    row.set("City", json!(city));
    row
}

fn suppliers() -> Vec<Row> {
    vec![
        supplier(1, "Exotic Liquids", "Charlotte Cooper", "London"),
        supplier(2, "New Orleans Cajun Delights", "Shelley Burke", "New Orleans"),
        supplier(3, "Grandma Kelly's Homestead", "Regina Murphy", "Ann Arbor"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use odgrid_types::{FilterState, Gateway, SortState};

    #[tokio::test]
    async fn every_order_customer_resolves_against_the_customer_table() {
        let gw = gateway();
        let customers = gw
            .list("Customers", &SortState::default(), &FilterState::default())
            .await
            .unwrap();
        for order in gw
            .list("Orders", &SortState::default(), &FilterState::default())
            .await
            .unwrap()
        {
            let key = order.get("CustomerID").unwrap();
            assert!(
                customers.iter().any(|c| c.get("CustomerID") == Some(key)),
                "order references unknown customer {}",
                key
            );
        }
    }
}
