//! Listing under server-evaluated sort and filter, against demo data.

use odgrid_testing::TestWorld;

#[test]
fn filter_narrows_to_matching_rows() {
    let world = TestWorld::new();

    let result = world
        .run_json(&["list", "--filter", "ShipCity=London"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let rows = result.json().unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row["ShipCity"], "London");
    }
}

#[test]
fn sort_descending_orders_by_the_field() {
    let world = TestWorld::new();

    let result = world.run_json(&["list", "--sort", "Freight:desc"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let rows = result.json().unwrap();
    let first = rows.as_array().unwrap().first().cloned().unwrap();
    assert_eq!(first["OrderID"], 10255);
}

#[test]
fn plain_output_resolves_lookup_labels() {
    let world = TestWorld::new();

    let result = world
        .run(&["list", "--filter", "ShipCity=London"])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    // CustomerID AROUT renders as its company name
    assert!(result.stdout().contains("Around the Horn"));
    assert!(result.stdout().contains("2 row(s)"));
}

#[test]
fn malformed_filter_is_rejected() {
    let world = TestWorld::new();

    let result = world.run(&["list", "--filter", "ShipCity"]).unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("expected Field=Value"));
}

#[test]
fn unknown_dataset_fails_cleanly() {
    let world = TestWorld::new();

    let result = world.run(&["--dataset", "nope", "list"]).unwrap();
    assert!(!result.success());
    assert!(result.stderr().contains("Unknown dataset"));
}
