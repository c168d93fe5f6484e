//! CSV export of the fetched rows.

use odgrid_testing::TestWorld;

#[test]
fn export_writes_header_plus_one_record_per_row() {
    let world = TestWorld::new();
    let output = world.path("orders.csv");

    let result = world
        .run(&["export", "--output", output.to_str().unwrap()])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("Exported 8 row(s)"));

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(
        lines[0],
        "OrderID,CustomerID,EmployeeID,OrderDate,Freight,ShipCity"
    );
    assert!(lines[1].starts_with("10248,VINET"));
}

#[test]
fn export_respects_filter_and_sort() {
    let world = TestWorld::new();
    let output = world.path("london.csv");

    let result = world
        .run(&[
            "export",
            "--output",
            output.to_str().unwrap(),
            "--filter",
            "ShipCity=London",
            "--sort",
            "Freight:desc",
        ])
        .unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());

    let content = std::fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("10252"));
    assert!(lines[2].starts_with("10254"));
}

#[test]
fn export_defaults_to_a_dataset_named_file() {
    let world = TestWorld::new();

    let result = world.run(&["export"]).unwrap();
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("orders.csv"));
    assert!(world.path("orders.csv").exists());
}
