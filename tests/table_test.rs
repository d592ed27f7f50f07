//! Tests for the tabular projection

use rstest::rstest;

use objtree::domain::record::{NO_DEFINITION, UNKNOWN};
use objtree::domain::{parse_records, ObjectRecord, Table};

fn scenario() -> Vec<ObjectRecord> {
    vec![
        ObjectRecord::new("A", "obj").with_score("s", Some(1.0)),
        ObjectRecord::new("B", "A").with_level(1),
        ObjectRecord::new("C", "B").with_level(2).with_score("s", Some(2.0)),
    ]
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
#[case(50)]
fn given_n_records_when_projecting_then_table_has_n_rows(#[case] n: usize) {
    // Arrange
    let records: Vec<_> = (0..n)
        .map(|i| ObjectRecord::new(format!("n{i}"), "obj"))
        .collect();

    // Act
    let table = Table::from_records(&records);

    // Assert
    assert_eq!(table.len(), n);
}

#[test]
fn given_records_when_projecting_then_input_order_is_preserved() {
    let table = Table::from_records(&scenario());

    let names: Vec<_> = table.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn given_different_score_keys_when_projecting_then_columns_are_union_in_first_seen_order() {
    // Arrange
    let records = vec![
        ObjectRecord::new("a", "obj").with_score("x", Some(1.0)),
        ObjectRecord::new("b", "obj")
            .with_score("y", Some(2.0))
            .with_score("x", Some(3.0)),
        ObjectRecord::new("c", "obj"),
    ];

    // Act
    let table = Table::from_records(&records);

    // Assert
    assert_eq!(table.score_columns(), &["x".to_string(), "y".to_string()]);
    assert_eq!(
        table.headers(),
        vec!["Name", "Father", "Definition", "Total Descendants", "Level", "x", "y"]
    );
    assert_eq!(table.len(), 3, "missing keys never drop rows");
}

#[test]
fn given_record_without_score_key_when_projecting_then_cell_is_empty() {
    let table = Table::from_records(&scenario());

    let b = &table.rows()[1];
    assert_eq!(b.score("s"), None);
    assert_eq!(b.cells(table.score_columns()).last().unwrap(), "");

    let c = &table.rows()[2];
    assert_eq!(c.score("s"), Some(2.0));
    assert_eq!(c.cells(table.score_columns()).last().unwrap(), "2");
}

#[test]
fn given_null_score_when_projecting_then_cell_is_empty() {
    let records = parse_records(r#"[{"name": "a", "scores": {"s": null}}]"#).unwrap();

    let table = Table::from_records(&records);

    assert_eq!(table.score_columns(), &["s".to_string()]);
    assert_eq!(table.rows()[0].score("s"), None);
}

#[test]
fn given_json_with_missing_fields_when_projecting_then_defaults_fill_cells() {
    let records = parse_records(r#"[{"scores": {"s": 0.5}}, {"name": "b", "level": 3}]"#).unwrap();

    let table = Table::from_records(&records);

    let first = &table.rows()[0];
    assert_eq!(first.name, UNKNOWN);
    assert_eq!(first.father, UNKNOWN);
    assert_eq!(first.definition, NO_DEFINITION);
    assert_eq!(first.total_descendants, 0);
    assert_eq!(first.level, 0);
    assert_eq!(table.rows()[1].level, 3);
}

#[test]
fn given_duplicate_names_when_projecting_then_rows_are_not_deduplicated() {
    let records = vec![ObjectRecord::new("a", "obj"), ObjectRecord::new("a", "obj")];

    let table = Table::from_records(&records);

    assert_eq!(table.len(), 2);
}

#[test]
fn given_records_when_asking_level_bounds_then_returns_observed_min_and_max() {
    let records = vec![
        ObjectRecord::new("a", "obj").with_level(2),
        ObjectRecord::new("b", "a").with_level(5),
        ObjectRecord::new("c", "a").with_level(3),
    ];

    let table = Table::from_records(&records);

    assert_eq!(table.level_bounds(), Some((2, 5)));
    assert_eq!(Table::from_records(&[]).level_bounds(), None);
}

#[test]
fn given_records_when_listing_fathers_then_sorted_and_unique() {
    let records = vec![
        ObjectRecord::new("b", "obj"),
        ObjectRecord::new("c", "b"),
        ObjectRecord::new("a", "obj"),
        ObjectRecord::new("d", "a"),
    ];

    let table = Table::from_records(&records);

    assert_eq!(table.fathers(), vec!["a", "b", "obj"]);
}
