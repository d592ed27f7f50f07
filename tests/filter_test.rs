//! Tests for level and subtree filtering and the session built on it

use rstest::rstest;

use objtree::application::{ApplicationError, Session};
use objtree::domain::{
    DomainError, LevelRange, ObjectRecord, RootSelector, Table, TableFilter, ALL,
};

fn scenario() -> Vec<ObjectRecord> {
    vec![
        ObjectRecord::new("A", "obj").with_score("s", Some(1.0)),
        ObjectRecord::new("B", "A").with_level(1),
        ObjectRecord::new("C", "B").with_level(2).with_score("s", Some(2.0)),
    ]
}

fn names(table: &Table) -> Vec<&str> {
    table.rows().iter().map(|r| r.name.as_str()).collect()
}

fn wide() -> Table {
    Table::from_records(&[
        ObjectRecord::new("r0", "obj").with_level(0),
        ObjectRecord::new("r1", "r0").with_level(1),
        ObjectRecord::new("r2", "r1").with_level(2),
        ObjectRecord::new("r3", "r2").with_level(3),
        ObjectRecord::new("s1", "obj").with_level(1),
        ObjectRecord::new("s2", "s1").with_level(2),
    ])
}

#[rstest]
#[case(0, 0)]
#[case(0, 3)]
#[case(1, 2)]
#[case(2, 2)]
#[case(3, 7)]
fn given_level_range_when_filtering_then_keeps_exactly_rows_in_range(
    #[case] min: u32,
    #[case] max: u32,
) {
    // Arrange
    let table = wide();
    let filter = TableFilter::new(LevelRange::new(min, max).unwrap(), RootSelector::All);

    // Act
    let filtered = filter.apply(&table);

    // Assert
    let expected: Vec<_> = table
        .rows()
        .iter()
        .filter(|r| min <= r.level && r.level <= max)
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names(&filtered), expected);
}

#[test]
fn given_range_from_zero_to_observed_max_when_filtering_then_returns_full_table() {
    let table = wide();
    let (_, max) = table.level_bounds().unwrap();

    let filtered = TableFilter::new(LevelRange::new(0, max).unwrap(), RootSelector::All).apply(&table);

    assert_eq!(filtered, table);
}

#[test]
fn given_level_filter_and_root_when_filtering_then_returns_intersection() {
    // Arrange
    let table = Table::from_records(&scenario());
    let filter = TableFilter::new(LevelRange::new(0, 1).unwrap(), RootSelector::from("A"));

    // Act
    let filtered = filter.apply(&table);

    // Assert: C is in A's subtree but outside the level range
    assert_eq!(names(&filtered), vec!["A", "B"]);
}

#[test]
fn given_root_outside_level_range_when_filtering_then_subtree_is_resolved_over_full_table() {
    // r1 is excluded by level, yet r2 and r3 still belong to r0's subtree
    let table = wide();
    let filter = TableFilter::new(LevelRange::new(2, 3).unwrap(), RootSelector::from("r0"));

    let filtered = filter.apply(&table);

    assert_eq!(names(&filtered), vec!["r2", "r3"]);
}

#[test]
fn given_filter_when_applied_then_score_columns_are_kept() {
    let table = Table::from_records(&scenario());
    let filter = TableFilter::new(LevelRange::new(1, 1).unwrap(), RootSelector::All);

    let filtered = filter.apply(&table);

    assert_eq!(names(&filtered), vec!["B"]);
    assert_eq!(filtered.score_columns(), table.score_columns());
}

#[test]
fn given_min_above_max_when_building_range_then_errors() {
    assert_eq!(
        LevelRange::new(3, 1),
        Err(DomainError::InvalidLevelRange { min: 3, max: 1 })
    );
}

#[test]
fn given_all_literal_when_parsing_selector_then_is_all() {
    assert_eq!(RootSelector::from(ALL), RootSelector::All);
    assert_eq!("All".parse::<RootSelector>().unwrap(), RootSelector::All);
    assert_eq!(
        RootSelector::from("A"),
        RootSelector::Node("A".to_string())
    );
    assert_eq!(RootSelector::from("A").to_string(), "A");
}

#[test]
fn given_session_when_no_bounds_given_then_range_is_zero_to_observed_max() {
    let session = Session::new(scenario());

    let range = session.level_range(None, None).unwrap();

    assert_eq!((range.min(), range.max()), (0, 2));
}

#[test]
fn given_session_when_bounds_inverted_then_domain_error() {
    let session = Session::new(scenario());

    let result = session.level_range(Some(2), Some(1));

    assert!(matches!(
        result,
        Err(ApplicationError::Domain(DomainError::InvalidLevelRange { .. }))
    ));
}

#[test]
fn given_session_when_listing_father_options_then_all_first_then_sorted_fathers_in_range() {
    let session = Session::new(scenario());

    let all_levels = session.level_range(None, None).unwrap();
    assert_eq!(session.father_options(all_levels), vec!["All", "A", "B", "obj"]);

    let low = LevelRange::new(0, 1).unwrap();
    assert_eq!(session.father_options(low), vec!["All", "A", "obj"]);
}

#[test]
fn given_session_when_checking_roots_then_names_and_fathers_are_accepted() {
    let session = Session::new(scenario());

    assert!(session.check_root(&RootSelector::All).is_ok());
    assert!(session.check_root(&RootSelector::from("C")).is_ok());
    assert!(session.check_root(&RootSelector::from("obj")).is_ok());
    assert!(matches!(
        session.check_root(&RootSelector::from("nobody")),
        Err(ApplicationError::Domain(DomainError::UnknownRoot(_)))
    ));
}
