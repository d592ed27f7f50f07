//! Tests for layered settings loading

use std::path::PathBuf;

use tempfile::TempDir;

use objtree::application::ApplicationError;
use objtree::config::{local_config_path, Settings};

#[test]
fn given_local_config_when_loading_then_overrides_defaults() {
    // Arrange
    let temp = TempDir::new().unwrap();
    std::fs::write(
        local_config_path(temp.path()),
        r#"
export_file_name = "subset.csv"
output_dir = "/tmp/objtree-out"

[graph]
probe_key = "other_score"
"#,
    )
    .unwrap();

    // Act
    let settings = Settings::load(Some(temp.path())).unwrap();

    // Assert
    assert_eq!(settings.export_file_name, "subset.csv");
    assert_eq!(settings.graph.probe_key, "other_score");
    assert_eq!(settings.graph.root_label, "obj");
    assert_eq!(
        settings.export_path(),
        PathBuf::from("/tmp/objtree-out/subset.csv")
    );
}

#[test]
fn given_no_local_config_when_loading_then_uses_defaults() {
    let temp = TempDir::new().unwrap();

    let settings = Settings::load(Some(temp.path())).unwrap();

    assert_eq!(settings.export_file_name, "filtered_tree_structure.csv");
    assert_eq!(settings.graph.file_name, "interactive_tree.html");
}

#[test]
fn given_malformed_local_config_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();
    std::fs::write(local_config_path(temp.path()), "export_file_name = [").unwrap();

    let result = Settings::load(Some(temp.path()));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_template_when_parsed_then_yields_defaults() {
    let temp = TempDir::new().unwrap();
    std::fs::write(local_config_path(temp.path()), Settings::template()).unwrap();

    let settings = Settings::load(Some(temp.path())).unwrap();

    assert_eq!(settings.graph.height, "750px");
    assert_eq!(settings.graph.width, "100%");
}
