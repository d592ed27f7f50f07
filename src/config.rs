//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/objtree/objtree.toml`
//! 3. Local config: `<project_dir>/.objtree.toml`
//! 4. Environment variables: `OBJTREE_*` prefix (`__` separates sections)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::services::{GraphOptions, DEFAULT_EXPORT_FILE, DEFAULT_GRAPH_FILE};
use crate::application::ApplicationError;
use crate::domain::graph::{DEFAULT_PROBE_KEY, DEFAULT_ROOT_LABEL};
use crate::util::path::expand_env_vars;

/// Graph rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GraphSettings {
    /// File name of the rendered document
    pub file_name: String,
    /// CSS height of the network canvas
    pub height: String,
    /// CSS width of the network canvas
    pub width: String,
    /// Score key deciding whether tooltip scores are printed as numbers
    pub probe_key: String,
    /// Label of the implicit root node
    pub root_label: String,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_GRAPH_FILE.into(),
            height: "750px".into(),
            width: "100%".into(),
            probe_key: DEFAULT_PROBE_KEY.into(),
            root_label: DEFAULT_ROOT_LABEL.into(),
        }
    }
}

/// Raw graph settings for intermediate parsing (None = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawGraphSettings {
    pub file_name: Option<String>,
    pub height: Option<String>,
    pub width: Option<String>,
    pub probe_key: Option<String>,
    pub root_label: Option<String>,
}

impl GraphSettings {
    /// Merge overlay onto self: overlay wins where specified.
    pub fn merge(&self, overlay: &RawGraphSettings) -> Self {
        Self {
            file_name: overlay
                .file_name
                .clone()
                .unwrap_or_else(|| self.file_name.clone()),
            height: overlay.height.clone().unwrap_or_else(|| self.height.clone()),
            width: overlay.width.clone().unwrap_or_else(|| self.width.clone()),
            probe_key: overlay
                .probe_key
                .clone()
                .unwrap_or_else(|| self.probe_key.clone()),
            root_label: overlay
                .root_label
                .clone()
                .unwrap_or_else(|| self.root_label.clone()),
        }
    }

    pub fn options(&self) -> GraphOptions {
        GraphOptions {
            height: self.height.clone(),
            width: self.width.clone(),
            directed: true,
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub output_dir: Option<PathBuf>,
    pub export_file_name: Option<String>,
    #[serde(default)]
    pub graph: RawGraphSettings,
}

/// Unified configuration for objtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory receiving exports and rendered graphs (default: cwd)
    pub output_dir: PathBuf,
    /// File name of the CSV export
    pub export_file_name: String,
    /// Graph rendering settings
    pub graph: GraphSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            export_file_name: DEFAULT_EXPORT_FILE.into(),
            graph: GraphSettings::default(),
        }
    }
}

/// Get the XDG config directory for objtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "objtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("objtree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".objtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Default export location.
    pub fn export_path(&self) -> PathBuf {
        self.output_dir.join(&self.export_file_name)
    }

    /// Default graph document location.
    pub fn graph_path(&self) -> PathBuf {
        self.output_dir.join(&self.graph.file_name)
    }

    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.output_dir.to_string_lossy().as_ref());
        self.output_dir = PathBuf::from(expanded);
    }

    /// Merge overlay config onto self (base): overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            output_dir: overlay
                .output_dir
                .clone()
                .unwrap_or_else(|| self.output_dir.clone()),
            export_file_name: overlay
                .export_file_name
                .clone()
                .unwrap_or_else(|| self.export_file_name.clone()),
            graph: self.graph.merge(&overlay.graph),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply OBJTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("OBJTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("output_dir") {
            settings.output_dir = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("export_file_name") {
            settings.export_file_name = val;
        }
        if let Ok(val) = config.get_string("graph.file_name") {
            settings.graph.file_name = val;
        }
        if let Ok(val) = config.get_string("graph.height") {
            settings.graph.height = val;
        }
        if let Ok(val) = config.get_string("graph.width") {
            settings.graph.width = val;
        }
        if let Ok(val) = config.get_string("graph.probe_key") {
            settings.graph.probe_key = val;
        }
        if let Ok(val) = config.get_string("graph.root_label") {
            settings.graph.root_label = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# objtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/objtree/objtree.toml
#   Local:  <project_dir>/.objtree.toml
#   Env:    OBJTREE_* environment variables (e.g. OBJTREE_GRAPH__PROBE_KEY)

# Directory receiving exports and rendered graphs
# output_dir = "."

# File name of the CSV export
# export_file_name = "filtered_tree_structure.csv"

[graph]
# File name of the rendered graph
# file_name = "interactive_tree.html"

# Canvas size
# height = "750px"
# width = "100%"

# Score key deciding whether tooltip scores are printed as numbers
# probe_key = "clip_score_scores"

# Label of the implicit root node
# root_label = "obj"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_has_expected_names() {
        let settings = Settings::default();
        assert_eq!(settings.export_file_name, "filtered_tree_structure.csv");
        assert_eq!(settings.graph.file_name, "interactive_tree.html");
        assert_eq!(settings.graph.height, "750px");
        assert_eq!(settings.graph.width, "100%");
        assert_eq!(settings.graph.probe_key, "clip_score_scores");
        assert_eq!(settings.graph.root_label, "obj");
    }

    #[test]
    fn given_tilde_in_output_dir_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            output_dir: PathBuf::from("~/exports"),
            ..Settings::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let dir = settings.output_dir.to_string_lossy();
        assert!(dir.starts_with(&home), "output_dir should start with home dir: {}", dir);
        assert!(!dir.contains('~'));
    }

    #[test]
    fn given_partial_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let overlay = RawSettings {
            output_dir: None,
            export_file_name: Some("out.csv".to_string()),
            graph: RawGraphSettings {
                probe_key: Some("other".to_string()),
                ..RawGraphSettings::default()
            },
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.output_dir, PathBuf::from("."));
        assert_eq!(result.export_file_name, "out.csv");
        assert_eq!(result.graph.probe_key, "other");
        assert_eq!(result.graph.height, "750px");
    }

    #[test]
    fn given_settings_when_serialized_then_template_keys_match() {
        let toml = Settings::default().to_toml().expect("serialize");
        assert!(toml.contains("export_file_name"));
        assert!(toml.contains("[graph]"));
        assert!(toml.contains("probe_key"));
    }

    #[test]
    fn given_output_dir_when_building_paths_then_joins_file_names() {
        let settings = Settings {
            output_dir: PathBuf::from("/tmp/out"),
            ..Settings::default()
        };
        assert_eq!(
            settings.export_path(),
            PathBuf::from("/tmp/out/filtered_tree_structure.csv")
        );
        assert_eq!(
            settings.graph_path(),
            PathBuf::from("/tmp/out/interactive_tree.html")
        );
    }
}
