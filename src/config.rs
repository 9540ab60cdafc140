//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Local config: `<dir>/.orgtree.toml` (working directory by default)
//! 4. Environment variables: `ORGTREE_*` prefix, `__` between section and key;
//!    a set but unparseable variable is a config error
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{
    SalaryPolicy, DEFAULT_MAXIMUM_PERCENTAGE, DEFAULT_MINIMUM_PERCENTAGE,
    DEFAULT_REPORTING_LINES_THRESHOLD,
};
use crate::tree_traits::DEFAULT_TREE_DEPTH;

/// Default input file looked up when none is given.
pub const STANDARD_FILENAME: &str = "SampleData.csv";

/// Report parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// Minimum salary premium over the subordinate average, in percent
    pub minimum_percentage: i32,
    /// Maximum salary premium over the subordinate average, in percent
    pub maximum_percentage: i32,
    /// Deepest allowed reporting line below the CEO
    pub reporting_lines_threshold: i32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            minimum_percentage: DEFAULT_MINIMUM_PERCENTAGE,
            maximum_percentage: DEFAULT_MAXIMUM_PERCENTAGE,
            reporting_lines_threshold: DEFAULT_REPORTING_LINES_THRESHOLD,
        }
    }
}

impl ReportConfig {
    pub fn salary_policy(&self) -> SalaryPolicy {
        SalaryPolicy::new(self.minimum_percentage, self.maximum_percentage)
    }
}

/// CSV import behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ImportConfig {
    /// Whether the first row is a header
    pub has_header: bool,
    /// File read when no path is given on the command line
    pub default_file: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            has_header: true,
            default_file: PathBuf::from(STANDARD_FILENAME),
        }
    }
}

/// Console tree rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    /// Levels shown below the root; deeper subtrees are summarised
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_TREE_DEPTH,
        }
    }
}

/// Raw settings for intermediate parsing (fields are Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub report: RawReportConfig,
    pub import: RawImportConfig,
    pub tree: RawTreeConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawReportConfig {
    pub minimum_percentage: Option<i32>,
    pub maximum_percentage: Option<i32>,
    pub reporting_lines_threshold: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawImportConfig {
    pub has_header: Option<bool>,
    pub default_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeConfig {
    pub max_depth: Option<usize>,
}

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub report: ReportConfig,
    pub import: ImportConfig,
    pub tree: TreeConfig,
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".orgtree.toml")
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

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Value of an environment key; None when unset, an error when unparseable.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("ORGTREE_{}: {}", key.replace('.', "__").to_uppercase(), e),
        }),
    }
}

/// Expand `~`, `$VAR` and `${VAR}` in a path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    /// Overlay values that are set in `raw`.
    fn merge_with(&self, raw: &RawSettings) -> Self {
        Self {
            report: ReportConfig {
                minimum_percentage: raw
                    .report
                    .minimum_percentage
                    .unwrap_or(self.report.minimum_percentage),
                maximum_percentage: raw
                    .report
                    .maximum_percentage
                    .unwrap_or(self.report.maximum_percentage),
                reporting_lines_threshold: raw
                    .report
                    .reporting_lines_threshold
                    .unwrap_or(self.report.reporting_lines_threshold),
            },
            import: ImportConfig {
                has_header: raw.import.has_header.unwrap_or(self.import.has_header),
                default_file: raw
                    .import
                    .default_file
                    .clone()
                    .unwrap_or_else(|| self.import.default_file.clone()),
            },
            tree: TreeConfig {
                max_depth: raw.tree.max_depth.unwrap_or(self.tree.max_depth),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Directory searched for `.orgtree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.import.default_file = expand_path(&current.import.default_file);

        Ok(current)
    }

    /// Apply ORGTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ORGTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Some(val) = env_value(&config, "report.minimum_percentage")? {
            settings.report.minimum_percentage = val;
        }
        if let Some(val) = env_value(&config, "report.maximum_percentage")? {
            settings.report.maximum_percentage = val;
        }
        if let Some(val) = env_value(&config, "report.reporting_lines_threshold")? {
            settings.report.reporting_lines_threshold = val;
        }
        if let Some(val) = env_value(&config, "import.has_header")? {
            settings.import.has_header = val;
        }
        if let Some(val) = env_value::<String>(&config, "import.default_file")? {
            settings.import.default_file = PathBuf::from(val);
        }
        if let Some(val) = env_value(&config, "tree.max_depth")? {
            settings.tree.max_depth = val;
        }

        Ok(settings)
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unset_values() {
        let raw: RawSettings = toml::from_str(
            r#"
[report]
maximum_percentage = 40
"#,
        )
        .unwrap();

        let merged = Settings::default().merge_with(&raw);

        assert_eq!(merged.report.minimum_percentage, 20);
        assert_eq!(merged.report.maximum_percentage, 40);
        assert_eq!(merged.report.reporting_lines_threshold, 4);
        assert!(merged.import.has_header);
    }

    #[test]
    fn given_defaults_when_building_policy_then_uses_defaults() {
        assert_eq!(
            Settings::default().report.salary_policy(),
            SalaryPolicy::default()
        );
    }
}
