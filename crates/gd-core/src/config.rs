//! Configuration management for gigdesk

use crate::error::{GigDeskError, Result};
use crate::export::{CsvQuoting, ExportManager, DEFAULT_PREFIX};
use crate::flow::FlowTimings;
use crate::types::{ExportFormat, ReportPeriod};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variables holding the API base URL, first match wins
pub const API_URL_ENV_VARS: [&str; 3] = [
    "GIGDESK_API_URL",
    "NEXT_PUBLIC_API_URL",
    "EXPO_PUBLIC_API_URL",
];

/// Project-local configuration file
pub const LOCAL_CONFIG_PATH: &str = ".gigdesk/config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend settings
    pub api: ApiConfig,
    /// Export settings
    pub export: ExportConfig,
    /// Export dialog timings
    pub flow: FlowConfig,
    /// Search box settings
    pub search: SearchConfig,
}

/// Backend-related configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the REST backend
    pub base_url: Option<String>,
}

/// Export-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub default_format: ExportFormat,
    pub default_period: ReportPeriod,
    /// First segment of generated filenames
    pub filename_prefix: String,
    /// Directory exports are written to
    pub output_dir: PathBuf,
    /// Quoting of CSV and Excel output
    pub csv_quoting: CsvQuoting,
    /// Pretty-print JSON exports
    pub pretty_json: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: ExportFormat::Csv,
            default_period: ReportPeriod::Month,
            filename_prefix: DEFAULT_PREFIX.to_string(),
            output_dir: PathBuf::from("."),
            csv_quoting: CsvQuoting::Naive,
            pretty_json: true,
        }
    }
}

/// Export dialog timings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Pause before encoding starts
    pub simulated_delay_ms: u64,
    /// How long the success panel stays open
    pub success_display_ms: u64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: 1000,
            success_display_ms: 2000,
        }
    }
}

impl FlowConfig {
    pub fn timings(&self) -> FlowTimings {
        FlowTimings {
            simulated_delay: Duration::from_millis(self.simulated_delay_ms),
            success_display: Duration::from_millis(self.success_display_ms),
        }
    }
}

/// Search-related configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub page_size: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            page_size: 10,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(GigDeskError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| GigDeskError::from(e).with_context(format!("Invalid {}", path.display())))?;
        config.validate()?;
        debug!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Find and load the configuration
    ///
    /// Order: explicit path, project-local file, user config dir, defaults.
    /// Returns the file that was used, if any.
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidates = [Some(PathBuf::from(LOCAL_CONFIG_PATH)), Self::user_path()];
        for path in candidates.into_iter().flatten() {
            if path.exists() {
                return Ok((Self::load(&path)?, Some(path)));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok((Self::default(), None))
    }

    /// Per-user configuration file location
    pub fn user_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("id", "gigdesk", "gigdesk")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .or_else(|| dirs::home_dir().map(|home| home.join(".gigdesk").join("config.toml")))
    }

    /// Apply environment overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply environment overrides from a lookup function
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let found = API_URL_ENV_VARS.iter().find_map(|key| {
            lookup(key)
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (key, v))
        });

        if let Some((key, url)) = found {
            debug!("API base URL taken from {}", key);
            self.api.base_url = Some(url);
        }
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.export.filename_prefix.trim().is_empty() {
            return Err(GigDeskError::Config(
                "export.filename_prefix cannot be empty".to_string(),
            ));
        }
        let prefix = &self.export.filename_prefix;
        if prefix.contains(|c: char| c == '/' || c == '\\') {
            return Err(GigDeskError::Config(
                "export.filename_prefix cannot contain path separators".to_string(),
            ));
        }
        if self.search.page_size == 0 {
            return Err(GigDeskError::Config(
                "search.page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Export manager configured from the export section
    pub fn export_manager(&self) -> ExportManager {
        ExportManager::new()
            .with_prefix(self.export.filename_prefix.clone())
            .with_csv_quoting(self.export.csv_quoting)
            .with_compact_json(!self.export.pretty_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.export.default_format, ExportFormat::Csv);
        assert_eq!(config.export.filename_prefix, "admin-report");
        assert_eq!(config.flow.timings().simulated_delay, Duration::from_millis(1000));
        assert_eq!(config.search.debounce(), Duration::from_millis(500));
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = config.to_toml_string().unwrap();
        assert!(toml.contains("[export]"));
        assert!(toml.contains("[flow]"));
        assert!(toml.contains("default_format = \"csv\""));

        let config2: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config, config2);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[export]
default_format = "excel"
csv_quoting = "rfc4180"
"#,
        )
        .unwrap();
        assert_eq!(config.export.default_format, ExportFormat::Excel);
        assert_eq!(config.export.csv_quoting, CsvQuoting::Rfc4180);
        assert_eq!(config.export.filename_prefix, "admin-report");
        assert_eq!(config.flow.success_display_ms, 2000);
    }

    #[test]
    fn test_load_and_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        fs::write(&path, "[export]\nfilename_prefix = \"tax-report\"\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().export.filename_prefix, "tax-report");

        fs::write(&path, "[export]\nfilename_prefix = \"../up\"\n").unwrap();
        assert!(matches!(Config::load(&path), Err(GigDeskError::Config(_))));

        fs::write(&path, "[export\n").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_discover_explicit_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::discover(Some(&missing)),
            Err(GigDeskError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_env_override_order() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("NEXT_PUBLIC_API_URL", "https://web.example.com/api/"),
            ("EXPO_PUBLIC_API_URL", "https://mobile.example.com/api"),
        ]);
        let mut config = Config::default();
        config.apply_env_from(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("https://web.example.com/api")
        );
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let mut config = Config::default();
        config.api.base_url = Some("http://localhost:5000".to_string());
        config.apply_env_from(|key| (key == "GIGDESK_API_URL").then(|| "  ".to_string()));
        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:5000"));
    }
}
