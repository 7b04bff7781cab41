//! Configuration for LabMix
//!
//! Read from `labmix.toml` in the data directory. Every field has a serde
//! default so a missing file, or a file with only the sections the user
//! cares about, just works.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::calculator::Strictness;
use crate::error::{LabError, LabResult};

const CONFIG_FILE: &str = "labmix.toml";

/// Environment variable overriding the data directory (used by tests and
/// portable installs)
pub const DATA_DIR_ENV: &str = "LABMIX_HOME";

/// Resolve the data directory: `LABMIX_HOME` if set, otherwise the
/// platform data dir, otherwise the current directory.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::data_dir()
        .map(|d| d.join("labmix"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub calculator: CalculatorConfig,
}

/// Outbound mirroring configuration
///
/// Both sinks are best-effort: a missing or unreachable endpoint never
/// fails a local operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Master switch for mirroring
    #[serde(default)]
    pub enabled: bool,

    /// Spreadsheet webhook endpoint (audit mirror)
    #[serde(default)]
    pub webhook_url: Option<String>,

    /// Remote table store base URL
    #[serde(default)]
    pub remote_url: Option<String>,

    /// Remote table store API key
    #[serde(default)]
    pub remote_key: Option<String>,
}

/// Calculator policy configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Whether calculation anomalies (unresolved reagent, over-specified
    /// protocol) are warnings or errors
    #[serde(default)]
    pub strictness: Strictness,
}

impl Config {
    /// Path of the config file inside a data directory
    pub fn path(data_dir: &Path) -> PathBuf {
        data_dir.join(CONFIG_FILE)
    }

    /// Load from `data_dir`; a missing file yields the defaults
    pub fn load(data_dir: &Path) -> LabResult<Self> {
        let path = Self::path(data_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(|e| LabError::InvalidConfig {
            path,
            message: e.to_string(),
        })
    }

    /// Save to `data_dir`, creating the directory if needed
    pub fn save(&self, data_dir: &Path) -> LabResult<()> {
        fs::create_dir_all(data_dir)?;
        let content = toml::to_string_pretty(self).map_err(|e| LabError::InvalidConfig {
            path: Self::path(data_dir),
            message: e.to_string(),
        })?;
        fs::write(Self::path(data_dir), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(!config.sync.enabled);
        assert_eq!(config.calculator.strictness, Strictness::Lenient);
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempdir().unwrap();
        fs::write(
            Config::path(dir.path()),
            "[calculator]\nstrictness = \"strict\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.calculator.strictness, Strictness::Strict);
        assert!(config.sync.webhook_url.is_none());
    }

    #[test]
    fn test_load_full_sync_section() {
        let dir = tempdir().unwrap();
        fs::write(
            Config::path(dir.path()),
            r#"
[sync]
enabled = true
webhook_url = "https://example.test/exec"
remote_url = "https://db.example.test"
remote_key = "anon-key"
"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert!(config.sync.enabled);
        assert_eq!(
            config.sync.webhook_url.as_deref(),
            Some("https://example.test/exec")
        );
        assert_eq!(config.sync.remote_key.as_deref(), Some("anon-key"));
    }

    #[test]
    fn test_invalid_toml_errors() {
        let dir = tempdir().unwrap();
        fs::write(Config::path(dir.path()), "sync = [broken").unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(LabError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_save_round_trips() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.sync.enabled = true;
        config.calculator.strictness = Strictness::Strict;
        config.save(dir.path()).unwrap();

        let loaded = Config::load(dir.path()).unwrap();
        assert!(loaded.sync.enabled);
        assert_eq!(loaded.calculator.strictness, Strictness::Strict);
    }
}
