//! Theme configuration file handling (`linkloom.toml`)
//!
//! ```toml
//! [sync]
//! endpoint = "https://api.example.com/pages/42/theme"
//! timeout_secs = 10
//!
//! [admin]
//! storage_path = "~/.local/share/linkloom/admin.json"
//!
//! [css]
//! token_prefix = "--tk-"
//! chrome_prefix = "--chrome-"
//! ```

use crate::chrome::CHROME_PREFIX;
use crate::error::ConfigError;
use crate::projection::TOKEN_PREFIX;
use linkloom_core::Namespace;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level theme configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub css: CssConfig,
}

/// Override bundle fetch settings
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SyncConfig {
    /// URL of the page's theme settings; no endpoint means defaults only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl SyncConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Admin chrome settings
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct AdminConfig {
    /// File backing the persisted chrome mode; in-memory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

/// Custom-property namespaces
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CssConfig {
    #[serde(default = "default_token_prefix")]
    pub token_prefix: String,
    #[serde(default = "default_chrome_prefix")]
    pub chrome_prefix: String,
}

fn default_token_prefix() -> String {
    TOKEN_PREFIX.to_string()
}

fn default_chrome_prefix() -> String {
    CHROME_PREFIX.to_string()
}

impl Default for CssConfig {
    fn default() -> Self {
        Self {
            token_prefix: default_token_prefix(),
            chrome_prefix: default_chrome_prefix(),
        }
    }
}

impl ThemeConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load `linkloom.toml` from a directory, falling back to defaults when absent
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join("linkloom.toml");
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!("ThemeConfig: no {} found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ThemeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Prefixes must be well formed and must not overlap
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tokens = Namespace::new(self.css.token_prefix.as_str());
        let chrome = Namespace::new(self.css.chrome_prefix.as_str());
        for namespace in [&tokens, &chrome] {
            namespace
                .validate()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        }
        if tokens.overlaps(&chrome) {
            return Err(ConfigError::Invalid(format!(
                "css prefixes '{}' and '{}' overlap",
                tokens.prefix(),
                chrome.prefix()
            )));
        }
        if self.sync.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "sync.timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Serialize back to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }
}
