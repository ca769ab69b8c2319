//! TOML-based configuration for quarry.
//!
//! Example configuration:
//! ```toml
//! [render]
//! dialect = "postgres"
//! prepared_statements = true
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sql::{Dialect, RenderOptions, UnknownDialect};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "QUARRY_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "quarry.toml";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    UnknownDialect(#[from] UnknownDialect),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub render: RenderSettings,
}

/// Rendering defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Dialect name or alias (`pg`, `mssql`, ...).
    pub dialect: String,

    /// Emit placeholders; `false` inlines bind values.
    pub prepared_statements: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            dialect: Dialect::Generic.to_string(),
            prepared_statements: true,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        // Surface a bad dialect name at load time, not at first render
        settings.dialect()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load settings from `path`, or from the default locations.
    ///
    /// Without an explicit path, searches in order:
    /// 1. Environment variable `QUARRY_CONFIG`
    /// 2. `./quarry.toml`
    ///
    /// Falls back to defaults when no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        Ok(Settings::default())
    }

    /// The configured dialect.
    pub fn dialect(&self) -> Result<Dialect, SettingsError> {
        Ok(self.render.dialect.parse()?)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            prepared_statements: self.render.prepared_statements,
        }
    }
}
