//! Configuration module for quarry.
//!
//! Handles the `quarry.toml` settings file.

mod settings;

pub use settings::{
    RenderSettings, Settings, SettingsError, CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE,
};
