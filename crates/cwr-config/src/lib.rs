#![deny(unsafe_code)]

//! Settings for CWR generation.
//!
//! A configuration names the sender, the administrator that is paired with
//! every original publisher, the known publisher registry, society codes and
//! generation defaults. It is loaded once, validated, and then passed by
//! reference to the builder; nothing mutates it during a run.

pub mod error;
pub mod model;
pub mod paths;

use std::path::Path;

use tracing::{debug, info};

pub use crate::error::{ConfigError, Result};
pub use crate::model::{
    Administrator, CwrConfig, Defaults, KnownPublisher, Sender, TransactionType,
};
pub use crate::paths::{CONFIG_ENV_VAR, ConfigSource, resolve_source};

/// The built-in configuration text.
pub const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

impl CwrConfig {
    /// Parse and validate a TOML document. `origin` names it in errors.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self> {
        let config: CwrConfig = toml::from_str(text).map_err(|source| ConfigError::Toml {
            origin: origin.to_string(),
            source,
        })?;
        config.validate()?;
        debug!(
            origin,
            publishers = config.publishers.len(),
            societies = config.societies.len(),
            "parsed configuration"
        );
        Ok(config)
    }

    /// The built-in configuration.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG, "built-in defaults")
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_toml_str(&text, &path.display().to_string())
    }

    /// Render as TOML, e.g. to seed a custom config file.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|source| ConfigError::Serialize { source })
    }
}

/// Load from an explicit path, the `CWR_CONFIG` variable, or the embedded
/// defaults, in that order.
pub fn load_config(explicit: Option<&Path>) -> Result<(CwrConfig, ConfigSource)> {
    let source = resolve_source(explicit, std::env::var_os(CONFIG_ENV_VAR));
    let config = match source.path() {
        Some(path) => CwrConfig::load(path)?,
        None => CwrConfig::embedded()?,
    };
    info!(source = %source, "configuration loaded");
    Ok((config, source))
}
