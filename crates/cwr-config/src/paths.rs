//! Config file resolution.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "CWR_CONFIG";

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config PATH`.
    File(PathBuf),
    /// The `CWR_CONFIG` environment variable.
    Environment(PathBuf),
    /// The configuration compiled into the binary.
    Embedded,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) | Self::Environment(path) => Some(path),
            Self::Embedded => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Environment(path) => write!(f, "{} (from {CONFIG_ENV_VAR})", path.display()),
            Self::Embedded => f.write_str("built-in defaults"),
        }
    }
}

/// Pick the config source.
///
/// Resolution order:
/// 1. an explicit path (`--config`)
/// 2. `env_value`, normally the `CWR_CONFIG` environment variable
/// 3. the embedded defaults
pub fn resolve_source(explicit: Option<&Path>, env_value: Option<OsString>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::File(path.to_path_buf());
    }
    match env_value {
        Some(value) if !value.is_empty() => ConfigSource::Environment(PathBuf::from(value)),
        _ => ConfigSource::Embedded,
    }
}
