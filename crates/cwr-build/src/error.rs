use cwr_config::ConfigError;
use cwr_format::TemplateError;

/// Problems that stop a builder from being constructed.
///
/// Row data never produces an error; it produces generation notes.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("record layout is misconfigured: {0}")]
    Template(#[from] TemplateError),

    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),
}
