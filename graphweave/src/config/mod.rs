//! Settings for graphweave: where strategy definitions live, which model the
//! engine should call, engine switches, logging and preview page size.
//!
//! Sources are merged in order, later ones winning:
//! 1. [`GraphweaveConfig::default`]
//! 2. the first settings file from [`DEFAULT_CONFIG_FILES`] (or the platform
//!    config directory) that exists
//! 3. environment variables starting with [`ENV_PREFIX`], with `__` between
//!    nested keys, e.g. `GRAPHWEAVE_ENGINE__MAX_CONCURRENCY=8`

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;

/// Settings files looked up relative to the working directory, in order
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "graphweave.toml",
    "graphweave.yaml",
    "graphweave.yml",
    "graphweave.json",
    ".graphweave/config.toml",
    ".graphweave/config.yaml",
    ".graphweave/config.yml",
    ".graphweave/config.json",
];

pub const ENV_PREFIX: &str = "GRAPHWEAVE_";

/// Why graphweave settings could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A settings file, named explicitly or found by lookup, is missing or unreadable
    #[error("settings file unavailable: {0}")]
    FileLoadError(String),

    /// A `GRAPHWEAVE_*` variable could not be applied
    #[error("bad GRAPHWEAVE_ environment setting: {0}")]
    EnvLoadError(String),

    /// Settings merged fine but break a rule, e.g. `engine.max_concurrency = 0`
    #[error("invalid graphweave settings: {0}")]
    ValidationError(String),

    /// Merged settings do not fit the [`GraphweaveConfig`] shape
    #[error("graphweave settings do not match the expected shape: {0}")]
    ParseError(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
