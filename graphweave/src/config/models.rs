//! Configuration model definitions.
//!
//! This module contains the configuration structures for all Graphweave components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Main configuration structure for Graphweave.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GraphweaveConfig {
    /// Where strategy, schema and template definitions live
    pub definitions: DefinitionsConfig,

    /// Language model settings handed to the extraction engine
    pub model: ModelConfig,

    /// Extraction engine call defaults
    pub engine: EngineConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// HTML preview page settings
    pub preview: PreviewConfig,
}

/// Location of the definition files.
///
/// The directory is expected to hold `strategies/`, `schemas/` and
/// `templates/`; any of them may be missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DefinitionsConfig {
    /// Root definitions directory
    pub dir: PathBuf,
}

impl Default for DefinitionsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./config"),
        }
    }
}

impl DefinitionsConfig {
    /// Directory holding `<name>.yaml` strategy definitions
    pub fn strategies_dir(&self) -> PathBuf {
        self.dir.join("strategies")
    }

    /// Directory holding `entities.yaml` and `relations.yaml`
    pub fn schemas_dir(&self) -> PathBuf {
        self.dir.join("schemas")
    }

    /// Directory holding `<name>.hbs` prompt templates
    pub fn templates_dir(&self) -> PathBuf {
        self.dir.join("templates")
    }
}

/// Language model settings.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier understood by the engine's provider
    pub model_id: String,

    /// OpenAI-compatible endpoint, if not the provider default
    pub base_url: Option<String>,

    /// Provider credential
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Ask the engine for debug output
    pub debug: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: "gpt-4o-mini".to_string(),
            base_url: None,
            api_key: None,
            debug: false,
        }
    }
}

// The credential never reaches logs
impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("model_id", &self.model_id)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("debug", &self.debug)
            .finish()
    }
}

/// Prompt validation levels the engine accepts
pub const PROMPT_VALIDATION_LEVELS: &[&str] = &["off", "warning", "error"];

/// Extraction engine call defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Ask the model to wrap output in code fences
    pub fence_output: bool,

    /// Constrain model output with a generated schema
    pub use_schema_constraints: bool,

    /// One of `off`, `warning`, `error`
    pub prompt_validation_level: String,

    /// Engine calls in flight during a batch extraction
    pub max_concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fence_output: true,
            use_schema_constraints: false,
            prompt_validation_level: "off".to_string(),
            max_concurrency: 4,
        }
    }
}

/// HTML preview page settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Canvas width, any CSS length
    pub width: String,

    /// Canvas height, any CSS length
    pub height: String,

    /// Page background color
    pub bgcolor: String,

    /// Node caption color
    pub font_color: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: "100%".to_string(),
            height: "600px".to_string(),
            bgcolor: "#ffffff".to_string(),
            font_color: "#000000".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,

    /// Log format
    pub format: LogFormat,

    /// File to log to (if any)
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level
    Trace,

    /// Debug level
    Debug,

    /// Info level
    Info,

    /// Warn level
    Warn,

    /// Error level
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {}", s)),
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default format
    Default,

    /// JSON format
    Json,

    /// Compact format
    Compact,

    /// Pretty format
    Pretty,
}
