//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::path::Path;

/// Builder for creating GraphweaveConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: GraphweaveConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: GraphweaveConfig::default(),
        }
    }

    /// Set the definitions directory.
    pub fn with_definitions_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.definitions.dir = path.as_ref().to_path_buf();
        self
    }

    /// Set the model identifier.
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.config.model.model_id = model_id.into();
        self
    }

    /// Point the engine at an OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.model.base_url = Some(url.into());
        self
    }

    /// Set the provider credential.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.model.api_key = Some(key.into());
        self
    }

    /// Toggle engine debug output.
    pub fn with_model_debug(mut self, debug: bool) -> Self {
        self.config.model.debug = debug;
        self
    }

    /// Set the prompt validation level (`off`, `warning`, `error`).
    pub fn with_prompt_validation_level(mut self, level: impl Into<String>) -> Self {
        self.config.engine.prompt_validation_level = level.into();
        self
    }

    /// Toggle schema-constrained output.
    pub fn with_schema_constraints(mut self, enabled: bool) -> Self {
        self.config.engine.use_schema_constraints = enabled;
        self
    }

    /// Set how many engine calls a batch keeps in flight.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.config.engine.max_concurrency = max;
        self
    }

    /// Set the preview canvas size.
    pub fn with_preview_size(mut self, width: impl Into<String>, height: impl Into<String>) -> Self {
        self.config.preview.width = width.into();
        self.config.preview.height = height.into();
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use default logging configuration (JSON lines on stdout at Info level)
    pub fn with_default_logging(mut self) -> Self {
        self.config.logging.level = LogLevel::Info;
        self.config.logging.format = LogFormat::Json;
        self.config.logging.file = None;
        self.config.logging.stdout = true;
        self
    }

    /// Create a configuration for development.
    ///
    /// Debug-level pretty logging and engine debug output.
    pub fn development() -> Self {
        Self::new()
            .with_log_level(LogLevel::Debug)
            .with_log_format(LogFormat::Pretty)
            .with_model_debug(true)
    }

    /// Create a configuration for testing.
    ///
    /// Development settings reading definitions from `./test_config`, one
    /// engine call at a time.
    pub fn testing() -> Self {
        Self::development()
            .with_definitions_dir("./test_config")
            .with_max_concurrency(1)
    }

    /// Create a production configuration.
    ///
    /// JSON logging at Info level, prompt validation raised to `warning`.
    pub fn production() -> Self {
        Self::new()
            .with_default_logging()
            .with_prompt_validation_level("warning")
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<GraphweaveConfig> {
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
