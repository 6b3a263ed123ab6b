//! Configuration validation utilities.

use super::ConfigError;
use super::models::*;

/// Validate the entire configuration.
pub fn validate_config(config: &GraphweaveConfig) -> Result<(), ConfigError> {
    if config.definitions.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "definitions.dir is empty; point it at the folder holding strategies/, schemas/ and templates/".to_string(),
        ));
    }

    validate_model_config(&config.model)?;
    validate_engine_config(&config.engine)?;

    Ok(())
}

fn validate_model_config(config: &ModelConfig) -> Result<(), ConfigError> {
    if config.model_id.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "model.model_id is blank".to_string(),
        ));
    }

    if config
        .base_url
        .as_ref()
        .is_some_and(|url| url.trim().is_empty())
    {
        return Err(ConfigError::ValidationError(
            "model.base_url is set but blank".to_string(),
        ));
    }

    Ok(())
}

fn validate_engine_config(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.max_concurrency == 0 {
        return Err(ConfigError::ValidationError(
            "engine.max_concurrency must allow at least one extraction call".to_string(),
        ));
    }

    let level = config.prompt_validation_level.to_lowercase();
    if !PROMPT_VALIDATION_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "engine.prompt_validation_level '{}' is not one of: {}",
            config.prompt_validation_level,
            PROMPT_VALIDATION_LEVELS.join(", ")
        )));
    }

    Ok(())
}
