//! Boundary to the external extraction engine.

use super::{AnnotatedDocument, EngineCallSpec};
use crate::Result;
use crate::config::{EngineConfig, ModelConfig};
use crate::strategy::ConfigBag;
use async_trait::async_trait;
use serde_json::Value;

/// An LLM-backed extraction engine.
///
/// Implementations take the assembled prompt, examples and text and return
/// the span-level records they found. Each call is independent.
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Run one extraction call.
    ///
    /// # Errors
    /// Implementations report their own failures as
    /// [`crate::GraphweaveError::Engine`].
    async fn extract(&self, request: &EngineRequest) -> Result<AnnotatedDocument>;
}

/// One engine call: the assembled contract plus model settings.
#[derive(Debug, Clone)]
pub struct EngineRequest {
    pub call: EngineCallSpec,
    pub model: ModelConfig,
    pub engine: EngineConfig,
}

impl EngineRequest {
    pub fn new(call: EngineCallSpec, model: ModelConfig, engine: EngineConfig) -> Self {
        Self {
            call,
            model,
            engine,
        }
    }

    /// Keyword options for the engine call.
    ///
    /// Engine defaults first, then the derived sampling parameters, then the
    /// caller's overrides; a later layer replaces an earlier one key by key.
    pub fn options(&self) -> ConfigBag {
        let mut options = ConfigBag::new();
        options.insert("fence_output".into(), self.engine.fence_output.into());
        options.insert(
            "use_schema_constraints".into(),
            self.engine.use_schema_constraints.into(),
        );
        options.insert(
            "prompt_validation_level".into(),
            self.engine.prompt_validation_level.clone().into(),
        );
        options.insert("debug".into(), self.model.debug.into());

        let parameters = self.call.parameters;
        options.insert("extraction_passes".into(), parameters.passes.into());
        options.insert(
            "max_char_buffer".into(),
            parameters.context_window_chars.into(),
        );
        options.insert("temperature".into(), Value::from(parameters.temperature));

        for (key, value) in &self.call.engine_overrides {
            options.insert(key.clone(), value.clone());
        }
        options
    }
}
