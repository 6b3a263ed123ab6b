//! Extraction: from a request to an engine call and back.
//!
//! [`ExtractionOrchestrator`] resolves a strategy, derives sampling
//! parameters and composes the prompt into an [`EngineCallSpec`].
//! [`Extractor`] hands that to an [`ExtractionEngine`] and optionally takes
//! the result on to a graph.

mod engine;
mod examples;
mod extractor;
mod orchestrator;
mod params;
mod prompt;
mod types;

pub use engine::{EngineRequest, ExtractionEngine};
pub use examples::default_examples;
pub use extractor::{Extractor, GraphExtraction};
pub use orchestrator::{
    CUSTOM_STRATEGY_NAME, DEFAULT_ENTITIES, DEFAULT_RELATIONS, EngineCallSpec,
    ExtractionOrchestrator, ExtractionRequest, FALLBACK_STRATEGY_NAME,
};
pub use params::{CallParameters, derive_parameters};
pub use prompt::{PromptComposer, TEMPLATE_EXTENSION};
pub use types::*;
