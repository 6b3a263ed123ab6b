//! # Graphweave
//!
//! Strategy-driven configuration for an LLM-backed text-extraction engine, and
//! deterministic normalization of the engine's output into a property graph.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graphweave::prelude::*;
//! use std::sync::Arc;
//!
//! fn main() -> Result<()> {
//!     let store = Arc::new(StrategyStore::open("config"));
//!     let orchestrator = ExtractionOrchestrator::new(store, PromptComposer::new("config/templates"));
//!
//!     // Assemble the call contract for the external extraction engine
//!     let spec = orchestrator.run(&ExtractionRequest::new("ROMEO. But soft!").with_strategy("literary"))?;
//!     println!("{} passes, temperature {}", spec.parameters.passes, spec.parameters.temperature);
//!
//!     // Normalize whatever the engine returned into nodes and edges
//!     let graph = GraphNormalizer::new().normalize(&[], "doc-1");
//!     assert!(graph.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Strategy Store**: named extraction vocabularies and granularity knobs
//! - **Parameter Deriver / Prompt Composer**: sampling parameters and instruction text
//! - **Orchestrator**: the single call contract handed to the extraction engine
//! - **Graph Normalizer**: canonical nodes and edges with content-derived ids
//! - **Statements / Preview**: Cypher text and an interactive HTML page built from the graph

pub mod config;
pub mod extraction;
pub mod graph;
pub mod logging;
pub mod strategy;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    pub use crate::config::{ConfigBuilder, ConfigLoader, GraphweaveConfig, LogLevel};

    pub use crate::strategy::{
        Breadth, ContextScope, Depth, GranularityConfig, SchemaDescriptor, StrategyCache,
        StrategyConfig, StrategyStore,
    };

    pub use crate::extraction::{
        AnnotatedDocument, CallParameters, EngineCallSpec, EngineRequest, ExtractionEngine,
        ExtractionOrchestrator, ExtractionRecord, ExtractionRequest, Extractor, GraphExtraction,
        PromptComposer, derive_parameters,
    };

    pub use crate::graph::{
        GraphData, GraphEdge, GraphNode, GraphNormalizer, GraphPreview, GraphStats,
        StatementGenerator,
    };

    pub use crate::{GraphweaveError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for graphweave operations
#[derive(Debug, thiserror::Error)]
pub enum GraphweaveError {
    /// A named strategy or definition does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// A definition exists but is malformed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A synthesized strategy has an empty entity or relation vocabulary
    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LogError),

    /// Failure reported by the external extraction engine
    #[error("Extraction engine error: {0}")]
    Engine(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for GraphweaveError {
    fn from(err: crate::config::ConfigError) -> Self {
        GraphweaveError::Configuration(err.to_string())
    }
}

impl From<serde_json::Error> for GraphweaveError {
    fn from(err: serde_json::Error) -> Self {
        GraphweaveError::Serialization(err.to_string())
    }
}

/// Result type for graphweave operations
pub type Result<T> = std::result::Result<T, GraphweaveError>;

/// Build an [`extraction::Extractor`] from configuration.
///
/// Initializes logging from `config.logging` (an already-installed subscriber is
/// left in place), opens the strategy definitions under `config.definitions.dir`
/// and wires the given engine behind the orchestrator.
pub fn init<E>(config: config::GraphweaveConfig, engine: E) -> Result<extraction::Extractor<E>>
where
    E: extraction::ExtractionEngine,
{
    logging::init(&config.logging)?;

    let store = strategy::StrategyStore::open(&config.definitions.dir);
    let composer = extraction::PromptComposer::with_schemas(
        config.definitions.templates_dir(),
        store.schemas().clone(),
    );
    let orchestrator = extraction::ExtractionOrchestrator::new(std::sync::Arc::new(store), composer);

    Ok(extraction::Extractor::new(orchestrator, engine, config))
}
