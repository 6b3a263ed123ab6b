//! High-level extraction facade.

use super::{
    AnnotatedDocument, EngineRequest, ExtractionEngine, ExtractionOrchestrator, ExtractionRequest,
};
use crate::Result;
use crate::config::{EngineConfig, GraphweaveConfig, ModelConfig};
use crate::graph::{CypherStatements, GraphData, GraphNormalizer, StatementGenerator};
use crate::strategy::{StrategyConfig, StrategySummary};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, instrument};

/// Result of an extraction run taken all the way to graph statements.
#[derive(Debug, Clone, Serialize)]
pub struct GraphExtraction {
    /// What the engine returned
    pub raw: AnnotatedDocument,
    pub graph: GraphData,
    pub statements: CypherStatements,
}

/// Drives an [`ExtractionEngine`] with orchestrated calls.
///
/// # Examples
///
/// ```rust,no_run
/// use graphweave::prelude::*;
///
/// async fn example<E: ExtractionEngine>(engine: E) -> Result<()> {
///     let extractor = graphweave::init(ConfigBuilder::development().build()?, engine)?;
///
///     let request = ExtractionRequest::new("JULIET. O Romeo, Romeo!").with_strategy("literary");
///     let result = extractor.extract_for_graph(&request).await?;
///     println!("{}", result.statements.script());
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct Extractor<E> {
    orchestrator: ExtractionOrchestrator,
    engine: E,
    model: ModelConfig,
    engine_config: EngineConfig,
    normalizer: GraphNormalizer,
    statements: StatementGenerator,
    current: RwLock<Option<Arc<StrategyConfig>>>,
}

impl<E: ExtractionEngine> Extractor<E> {
    pub fn new(orchestrator: ExtractionOrchestrator, engine: E, config: GraphweaveConfig) -> Self {
        Self {
            orchestrator,
            engine,
            model: config.model,
            engine_config: config.engine,
            normalizer: GraphNormalizer::new(),
            statements: StatementGenerator::new(),
            current: RwLock::new(None),
        }
    }

    /// The orchestrator assembling engine calls
    pub fn orchestrator(&self) -> &ExtractionOrchestrator {
        &self.orchestrator
    }

    /// The wrapped engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run one extraction call and return the engine's records.
    #[instrument(skip(self, request), fields(strategy = request.strategy.as_deref()))]
    pub async fn extract(&self, request: &ExtractionRequest) -> Result<AnnotatedDocument> {
        let call = self.orchestrator.run(request)?;
        self.set_current(Arc::clone(&call.strategy));

        let strategy = call.strategy.name.clone();
        let engine_request = EngineRequest::new(call, self.model.clone(), self.engine_config.clone());
        let document = self.engine.extract(&engine_request).await?;

        debug!(
            %strategy,
            records = document.extractions.len(),
            "Engine returned records"
        );
        Ok(document)
    }

    /// Extract, normalize and render `CREATE` statements.
    pub async fn extract_for_graph(&self, request: &ExtractionRequest) -> Result<GraphExtraction> {
        let raw = self.extract(request).await?;
        let graph = self.normalizer.normalize_document(&raw);
        let statements = self.statements.generate_create(&graph);
        Ok(GraphExtraction {
            raw,
            graph,
            statements,
        })
    }

    /// Extract, normalize and render `MERGE` statements.
    pub async fn extract_for_graph_merge(
        &self,
        request: &ExtractionRequest,
    ) -> Result<GraphExtraction> {
        let raw = self.extract(request).await?;
        let graph = self.normalizer.normalize_document(&raw);
        let statements = self.statements.generate_merge(&graph);
        Ok(GraphExtraction {
            raw,
            graph,
            statements,
        })
    }

    /// Run `template` over every text, at most `engine.max_concurrency` calls
    /// in flight. Results keep the input order; one failed call does not
    /// affect the others.
    pub async fn extract_batch<I, S>(
        &self,
        texts: I,
        template: &ExtractionRequest,
    ) -> Vec<Result<AnnotatedDocument>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let requests: Vec<ExtractionRequest> = texts
            .into_iter()
            .map(|text| template.for_text(text))
            .collect();
        let total = requests.len();
        let limit = self.engine_config.max_concurrency.max(1);

        let results: Vec<Result<AnnotatedDocument>> = stream::iter(requests.iter())
            .map(|request| self.extract(request))
            .buffered(limit)
            .collect()
            .await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(total, failed, concurrency = limit, "Batch extraction finished");
        results
    }

    /// Strategy used by the most recent call, if any
    pub fn current_strategy(&self) -> Option<Arc<StrategyConfig>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Strategy names available in the definitions directory
    pub fn available_strategies(&self) -> Vec<String> {
        self.orchestrator.store().list_available()
    }

    /// Summary of a named strategy
    pub fn describe_strategy(&self, name: &str) -> Result<StrategySummary> {
        self.orchestrator.store().describe(name)
    }

    fn set_current(&self, strategy: Arc<StrategyConfig>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(strategy);
    }
}
