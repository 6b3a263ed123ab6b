//! Assembles the call contract for the extraction engine.

use super::{CallParameters, ExampleData, PromptComposer, default_examples, derive_parameters};
use crate::strategy::{
    Breadth, Confidence, ConfigBag, ContextScope, CustomStrategyOptions, Depth, GranularityConfig,
    GranularityOverrides, StrategyConfig, StrategyStore,
};
use crate::{GraphweaveError, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Name of the strategy synthesized from bare entity/relation overrides
pub const CUSTOM_STRATEGY_NAME: &str = "custom";

/// Name of the strategy used when nothing else resolves
pub const FALLBACK_STRATEGY_NAME: &str = "fallback";

/// Entity classes used when a synthesized strategy gets none
pub const DEFAULT_ENTITIES: &[&str] = &["character", "emotion"];

/// Relation classes used when a synthesized strategy gets none
pub const DEFAULT_RELATIONS: &[&str] = &["relationship"];

/// One extraction request: the text plus everything that shapes the call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionRequest {
    pub text: String,
    /// Named strategy to start from
    pub strategy: Option<String>,
    pub entities: Option<Vec<String>>,
    pub relations: Option<Vec<String>>,
    pub granularity: GranularityOverrides,
    /// Passed to the engine verbatim; wins over derived parameters
    pub engine_overrides: ConfigBag,
}

impl ExtractionRequest {
    /// Create a request for `text` with no strategy and no overrides
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Same settings, different text. Used to fan a template out over a batch.
    pub fn for_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn with_strategy(mut self, name: impl Into<String>) -> Self {
        self.strategy = Some(name.into());
        self
    }

    pub fn with_entities<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entities = Some(entities.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_relations<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relations = Some(relations.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_breadth(mut self, breadth: impl Into<Breadth>) -> Self {
        self.granularity.breadth = Some(breadth.into());
        self
    }

    pub fn with_depth(mut self, depth: impl Into<Depth>) -> Self {
        self.granularity.depth = Some(depth.into());
        self
    }

    pub fn with_confidence(mut self, confidence: impl Into<Confidence>) -> Self {
        self.granularity.confidence = Some(confidence.into());
        self
    }

    pub fn with_context_scope(mut self, scope: impl Into<ContextScope>) -> Self {
        self.granularity.context_scope = Some(scope.into());
        self
    }

    /// Set an engine option, e.g. `max_workers`
    pub fn with_engine_override(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.engine_overrides.insert(key.into(), value.into());
        self
    }

    /// Entity override, treating an empty list as absent
    fn entity_override(&self) -> Option<Vec<String>> {
        self.entities.clone().filter(|entities| !entities.is_empty())
    }

    /// Relation override, treating an empty list as absent
    fn relation_override(&self) -> Option<Vec<String>> {
        self.relations.clone().filter(|relations| !relations.is_empty())
    }

    fn strategy_name(&self) -> Option<&str> {
        self.strategy.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }
}

/// Everything the extraction engine needs for one call.
#[derive(Debug, Clone, Serialize)]
pub struct EngineCallSpec {
    pub text: String,
    pub prompt: String,
    pub examples: Vec<ExampleData>,
    #[serde(flatten)]
    pub parameters: CallParameters,
    pub engine_overrides: ConfigBag,
    /// The strategy this call was assembled from
    #[serde(skip)]
    pub strategy: Arc<StrategyConfig>,
}

/// Resolves strategies and assembles [`EngineCallSpec`]s.
///
/// Does not call the engine itself; see [`super::Extractor`] for that.
#[derive(Debug, Clone)]
pub struct ExtractionOrchestrator {
    store: Arc<StrategyStore>,
    composer: PromptComposer,
}

impl ExtractionOrchestrator {
    pub fn new(store: Arc<StrategyStore>, composer: PromptComposer) -> Self {
        Self { store, composer }
    }

    /// The strategy store
    pub fn store(&self) -> &Arc<StrategyStore> {
        &self.store
    }

    /// The prompt composer
    pub fn composer(&self) -> &PromptComposer {
        &self.composer
    }

    /// Pick the strategy for `request`.
    ///
    /// A known name with no overrides yields the stored strategy. A known name
    /// with overrides yields `<name>_custom`, built field by field from the
    /// overrides and the base. Without a name, entity or relation overrides
    /// yield `custom`; everything else, including an unknown name, yields
    /// `fallback`.
    ///
    /// # Errors
    /// A definition that exists but fails to parse is reported as
    /// [`GraphweaveError::Parse`]; it never falls back silently.
    #[instrument(skip(self, request), fields(strategy = request.strategy.as_deref()))]
    pub fn resolve_strategy(&self, request: &ExtractionRequest) -> Result<Arc<StrategyConfig>> {
        let entities = request.entity_override();
        let relations = request.relation_override();

        if let Some(name) = request.strategy_name() {
            match self.store.load(name) {
                Ok(base) => {
                    if entities.is_none() && relations.is_none() && !request.granularity.any() {
                        return Ok(base);
                    }
                    return self.derive_from(&base, name, entities, relations, &request.granularity);
                }
                Err(GraphweaveError::NotFound(reason)) => {
                    debug!(%reason, "Unknown strategy, using fallback");
                    return self.synthesize(
                        FALLBACK_STRATEGY_NAME,
                        "Fallback extraction strategy",
                        entities,
                        relations,
                        &request.granularity,
                    );
                }
                Err(e) => return Err(e),
            }
        }

        if entities.is_some() || relations.is_some() {
            self.synthesize(
                CUSTOM_STRATEGY_NAME,
                "Custom extraction strategy",
                entities,
                relations,
                &request.granularity,
            )
        } else {
            self.synthesize(
                FALLBACK_STRATEGY_NAME,
                "Fallback extraction strategy",
                None,
                None,
                &request.granularity,
            )
        }
    }

    /// Resolve the strategy and assemble the engine call contract.
    pub fn run(&self, request: &ExtractionRequest) -> Result<EngineCallSpec> {
        let strategy = self.resolve_strategy(request)?;
        let parameters = derive_parameters(&strategy.granularity);
        let prompt = self.composer.render(&strategy);

        debug!(
            strategy = %strategy.name,
            passes = parameters.passes,
            window = parameters.context_window_chars,
            temperature = parameters.temperature,
            overrides = request.engine_overrides.len(),
            "Assembled engine call"
        );

        Ok(EngineCallSpec {
            text: request.text.clone(),
            prompt,
            examples: default_examples(),
            parameters,
            engine_overrides: request.engine_overrides.clone(),
            strategy,
        })
    }

    fn derive_from(
        &self,
        base: &StrategyConfig,
        name: &str,
        entities: Option<Vec<String>>,
        relations: Option<Vec<String>>,
        granularity: &GranularityOverrides,
    ) -> Result<Arc<StrategyConfig>> {
        let options = CustomStrategyOptions::default()
            .inherit_bags(base)
            .description(base.description.clone())
            .granularity(base.granularity.overridden_by(granularity));

        self.store.create_custom(
            &format!("{name}_custom"),
            entities.unwrap_or_else(|| base.entities.clone()),
            relations.unwrap_or_else(|| base.relations.clone()),
            options,
        )
    }

    fn synthesize(
        &self,
        name: &str,
        description: &str,
        entities: Option<Vec<String>>,
        relations: Option<Vec<String>>,
        granularity: &GranularityOverrides,
    ) -> Result<Arc<StrategyConfig>> {
        let options = CustomStrategyOptions::default()
            .description(description)
            .granularity(GranularityConfig::default().overridden_by(granularity));

        self.store.create_custom(
            name,
            entities.unwrap_or_else(|| owned(DEFAULT_ENTITIES)),
            relations.unwrap_or_else(|| owned(DEFAULT_RELATIONS)),
            options,
        )
    }
}

fn owned(classes: &[&str]) -> Vec<String> {
    classes.iter().map(|class| class.to_string()).collect()
}
