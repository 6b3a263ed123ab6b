//! Strategy value types: granularity axes and the extraction strategy itself.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque, ordered key/value bag carried through a strategy untouched.
pub type ConfigBag = Map<String, Value>;

/// Declares one granularity axis.
///
/// Every axis keeps unknown spellings as `Other(raw)` instead of failing to
/// parse; consumers match on the known variants and treat anything else like
/// the axis default.
macro_rules! granularity_axis {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $(
                #[doc = concat!("`", $text, "`")]
                $variant,
            )+
            /// Unrecognized value, kept verbatim
            Other(String),
        }

        impl $name {
            /// Spelling of this value; recognized values are matched exactly.
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $text, )+
                    $name::Other(raw) => raw,
                }
            }

            /// Whether this value is one of the recognized spellings.
            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                match value {
                    $( $text => $name::$variant, )+
                    _ => $name::Other(value.to_string()),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name::from(value.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

granularity_axis!(
    /// How many kinds of items to pull out of the text.
    Breadth, default = Standard, {
        Minimal => "minimal",
        Standard => "standard",
        Comprehensive => "comprehensive",
    }
);

granularity_axis!(
    /// How far beyond the literal text the engine may reason.
    Depth, default = Semantic, {
        Surface => "surface",
        Semantic => "semantic",
        Inferential => "inferential",
    }
);

granularity_axis!(
    /// Which confidence band of findings to keep.
    Confidence, default = Medium, {
        High => "high",
        Medium => "medium",
        All => "all",
    }
);

granularity_axis!(
    /// How much surrounding text each extraction call sees.
    ContextScope, default = Paragraph, {
        Local => "local",
        Paragraph => "paragraph",
        Document => "document",
    }
);

/// Four-axis granularity control for one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GranularityConfig {
    pub breadth: Breadth,
    pub depth: Depth,
    pub confidence: Confidence,
    pub context_scope: ContextScope,
}

impl GranularityConfig {
    /// Create a granularity from raw spellings, accepting unknown values.
    pub fn new(
        breadth: impl Into<Breadth>,
        depth: impl Into<Depth>,
        confidence: impl Into<Confidence>,
        context_scope: impl Into<ContextScope>,
    ) -> Self {
        Self {
            breadth: breadth.into(),
            depth: depth.into(),
            confidence: confidence.into(),
            context_scope: context_scope.into(),
        }
    }

    /// Apply per-axis overrides; an absent override keeps this value.
    pub fn overridden_by(&self, overrides: &GranularityOverrides) -> Self {
        Self {
            breadth: overrides.breadth.clone().unwrap_or_else(|| self.breadth.clone()),
            depth: overrides.depth.clone().unwrap_or_else(|| self.depth.clone()),
            confidence: overrides
                .confidence
                .clone()
                .unwrap_or_else(|| self.confidence.clone()),
            context_scope: overrides
                .context_scope
                .clone()
                .unwrap_or_else(|| self.context_scope.clone()),
        }
    }
}

/// Caller-supplied granularity overrides, one optional value per axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GranularityOverrides {
    pub breadth: Option<Breadth>,
    pub depth: Option<Depth>,
    pub confidence: Option<Confidence>,
    pub context_scope: Option<ContextScope>,
}

impl GranularityOverrides {
    /// True when at least one axis is overridden.
    pub fn any(&self) -> bool {
        self.breadth.is_some()
            || self.depth.is_some()
            || self.confidence.is_some()
            || self.context_scope.is_some()
    }
}

/// A named extraction policy: vocabulary, prompting rules and granularity.
///
/// Strategies are immutable once built; the store hands them out behind an
/// `Arc` and derived variants are new values under new names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub name: String,
    pub description: String,
    pub version: String,
    /// Recognized entity classes, first occurrence order, never empty
    pub entities: Vec<String>,
    /// Recognized relation classes, first occurrence order
    pub relations: Vec<String>,
    pub granularity: GranularityConfig,
    pub extraction_rules: ConfigBag,
    /// First-tier template used by the prompt composer
    pub prompt_template: String,
    /// Declared few-shot examples (currently superseded by the built-in set)
    pub examples: ConfigBag,
    pub post_processing: ConfigBag,
    pub special_settings: ConfigBag,
}

/// Template name used when a strategy does not pick one.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "base";

/// Version stamped on strategies synthesized at runtime.
pub const CUSTOM_STRATEGY_VERSION: &str = "1.0";

/// Optional parts of a synthesized strategy.
#[derive(Debug, Clone, Default)]
pub struct CustomStrategyOptions {
    pub description: Option<String>,
    pub granularity: Option<GranularityConfig>,
    pub extraction_rules: ConfigBag,
    pub prompt_template: Option<String>,
    pub examples: ConfigBag,
    pub post_processing: ConfigBag,
    pub special_settings: ConfigBag,
}

impl CustomStrategyOptions {
    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the granularity
    pub fn granularity(mut self, granularity: GranularityConfig) -> Self {
        self.granularity = Some(granularity);
        self
    }

    /// Set the prompt template name
    pub fn prompt_template(mut self, template: impl Into<String>) -> Self {
        self.prompt_template = Some(template.into());
        self
    }

    /// Carry the opaque bags and template choice of an existing strategy
    pub fn inherit_bags(mut self, base: &StrategyConfig) -> Self {
        self.extraction_rules = base.extraction_rules.clone();
        self.examples = base.examples.clone();
        self.post_processing = base.post_processing.clone();
        self.special_settings = base.special_settings.clone();
        self.prompt_template = Some(base.prompt_template.clone());
        self
    }
}

impl StrategyConfig {
    /// Synthesize a strategy without a backing definition.
    ///
    /// Returns `None` when the entity or relation vocabulary is empty after
    /// de-duplication.
    pub fn custom(
        name: impl Into<String>,
        entities: Vec<String>,
        relations: Vec<String>,
        options: CustomStrategyOptions,
    ) -> Option<Self> {
        let name = name.into();
        let entities = dedup_classes(entities);
        let relations = dedup_classes(relations);
        if entities.is_empty() || relations.is_empty() {
            return None;
        }

        Some(Self {
            description: options
                .description
                .unwrap_or_else(|| format!("Custom extraction strategy: {name}")),
            name,
            version: CUSTOM_STRATEGY_VERSION.to_string(),
            entities,
            relations,
            granularity: options.granularity.unwrap_or_default(),
            extraction_rules: options.extraction_rules,
            prompt_template: options
                .prompt_template
                .unwrap_or_else(|| DEFAULT_PROMPT_TEMPLATE.to_string()),
            examples: options.examples,
            post_processing: options.post_processing,
            special_settings: options.special_settings,
        })
    }

    /// Entity classes followed by relation classes.
    pub fn all_classes(&self) -> impl Iterator<Item = &str> {
        self.entities
            .iter()
            .chain(self.relations.iter())
            .map(String::as_str)
    }

    /// Short description used by `describe`.
    pub fn summary(&self) -> StrategySummary {
        StrategySummary {
            name: self.name.clone(),
            description: self.description.clone(),
            entities: self.entities.clone(),
            relations: self.relations.clone(),
            granularity: self.granularity.clone(),
        }
    }
}

/// Public description of a strategy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySummary {
    pub name: String,
    pub description: String,
    pub entities: Vec<String>,
    pub relations: Vec<String>,
    pub granularity: GranularityConfig,
}

/// On-disk strategy definition.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StrategyDefinition {
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "scalar_to_string")]
    pub version: String,
    pub entities: Vec<String>,
    pub relations: Vec<String>,
    #[serde(default)]
    pub granularity: GranularityConfig,
    #[serde(default)]
    pub extraction_rules: ConfigBag,
    #[serde(default)]
    pub prompt_template: Option<String>,
    #[serde(default)]
    pub examples: ConfigBag,
    #[serde(default)]
    pub post_processing: ConfigBag,
    #[serde(default)]
    pub special_settings: ConfigBag,
}

impl From<StrategyDefinition> for StrategyConfig {
    fn from(def: StrategyDefinition) -> Self {
        Self {
            name: def.name,
            description: def.description,
            version: def.version,
            entities: dedup_classes(def.entities),
            relations: dedup_classes(def.relations),
            granularity: def.granularity,
            extraction_rules: def.extraction_rules,
            prompt_template: def
                .prompt_template
                .unwrap_or_else(|| DEFAULT_PROMPT_TEMPLATE.to_string()),
            examples: def.examples,
            post_processing: def.post_processing,
            special_settings: def.special_settings,
        }
    }
}

/// YAML writes `version: 1.0` as a float; keep whatever scalar was given.
fn scalar_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "version must be a scalar, got {other}"
        ))),
    }
}

/// Drop blank and repeated class names, keeping first occurrence order.
pub(crate) fn dedup_classes(classes: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    classes
        .into_iter()
        .map(|class| class.trim().to_string())
        .filter(|class| !class.is_empty() && seen.insert(class.clone()))
        .collect()
}
