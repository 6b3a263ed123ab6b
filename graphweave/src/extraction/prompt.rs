//! Prompt composition for the extraction engine.
//!
//! Rendering walks an ordered list of sources: the strategy's own template,
//! then the shared `base` template, then a prompt built in code. The first
//! source that renders wins, so [`PromptComposer::render`] always returns an
//! instruction string.

use crate::strategy::{DEFAULT_PROMPT_TEMPLATE, SchemaCatalog, StrategyConfig};
use handlebars::Handlebars;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File extension of prompt templates
pub const TEMPLATE_EXTENSION: &str = "hbs";

/// Why a template tier could not produce a prompt.
#[derive(Debug, thiserror::Error)]
enum RenderError {
    #[error("template {0} not found")]
    Missing(PathBuf),

    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to render template {name}: {detail}")]
    Render { name: String, detail: String },
}

/// One place a prompt can come from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PromptSource {
    Template(String),
    Builtin,
}

#[derive(Serialize)]
struct TemplateData<'a> {
    strategy: &'a StrategyConfig,
    schemas: &'a SchemaCatalog,
}

/// Renders extraction instructions for a strategy.
#[derive(Clone)]
pub struct PromptComposer {
    templates_dir: PathBuf,
    schemas: SchemaCatalog,
    handlebars: Handlebars<'static>,
}

impl fmt::Debug for PromptComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptComposer")
            .field("templates_dir", &self.templates_dir)
            .finish_non_exhaustive()
    }
}

impl PromptComposer {
    /// Create a composer reading templates from `templates_dir`.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        Self::with_schemas(templates_dir, SchemaCatalog::default())
    }

    /// Create a composer that exposes `schemas` to templates.
    pub fn with_schemas(templates_dir: impl Into<PathBuf>, schemas: SchemaCatalog) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self {
            templates_dir: templates_dir.into(),
            schemas,
            handlebars,
        }
    }

    /// Directory searched for `<name>.hbs` templates
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Render the instruction text for `strategy`. Never fails.
    pub fn render(&self, strategy: &StrategyConfig) -> String {
        for source in self.sources(strategy) {
            let rendered = match &source {
                PromptSource::Template(name) => self.render_template(name, strategy),
                PromptSource::Builtin => return builtin_prompt(strategy),
            };
            match rendered {
                Ok(prompt) => return prompt,
                Err(e) => debug!(
                    strategy = %strategy.name,
                    error = %e,
                    "Prompt template unavailable, trying next source"
                ),
            }
        }
        builtin_prompt(strategy)
    }

    fn sources(&self, strategy: &StrategyConfig) -> Vec<PromptSource> {
        let mut sources = vec![PromptSource::Template(strategy.prompt_template.clone())];
        if strategy.prompt_template != DEFAULT_PROMPT_TEMPLATE {
            sources.push(PromptSource::Template(DEFAULT_PROMPT_TEMPLATE.to_string()));
        }
        sources.push(PromptSource::Builtin);
        sources
    }

    fn render_template(&self, name: &str, strategy: &StrategyConfig) -> Result<String, RenderError> {
        let path = self
            .templates_dir
            .join(format!("{name}.{TEMPLATE_EXTENSION}"));
        if !path.is_file() {
            return Err(RenderError::Missing(path));
        }
        let source = std::fs::read_to_string(&path).map_err(|source| RenderError::Read {
            path: path.clone(),
            source,
        })?;

        let data = TemplateData {
            strategy,
            schemas: &self.schemas,
        };
        self.handlebars
            .render_template(&source, &data)
            .map(|prompt| prompt.trim().to_string())
            .map_err(|e| RenderError::Render {
                name: name.to_string(),
                detail: e.to_string(),
            })
    }
}

/// Prompt assembled in code, used when no template renders.
fn builtin_prompt(strategy: &StrategyConfig) -> String {
    let entity_lines = strategy
        .entities
        .iter()
        .map(|entity| format!("- {entity}: a {entity} entity"))
        .collect::<Vec<_>>()
        .join("\n");
    let relation_lines = strategy
        .relations
        .iter()
        .map(|relation| format!("- {relation}: a {relation} relation"))
        .collect::<Vec<_>>()
        .join("\n");
    let classes = strategy.all_classes().collect::<Vec<_>>().join(", ");

    format!(
        "You are an information extraction engine for {description}.
Extract three kinds of items from the input text, in order of appearance:

1) ENTITIES of class:
{entity_lines}

2) RELATIONS of class:
{relation_lines}

Rules:
- Use the exact surface text from the input (no paraphrase).
- Every extraction must be grounded in the text; do not output anything not present.
- Do not create overlapping spans for different entities/relations.

Span alignment:
- The char_interval must exactly match the extraction_text.
- Do NOT include leading or trailing spaces.
- Do NOT include adjacent punctuation unless it is part of the surface form.

Entity attributes:
- Provide useful attributes for ENTITIES when obvious from text.

Relationship extraction:
- For RELATIONSHIP, always fill attributes with:
head_text, head_class, relation_type, tail_text, tail_class.

Output:
- Return extractions that the model can map to character-level spans.
- Keep classes strictly among: {classes}.
- Ensure attributes are JSON-compatible key-value pairs.",
        description = strategy.description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::CustomStrategyOptions;
    use tempfile::TempDir;

    fn strategy(template: &str) -> StrategyConfig {
        StrategyConfig::custom(
            "literary",
            vec!["character".into(), "emotion".into()],
            vec!["relationship".into()],
            CustomStrategyOptions::default()
                .description("literary text analysis")
                .prompt_template(template),
        )
        .unwrap()
    }

    fn templates(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in files {
            std::fs::write(dir.path().join(name), body).unwrap();
        }
        dir
    }

    #[test]
    fn test_builtin_prompt_when_no_templates() {
        let composer = PromptComposer::new("/nonexistent/templates");
        let prompt = composer.render(&strategy("literary"));

        assert!(prompt.starts_with(
            "You are an information extraction engine for literary text analysis."
        ));
        assert!(prompt.contains("1) ENTITIES of class:\n- character: a character entity\n"));
        assert!(prompt.contains("2) RELATIONS of class:\n- relationship: a relationship relation"));
        assert!(prompt.contains("Keep classes strictly among: character, emotion, relationship."));
        assert!(prompt.contains("Do NOT include leading or trailing spaces."));
    }

    #[test]
    fn test_strategy_template_wins() {
        let dir = templates(&[
            ("literary.hbs", "  Literary: {{strategy.description}}  \n"),
            ("base.hbs", "Base: {{strategy.description}}"),
        ]);
        let prompt = PromptComposer::new(dir.path()).render(&strategy("literary"));
        assert_eq!(prompt, "Literary: literary text analysis");
    }

    #[test]
    fn test_falls_back_to_base_template() {
        let dir = templates(&[(
            "base.hbs",
            "For {{strategy.description}}:{{#each strategy.entities}} {{this}}{{/each}}",
        )]);
        let prompt = PromptComposer::new(dir.path()).render(&strategy("poetry"));
        assert_eq!(prompt, "For literary text analysis: character emotion");
    }

    #[test]
    fn test_render_error_falls_through() {
        // Strict mode turns the unknown field into a render failure
        let dir = templates(&[
            ("literary.hbs", "{{strategy.no_such_field}}"),
            ("base.hbs", "{{#each strategy.entities}}"),
        ]);
        let prompt = PromptComposer::new(dir.path()).render(&strategy("literary"));
        assert!(prompt.starts_with("You are an information extraction engine for"));
    }

    #[test]
    fn test_templates_see_schemas_unescaped() {
        let dir = templates(&[("base.hbs", "{{strategy.description}} & {{schemas.entities.common.character.description}}")]);
        let schemas = SchemaCatalog {
            entities: serde_yaml::from_str("common:\n  character:\n    description: <person>\n")
                .unwrap(),
            relations: Default::default(),
        };
        let prompt = PromptComposer::with_schemas(dir.path(), schemas).render(&strategy("base"));
        assert_eq!(prompt, "literary text analysis & <person>");
    }
}
