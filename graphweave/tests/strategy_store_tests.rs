//! External tests for the strategy store, prompt composer and orchestrator
//! against the bundled definition files.

use graphweave::extraction::*;
use graphweave::strategy::*;
use graphweave::GraphweaveError;
use std::path::PathBuf;
use std::sync::Arc;

fn bundled_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config")
}

fn orchestrator() -> ExtractionOrchestrator {
    let store = StrategyStore::open(bundled_dir());
    let composer = PromptComposer::with_schemas(bundled_dir().join("templates"), store.schemas().clone());
    ExtractionOrchestrator::new(Arc::new(store), composer)
}

#[cfg(test)]
mod bundled_definition_tests {
    use super::*;

    #[test]
    fn test_bundled_strategies_are_listed() {
        let store = StrategyStore::open(bundled_dir());
        assert_eq!(
            store.list_available(),
            vec!["academic", "business", "literary", "news"]
        );
    }

    #[test]
    fn test_every_bundled_strategy_loads() {
        let store = StrategyStore::open(bundled_dir());
        for name in store.list_available() {
            let strategy = store.load(&name).unwrap();
            assert_eq!(strategy.name, name);
            assert!(!strategy.entities.is_empty());
            assert_eq!(strategy.prompt_template, "base");
        }
    }

    #[test]
    fn test_literary_granularity() {
        let summary = StrategyStore::open(bundled_dir()).describe("literary").unwrap();
        assert_eq!(summary.granularity.breadth, Breadth::Comprehensive);
        assert_eq!(summary.granularity.depth, Depth::Inferential);
        assert!(summary.entities.contains(&"character".to_string()));
    }

    #[test]
    fn test_schema_fallback_tiers() {
        let store = StrategyStore::open(bundled_dir());

        let literary = store.resolve_entity_schema("literary", "character");
        assert_eq!(literary.description, "A person or speaking role in the text");

        let common = store.resolve_entity_schema("literary", "person");
        assert_eq!(common.description, "A named individual");

        let minimal = store.resolve_relation_schema("news", "cites");
        assert_eq!(minimal.description, "cites relation");
        assert_eq!(minimal.head_types, Some(vec![]));
    }

    #[test]
    fn test_missing_definitions_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = StrategyStore::open(dir.path().join("absent"));
        assert!(store.list_available().is_empty());
        assert!(matches!(store.load("literary"), Err(GraphweaveError::NotFound(_))));
    }
}

#[cfg(test)]
mod composition_tests {
    use super::*;

    #[test]
    fn test_base_template_renders_vocabulary() {
        let orchestrator = orchestrator();
        let strategy = orchestrator.store().load("business").unwrap();
        let prompt = orchestrator.composer().render(&strategy);

        assert!(prompt.starts_with("You are an information extraction engine for business documents"));
        assert!(prompt.contains("- organization"));
        assert!(prompt.contains("- relationship"));
        assert!(prompt.contains("amounts: Keep currency symbols"));
    }

    #[test]
    fn test_base_template_carries_fixed_rules() {
        let orchestrator = orchestrator();
        for name in orchestrator.store().list_available() {
            let strategy = orchestrator.store().load(&name).unwrap();
            let prompt = orchestrator.composer().render(&strategy);

            assert!(prompt.contains("do not paraphrase"), "{name}");
            assert!(prompt.contains("grounded in the text"), "{name}");
            assert!(prompt.contains("Do not create overlapping spans"), "{name}");
            assert!(prompt.contains("no leading or trailing spaces"), "{name}");
            assert!(
                prompt.contains("adjacent punctuation unless it is part of the surface form"),
                "{name}"
            );
            assert!(prompt.contains("JSON-compatible key-value pairs"), "{name}");

            let classes: Vec<&str> = strategy
                .entities
                .iter()
                .chain(strategy.relations.iter())
                .map(String::as_str)
                .collect();
            let restriction = format!("Keep classes strictly among: {}.", classes.join(", "));
            assert!(prompt.contains(&restriction), "{name}: {prompt}");
        }
    }

    #[test]
    fn test_literary_class_restriction() {
        let orchestrator = orchestrator();
        let strategy = orchestrator.store().load("literary").unwrap();
        let prompt = orchestrator.composer().render(&strategy);
        assert!(prompt.contains(
            "Keep classes strictly among: character, emotion, theme, symbol, location, relationship."
        ));
    }

    #[test]
    fn test_breadth_override_keeps_other_axes() {
        let orchestrator = orchestrator();
        let base = orchestrator.store().load("literary").unwrap();
        let request = ExtractionRequest::new("ROMEO.").with_strategy("literary").with_breadth("minimal");

        let call = orchestrator.run(&request).unwrap();
        assert_eq!(call.strategy.name, "literary_custom");
        assert_eq!(call.strategy.granularity.breadth, Breadth::Minimal);
        assert_eq!(call.strategy.granularity.depth, base.granularity.depth);
        assert_eq!(call.strategy.granularity.context_scope, base.granularity.context_scope);
        assert_eq!(orchestrator.store().load("literary").unwrap().granularity.breadth, Breadth::Comprehensive);
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let call = orchestrator()
            .run(&ExtractionRequest::new("text").with_strategy("sonnets"))
            .unwrap();
        assert_eq!(call.strategy.name, FALLBACK_STRATEGY_NAME);
        assert_eq!(call.strategy.entities, vec!["character", "emotion"]);
        assert_eq!(call.strategy.relations, vec!["relationship"]);
        assert_eq!(call.examples.len(), 3);
    }

    #[test]
    fn test_call_contract_shape() {
        let call = orchestrator()
            .run(
                &ExtractionRequest::new("JULIET. Ay me!")
                    .with_strategy("literary")
                    .with_engine_override("temperature", 0.9),
            )
            .unwrap();
        let value = serde_json::to_value(&call).unwrap();

        assert_eq!(value["text"], "JULIET. Ay me!");
        assert_eq!(value["passes"], 3);
        assert_eq!(value["context_window_chars"], 4000);
        assert_eq!(value["engine_overrides"]["temperature"], 0.9);
        assert!(value.get("strategy").is_none());
    }
}
