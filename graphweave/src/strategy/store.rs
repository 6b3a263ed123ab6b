//! Strategy store: loads named strategy definitions and synthesizes ad-hoc ones.

use super::{
    CustomStrategyOptions, SchemaCatalog, SchemaDescriptor, StrategyCache, StrategyConfig,
    StrategyDefinition, StrategySummary,
};
use crate::{GraphweaveError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// File extensions recognized as strategy definitions
const DEFINITION_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Loads, caches and synthesizes extraction strategies.
///
/// The backing store is a definitions directory laid out as
/// `strategies/<name>.yaml` plus `schemas/entities.yaml` and
/// `schemas/relations.yaml`.
#[derive(Debug, Clone)]
pub struct StrategyStore {
    strategies_dir: PathBuf,
    cache: Arc<StrategyCache>,
    schemas: SchemaCatalog,
}

impl StrategyStore {
    /// Open a store rooted at `definitions_dir` with a fresh cache.
    pub fn open(definitions_dir: impl AsRef<Path>) -> Self {
        Self::with_cache(definitions_dir, Arc::new(StrategyCache::new()))
    }

    /// Open a store rooted at `definitions_dir` sharing an existing cache.
    pub fn with_cache(definitions_dir: impl AsRef<Path>, cache: Arc<StrategyCache>) -> Self {
        let root = definitions_dir.as_ref();
        let schemas = SchemaCatalog::load(&root.join("schemas"));
        Self {
            strategies_dir: root.join("strategies"),
            cache,
            schemas,
        }
    }

    /// Replace the schema catalog, e.g. with one assembled in code.
    pub fn with_schemas(mut self, schemas: SchemaCatalog) -> Self {
        self.schemas = schemas;
        self
    }

    /// The cache backing this store
    pub fn cache(&self) -> &Arc<StrategyCache> {
        &self.cache
    }

    /// The loaded schema documents
    pub fn schemas(&self) -> &SchemaCatalog {
        &self.schemas
    }

    /// Load a strategy by name, consulting the cache first.
    ///
    /// # Errors
    /// - [`GraphweaveError::NotFound`] when no definition exists for `name`
    /// - [`GraphweaveError::Parse`] when the definition is malformed
    pub fn load(&self, name: &str) -> Result<Arc<StrategyConfig>> {
        if let Some(cached) = self.cache.get(name) {
            debug!(strategy = name, "Strategy cache hit");
            return Ok(cached);
        }

        let path = self.definition_path(name).ok_or_else(|| {
            GraphweaveError::NotFound(format!(
                "Strategy '{}' not found in {}",
                name,
                self.strategies_dir.display()
            ))
        })?;

        debug!(strategy = name, path = %path.display(), "Loading strategy definition");
        let strategy = parse_definition(&path)?;

        Ok(self.cache.insert_if_absent(name, Arc::new(strategy)))
    }

    /// Names of all strategy definitions in the backing store, sorted.
    ///
    /// An absent strategies directory yields an empty list.
    pub fn list_available(&self) -> Vec<String> {
        let entries = match std::fs::read_dir(&self.strategies_dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && has_definition_extension(path))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(str::to_string))
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// Synthesize and cache a strategy without a backing definition.
    ///
    /// The returned value is always the one just built; the cache keeps
    /// whichever strategy was first stored under `name`.
    ///
    /// # Errors
    /// [`GraphweaveError::InvalidStrategy`] when `entities` or `relations` is
    /// empty once blanks and duplicates are removed.
    pub fn create_custom(
        &self,
        name: &str,
        entities: Vec<String>,
        relations: Vec<String>,
        options: CustomStrategyOptions,
    ) -> Result<Arc<StrategyConfig>> {
        let strategy = StrategyConfig::custom(name, entities, relations, options).ok_or_else(|| {
            GraphweaveError::InvalidStrategy(format!(
                "Strategy '{name}' needs at least one entity class and one relation class"
            ))
        })?;

        let strategy = Arc::new(strategy);
        let cached = self.cache.insert_if_absent(name, Arc::clone(&strategy));
        if !Arc::ptr_eq(&cached, &strategy) {
            debug!(strategy = name, "Strategy name already cached, keeping first entry");
        }
        Ok(strategy)
    }

    /// Describe a named strategy.
    pub fn describe(&self, name: &str) -> Result<StrategySummary> {
        Ok(self.load(name)?.summary())
    }

    /// Entity schema for `entity_class` as seen by `strategy_name`. Never fails.
    pub fn resolve_entity_schema(&self, strategy_name: &str, entity_class: &str) -> SchemaDescriptor {
        self.schemas.entity(strategy_name, entity_class)
    }

    /// Relation schema for `relation_class` as seen by `strategy_name`. Never fails.
    pub fn resolve_relation_schema(
        &self,
        strategy_name: &str,
        relation_class: &str,
    ) -> SchemaDescriptor {
        self.schemas.relation(strategy_name, relation_class)
    }

    fn definition_path(&self, name: &str) -> Option<PathBuf> {
        // Names address files directly; anything path-like cannot name a strategy
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return None;
        }
        DEFINITION_EXTENSIONS
            .iter()
            .map(|ext| self.strategies_dir.join(format!("{name}.{ext}")))
            .find(|path| path.is_file())
    }
}

fn has_definition_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DEFINITION_EXTENSIONS.contains(&ext))
}

fn parse_definition(path: &Path) -> Result<StrategyConfig> {
    let parse_error =
        |detail: String| GraphweaveError::Parse(format!("{}: {}", path.display(), detail));

    let raw = std::fs::read_to_string(path).map_err(|e| parse_error(e.to_string()))?;
    let definition: StrategyDefinition =
        serde_yaml::from_str(&raw).map_err(|e| parse_error(e.to_string()))?;
    let strategy = StrategyConfig::from(definition);

    if strategy.entities.is_empty() {
        return Err(parse_error("entities must not be empty".to_string()));
    }
    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Breadth, ContextScope, Depth};
    use tempfile::TempDir;

    fn store_with(definitions: &[(&str, &str)]) -> (StrategyStore, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let strategies = dir.path().join("strategies");
        std::fs::create_dir_all(&strategies).unwrap();
        for (file, body) in definitions {
            std::fs::write(strategies.join(file), body).unwrap();
        }
        (StrategyStore::open(dir.path()), dir)
    }

    const LITERARY: &str = r#"
name: literary
description: literary text analysis
version: 1.0
entities: [character, emotion, theme]
relations: [relationship]
granularity:
  breadth: comprehensive
  depth: inferential
extraction_rules:
  min_span: 2
"#;

    #[test]
    fn test_load_caches_under_requested_name() {
        let press = "name: press\ndescription: press wire\nversion: 1.0\nentities: [person]\nrelations: [quotes]\n";
        let (store, _dir) = store_with(&[("news.yaml", press)]);
        store
            .create_custom(
                "press",
                vec!["gadget".into()],
                vec!["owns".into()],
                CustomStrategyOptions::default(),
            )
            .unwrap();

        let loaded = store.load("news").unwrap();
        assert_eq!(loaded.name, "press");
        assert_eq!(loaded.entities, vec!["person".to_string()]);
        assert!(Arc::ptr_eq(&loaded, &store.load("news").unwrap()));
        assert_eq!(store.load("press").unwrap().entities, vec!["gadget".to_string()]);
    }

    #[test]
    fn test_load_applies_field_defaults() {
        let (store, _dir) = store_with(&[("literary.yaml", LITERARY)]);
        let strategy = store.load("literary").unwrap();

        assert_eq!(strategy.version, "1.0");
        assert_eq!(strategy.granularity.breadth, Breadth::Comprehensive);
        assert_eq!(strategy.granularity.depth, Depth::Inferential);
        assert_eq!(strategy.granularity.context_scope, ContextScope::Paragraph);
        assert_eq!(strategy.prompt_template, "base");
        assert!(strategy.post_processing.is_empty());
        assert_eq!(strategy.extraction_rules["min_span"], 2);
    }

    #[test]
    fn test_load_caches_by_name() {
        let (store, dir) = store_with(&[("literary.yaml", LITERARY)]);
        let first = store.load("literary").unwrap();

        // The definition disappearing does not invalidate the cached value
        std::fs::remove_file(dir.path().join("strategies/literary.yaml")).unwrap();
        let second = store.load("literary").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_definition_is_not_found() {
        let (store, _dir) = store_with(&[]);
        assert!(matches!(store.load("poetry"), Err(GraphweaveError::NotFound(_))));
        assert!(matches!(store.load("../etc"), Err(GraphweaveError::NotFound(_))));
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let (store, _dir) = store_with(&[(
            "broken.yaml",
            "name: broken\ndescription: no version\nentities: [a]\nrelations: [b]\n",
        )]);
        let err = store.load("broken").unwrap_err();
        assert!(matches!(err, GraphweaveError::Parse(_)));
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_empty_entities_is_parse_error() {
        let (store, _dir) = store_with(&[(
            "hollow.yaml",
            "name: hollow\ndescription: d\nversion: '1'\nentities: []\nrelations: [b]\n",
        )]);
        assert!(matches!(store.load("hollow"), Err(GraphweaveError::Parse(_))));
    }

    #[test]
    fn test_list_available() {
        let (store, _dir) = store_with(&[
            ("news.yaml", LITERARY),
            ("literary.yml", LITERARY),
            ("notes.txt", "ignored"),
        ]);
        assert_eq!(store.list_available(), vec!["literary", "news"]);
    }

    #[test]
    fn test_list_available_without_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = StrategyStore::open(dir.path().join("nowhere"));
        assert!(store.list_available().is_empty());
    }

    #[test]
    fn test_create_custom_is_cached() {
        let (store, _dir) = store_with(&[]);
        let custom = store
            .create_custom(
                "heroes",
                vec!["character".into()],
                vec!["rescues".into()],
                CustomStrategyOptions::default(),
            )
            .unwrap();
        assert_eq!(custom.description, "Custom extraction strategy: heroes");
        assert!(Arc::ptr_eq(&custom, &store.load("heroes").unwrap()));
    }

    #[test]
    fn test_create_custom_rejects_empty_vocabulary() {
        let (store, _dir) = store_with(&[]);
        let result = store.create_custom("empty", vec![], vec!["r".into()], Default::default());
        assert!(matches!(result, Err(GraphweaveError::InvalidStrategy(_))));
        assert!(!store.cache().contains("empty"));
    }
}
