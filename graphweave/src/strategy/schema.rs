//! Shared entity and relation schema metadata.
//!
//! Schema documents are keyed first by strategy name (or `common`) and then by
//! class name. Lookups never fail: a missing class falls back to the `common`
//! section and finally to a synthesized minimal descriptor.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Section name shared by every strategy.
pub const COMMON_SECTION: &str = "common";

/// Description of one entity or relation class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaDescriptor {
    pub description: String,
    pub attributes: Vec<Value>,
    /// Allowed head classes (relations only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_types: Option<Vec<String>>,
    /// Allowed tail classes (relations only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_types: Option<Vec<String>>,
    /// Any other keys present in the definition
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SchemaDescriptor {
    /// Minimal descriptor for an entity class with no definition.
    pub fn minimal_entity(class: &str) -> Self {
        Self {
            description: format!("{class} entity"),
            ..Default::default()
        }
    }

    /// Minimal descriptor for a relation class with no definition.
    pub fn minimal_relation(class: &str) -> Self {
        Self {
            description: format!("{class} relation"),
            head_types: Some(Vec::new()),
            tail_types: Some(Vec::new()),
            ..Default::default()
        }
    }
}

/// `{section: {class: descriptor}}`
pub type SchemaDocument = BTreeMap<String, BTreeMap<String, SchemaDescriptor>>;

/// Entity and relation schema documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SchemaCatalog {
    pub entities: SchemaDocument,
    pub relations: SchemaDocument,
}

impl SchemaCatalog {
    /// Load `entities.yaml` and `relations.yaml` from `schemas_dir`.
    ///
    /// Absent files yield empty documents. A malformed file leaves the whole
    /// catalog empty and logs a warning.
    pub fn load(schemas_dir: &Path) -> Self {
        let entities = read_document(&schemas_dir.join("entities.yaml"));
        let relations = read_document(&schemas_dir.join("relations.yaml"));

        match (entities, relations) {
            (Ok(entities), Ok(relations)) => Self {
                entities,
                relations,
            },
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(
                    dir = %schemas_dir.display(),
                    error = %e,
                    "Failed to load schemas, continuing without schema metadata"
                );
                Self::default()
            }
        }
    }

    /// Resolve an entity descriptor: strategy section, then `common`, then minimal.
    pub fn entity(&self, strategy: &str, class: &str) -> SchemaDescriptor {
        lookup(&self.entities, strategy, class)
            .unwrap_or_else(|| SchemaDescriptor::minimal_entity(class))
    }

    /// Resolve a relation descriptor: strategy section, then `common`, then minimal.
    pub fn relation(&self, strategy: &str, class: &str) -> SchemaDescriptor {
        lookup(&self.relations, strategy, class)
            .unwrap_or_else(|| SchemaDescriptor::minimal_relation(class))
    }
}

fn lookup(document: &SchemaDocument, strategy: &str, class: &str) -> Option<SchemaDescriptor> {
    [strategy, COMMON_SECTION]
        .iter()
        .find_map(|section| document.get(*section).and_then(|classes| classes.get(class)))
        .cloned()
}

fn read_document(path: &Path) -> Result<SchemaDocument, String> {
    if !path.exists() {
        return Ok(SchemaDocument::new());
    }
    let raw = std::fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
    // An empty YAML file parses as null
    let parsed: Option<SchemaDocument> =
        serde_yaml::from_str(&raw).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(parsed.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SchemaCatalog {
        let entities: SchemaDocument = serde_yaml::from_str(
            r#"
literary:
  character:
    description: A person in the play
    attributes: [role, alias]
common:
  character:
    description: A person
  location:
    description: A place
"#,
        )
        .unwrap();
        let relations: SchemaDocument = serde_yaml::from_str(
            r#"
common:
  relationship:
    description: A link between two entities
    head_types: [character]
    tail_types: [character, location]
"#,
        )
        .unwrap();
        SchemaCatalog {
            entities,
            relations,
        }
    }

    #[test]
    fn test_strategy_specific_definition_wins() {
        let descriptor = catalog().entity("literary", "character");
        assert_eq!(descriptor.description, "A person in the play");
        assert_eq!(descriptor.attributes.len(), 2);
    }

    #[test]
    fn test_falls_back_to_common() {
        assert_eq!(catalog().entity("literary", "location").description, "A place");
        assert_eq!(catalog().entity("business", "character").description, "A person");
    }

    #[test]
    fn test_synthesizes_minimal_descriptor() {
        let entity = catalog().entity("literary", "spaceship");
        assert_eq!(entity.description, "spaceship entity");
        assert!(entity.attributes.is_empty());
        assert!(entity.head_types.is_none());

        let relation = catalog().relation("literary", "orbits");
        assert_eq!(relation.description, "orbits relation");
        assert_eq!(relation.head_types, Some(vec![]));
        assert_eq!(relation.tail_types, Some(vec![]));
    }

    #[test]
    fn test_relation_lookup_reads_type_lists() {
        let relation = catalog().relation("news", "relationship");
        assert_eq!(relation.head_types, Some(vec!["character".to_string()]));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = SchemaCatalog::load(&dir.path().join("absent"));
        assert_eq!(loaded, SchemaCatalog::default());
    }

    #[test]
    fn test_malformed_file_empties_catalog() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("entities.yaml"), "common: [not, a, map").unwrap();
        let loaded = SchemaCatalog::load(dir.path());
        assert!(loaded.entities.is_empty());
        assert!(loaded.relations.is_empty());
    }
}
