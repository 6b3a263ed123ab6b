//! Normalization of engine records into the canonical graph.

use super::ids::{class_to_label, node_id, normalize_text};
use super::{DEFAULT_EDGE_TYPE, GraphData, GraphEdge, GraphNode, Properties};
use crate::extraction::{AnnotatedDocument, ExtractionRecord, RecordKind};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Attribute keys copied onto `character` nodes
const CHARACTER_ATTRIBUTES: &[&str] = &["role", "alias", "title"];

/// Attribute keys copied onto `emotion` nodes
const EMOTION_ATTRIBUTES: &[&str] = &["feeling", "category"];

/// What a normalization pass saw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub entity_records: usize,
    pub relation_records: usize,
    /// Relation records missing head/tail linkage
    pub dropped_relations: usize,
    /// Records with no class at all
    pub unclassified_records: usize,
}

/// Turns extraction records into nodes and edges.
///
/// A pure function of its input: the same records and document id always
/// produce the same graph, ids included. Nodes are not de-duplicated; two
/// mentions of the same entity yield two nodes sharing an id.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphNormalizer;

impl GraphNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalize `records` from document `document_id`.
    pub fn normalize(&self, records: &[ExtractionRecord], document_id: &str) -> GraphData {
        self.normalize_with_report(records, document_id).0
    }

    /// Normalize an engine result, defaulting its id to `unknown_doc`.
    pub fn normalize_document(&self, document: &AnnotatedDocument) -> GraphData {
        self.normalize(&document.extractions, document.document_id_or_default())
    }

    /// Normalize and report how many records were used or dropped.
    pub fn normalize_with_report(
        &self,
        records: &[ExtractionRecord],
        document_id: &str,
    ) -> (GraphData, NormalizeReport) {
        let mut report = NormalizeReport::default();
        let mut graph = GraphData::default();

        for record in records {
            match record.kind() {
                RecordKind::Entity => {
                    report.entity_records += 1;
                    graph.nodes.push(entity_node(record, document_id));
                }
                RecordKind::Relation => report.relation_records += 1,
                RecordKind::Unclassified => report.unclassified_records += 1,
            }
        }

        for record in records.iter().filter(|r| r.kind() == RecordKind::Relation) {
            match relation_edge(record, document_id) {
                Some(edge) => graph.relationships.push(edge),
                None => report.dropped_relations += 1,
            }
        }

        if report.dropped_relations > 0 {
            debug!(
                document_id,
                dropped = report.dropped_relations,
                "Dropped relation records without head/tail linkage"
            );
        }

        (graph, report)
    }
}

fn entity_node(record: &ExtractionRecord, document_id: &str) -> GraphNode {
    let class = record.extraction_class.as_str();
    let text = record.extraction_text.as_str();

    let mut node = GraphNode::new(node_id(class, text), class_to_label(class));
    let props = &mut node.properties;
    insert(props, "text", text);
    insert(props, "normalized_text", normalize_text(text));
    insert(props, "document_id", document_id);
    insert(props, "start_pos", record.start_pos());
    insert(props, "end_pos", record.end_pos());
    insert(props, "extraction_index", record.extraction_index);
    insert(props, "alignment_status", record.alignment_status.clone());

    let attributes = record.attribute_map();
    match class {
        "character" => copy_keys(props, attributes, CHARACTER_ATTRIBUTES),
        "emotion" => copy_keys(props, attributes, EMOTION_ATTRIBUTES),
        _ => {
            // Identity stays with the computed id and label
            for (key, value) in attributes.into_iter().flatten() {
                if key != "id" && key != "label" {
                    insert(props, key, value.clone());
                }
            }
        }
    }
    node
}

fn relation_edge(record: &ExtractionRecord, document_id: &str) -> Option<GraphEdge> {
    let attributes = record.attribute_map()?;
    let head_text = linkage(attributes, "head_text")?;
    let head_class = linkage(attributes, "head_class")?;
    let tail_text = linkage(attributes, "tail_text")?;
    let tail_class = linkage(attributes, "tail_class")?;

    // Cypher has no empty relationship type
    let edge_type = attributes
        .get("relation_type")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map_or_else(|| DEFAULT_EDGE_TYPE.to_string(), str::to_uppercase);

    let mut edge = GraphEdge::new(
        node_id(&head_class, &head_text),
        node_id(&tail_class, &tail_text),
        edge_type,
    );
    let props = &mut edge.properties;
    insert(props, "trigger_text", record.extraction_text.as_str());
    insert(props, "document_id", document_id);
    insert(props, "start_pos", record.start_pos());
    insert(props, "end_pos", record.end_pos());
    insert(props, "extraction_index", record.extraction_index);
    insert(props, "head_text", head_text);
    insert(props, "head_class", head_class);
    insert(props, "tail_text", tail_text);
    insert(props, "tail_class", tail_class);
    Some(edge)
}

/// A required linkage attribute as text; blank or missing yields `None`.
fn linkage(attributes: &Map<String, Value>, key: &str) -> Option<String> {
    match attributes.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn copy_keys(props: &mut Properties, attributes: Option<&Map<String, Value>>, keys: &[&str]) {
    let Some(attributes) = attributes else {
        return;
    };
    for key in keys {
        if let Some(value) = attributes.get(*key) {
            insert(props, key, value.clone());
        }
    }
}

/// Insert `value` unless it is null.
fn insert(props: &mut Properties, key: &str, value: impl Into<Value>) {
    let value = value.into();
    if !value.is_null() {
        props.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn romeo() -> ExtractionRecord {
        ExtractionRecord::new("character", "ROMEO")
            .with_attribute("role", "speaker")
            .with_interval(0, 5)
            .with_index(1)
            .with_alignment("match_exact")
    }

    #[test]
    fn test_character_node_fields() {
        let graph = GraphNormalizer::new().normalize(&[romeo()], "doc_1");
        let node = &graph.nodes[0];

        assert_eq!(node.id, node_id("character", "romeo"));
        assert_eq!(node.label, "CHARACTER");
        let keys: Vec<_> = node.properties.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "text",
                "normalized_text",
                "document_id",
                "start_pos",
                "end_pos",
                "extraction_index",
                "alignment_status",
                "role"
            ]
        );
        assert_eq!(node.properties["normalized_text"], "romeo");
    }

    #[test]
    fn test_known_classes_only_take_their_attributes() {
        let record = ExtractionRecord::new("emotion", "But soft!")
            .with_attribute("feeling", "gentle awe")
            .with_attribute("intensity", 3);
        let graph = GraphNormalizer::new().normalize(&[record], "doc_1");

        assert_eq!(graph.nodes[0].properties["feeling"], "gentle awe");
        assert!(graph.nodes[0].property("intensity").is_none());
    }

    #[test]
    fn test_other_classes_take_all_attributes() {
        let record = ExtractionRecord::new("location", "Verona")
            .with_attribute("region", "Veneto")
            .with_attribute("population", Value::Null)
            .with_attribute("id", "spoofed")
            .with_attribute("text", "Fair Verona");
        let graph = GraphNormalizer::new().normalize(&[record], "doc_1");
        let node = &graph.nodes[0];

        assert_eq!(node.id, node_id("location", "Verona"));
        assert_eq!(node.properties["region"], "Veneto");
        assert_eq!(node.properties["text"], "Fair Verona");
        assert!(node.property("population").is_none());
    }

    #[test]
    fn test_no_null_keys_without_interval() {
        let graph = GraphNormalizer::new().normalize(
            &[
                ExtractionRecord::new("character", "JULIET"),
                ExtractionRecord::relation("loves", ("JULIET", "character"), "loves", ("ROMEO", "character")),
            ],
            "doc_1",
        );
        let node = serde_json::to_value(&graph.nodes[0]).unwrap();
        let edge = serde_json::to_value(&graph.relationships[0]).unwrap();

        for value in [&node, &edge] {
            assert!(value.get("start_pos").is_none());
            assert!(value.get("end_pos").is_none());
            assert!(value.as_object().unwrap().values().all(|v| !v.is_null()));
        }
    }

    #[test]
    fn test_relation_edge() {
        let record = ExtractionRecord::relation(
            "wherefore art thou Romeo",
            ("JULIET", "character"),
            "addresses",
            ("Romeo", "character"),
        )
        .with_interval(18, 42);
        let graph = GraphNormalizer::new().normalize(&[record], "doc_1");
        let edge = &graph.relationships[0];

        assert_eq!(edge.source_id, node_id("character", "juliet"));
        assert_eq!(edge.target_id, node_id("character", "ROMEO"));
        assert_eq!(edge.edge_type, "ADDRESSES");
        assert_eq!(edge.trigger_text(), Some("wherefore art thou Romeo"));
        assert_eq!(edge.properties["start_pos"], 18);
        assert_eq!(edge.properties["head_text"], "JULIET");
    }

    #[test]
    fn test_missing_relation_type_defaults() {
        let record = ExtractionRecord::relation("near", ("a", "x"), "", ("b", "y"));
        let graph = GraphNormalizer::new().normalize(&[record], "doc_1");
        assert_eq!(graph.relationships[0].edge_type, DEFAULT_EDGE_TYPE);
    }

    #[test]
    fn test_relation_type_is_trimmed_and_uppercased() {
        let padded = ExtractionRecord::relation("loves", ("a", "x"), " loves ", ("b", "y"));
        let blank = ExtractionRecord::relation("near", ("a", "x"), "   ", ("b", "y"));
        let graph = GraphNormalizer::new().normalize(&[padded, blank], "doc_1");

        assert_eq!(graph.relationships[0].edge_type, "LOVES");
        assert_eq!(graph.relationships[1].edge_type, DEFAULT_EDGE_TYPE);
    }

    #[test]
    fn test_incomplete_relations_are_dropped_and_counted() {
        let missing_tail_class = ExtractionRecord::new("relationship", "is")
            .with_attribute("head_text", "Juliet")
            .with_attribute("head_class", "character")
            .with_attribute("tail_text", "the sun");
        let not_a_map = ExtractionRecord {
            attributes: Some(json!("Juliet is the sun")),
            ..ExtractionRecord::new("relationship", "is")
        };

        let (graph, report) =
            GraphNormalizer::new().normalize_with_report(&[romeo(), missing_tail_class, not_a_map], "doc_1");

        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.relationships.is_empty());
        assert_eq!(report.relation_records, 2);
        assert_eq!(report.dropped_relations, 2);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let graph = GraphNormalizer::new().normalize(
            &[romeo(), ExtractionRecord::new("character", " Romeo ")],
            "doc_1",
        );
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].id, graph.nodes[1].id);
    }

    #[test]
    fn test_unclassified_records_are_ignored() {
        let (graph, report) = GraphNormalizer::new()
            .normalize_with_report(&[ExtractionRecord::new("", "stray")], "doc_1");
        assert!(graph.is_empty());
        assert_eq!(report.unclassified_records, 1);
    }

    #[test]
    fn test_document_default_id() {
        let document = AnnotatedDocument::new("ROMEO.", vec![romeo()]);
        let graph = GraphNormalizer::new().normalize_document(&document);
        assert_eq!(graph.nodes[0].document_id(), Some("unknown_doc"));
    }
}
