//! External tests for graph normalization and statement generation
//!
//! Tests cover:
//! - Determinism and id stability
//! - Null omission and relation dropping
//! - Dangling edges
//! - End-to-end engine JSON to Cypher

use graphweave::extraction::{AnnotatedDocument, ExtractionRecord};
use graphweave::graph::*;
use serde_json::json;

fn balcony_records() -> Vec<ExtractionRecord> {
    vec![
        ExtractionRecord::new("character", "ROMEO")
            .with_attribute("role", "speaker")
            .with_interval(0, 5)
            .with_index(1),
        ExtractionRecord::new("emotion", "But soft!")
            .with_attribute("feeling", "gentle awe")
            .with_interval(7, 16)
            .with_index(2),
        ExtractionRecord::relation(
            "Juliet is the sun",
            ("Juliet", "character"),
            "metaphor",
            ("sun", "symbol"),
        )
        .with_index(3),
    ]
}

#[cfg(test)]
mod determinism_tests {
    use super::*;

    #[test]
    fn test_normalize_is_byte_identical_across_runs() {
        let normalizer = GraphNormalizer::new();
        let first = serde_json::to_string(&normalizer.normalize(&balcony_records(), "doc_1")).unwrap();
        let second = serde_json::to_string(&normalizer.normalize(&balcony_records(), "doc_1")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_id_ignores_case_and_whitespace() {
        assert_eq!(node_id("character", "Romeo"), node_id("character", "  romeo  "));
        assert_ne!(node_id("character", "Romeo"), node_id("emotion", "Romeo"));
    }

    #[test]
    fn test_id_is_a_stable_contract() {
        assert_eq!(node_id("character", "Romeo"), "character_61aa0578f43d4b18");
    }
}

#[cfg(test)]
mod omission_tests {
    use super::*;

    #[test]
    fn test_no_positions_without_interval() {
        let graph = GraphNormalizer::new().normalize(&balcony_records(), "doc_1");
        let edge = &graph.relationships[0];
        assert!(edge.property("start_pos").is_none());
        assert!(edge.property("end_pos").is_none());
        assert_eq!(edge.properties["extraction_index"], 3);
    }

    #[test]
    fn test_missing_tail_class_drops_only_that_relation() {
        let mut records = balcony_records();
        records.push(
            ExtractionRecord::new("relationship", "loves")
                .with_attribute("head_text", "Romeo")
                .with_attribute("head_class", "character")
                .with_attribute("tail_text", "Juliet"),
        );

        let (graph, report) = GraphNormalizer::new().normalize_with_report(&records, "doc_1");
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.relationships.len(), 1);
        assert_eq!(report.dropped_relations, 1);
    }

    #[test]
    fn test_lone_relation_dangles() {
        let record = ExtractionRecord::relation("sees", ("Romeo", "character"), "sees", ("Juliet", "character"));
        let graph = GraphNormalizer::new().normalize(&[record], "doc_1");

        assert!(graph.nodes.is_empty());
        assert_eq!(graph.relationships.len(), 1);
        assert_eq!(graph.dangling_edges().count(), 1);
    }
}

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_engine_json_to_cypher() {
        let document: AnnotatedDocument = serde_json::from_value(json!({
            "text": "ROMEO. But soft!",
            "extractions": [
                {"extraction_class": "character", "extraction_text": "ROMEO",
                 "char_interval": {"start_pos": 0, "end_pos": 5}},
                {"extraction_class": "relationship", "extraction_text": "But soft",
                 "attributes": {"head_text": "ROMEO", "head_class": "character",
                                "relation_type": "feels",
                                "tail_text": "But soft!", "tail_class": "emotion"}}
            ]
        }))
        .unwrap();

        let graph = GraphNormalizer::new().normalize_document(&document);
        assert_eq!(graph.nodes[0].document_id(), Some("unknown_doc"));

        let statements = StatementGenerator::new().generate_create(&graph);
        assert!(statements.nodes.contains("CREATE (n:CHARACTER {id: 'character_"));
        assert!(statements.relationships.contains("CREATE (a)-[r:FEELS {trigger_text: 'But soft'"));
        assert!(statements.script().ends_with(';'));

        let stats = GraphStats::from(&graph);
        assert_eq!(stats.relationship_types["FEELS"], 1);
        assert_eq!(stats.unique_documents, 1);
    }

    #[test]
    fn test_merge_statements_escape_quotes() {
        let graph = GraphNormalizer::new().normalize(
            &[ExtractionRecord::new("theme", "love's light")],
            "doc_1",
        );
        let merge = StatementGenerator::new().generate_merge(&graph);
        assert!(merge.nodes.contains(r"n.text = 'love\'s light'"));
    }
}
