//! Summary counts over a graph.

use super::GraphData;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Node and relationship counts for one graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_relationships: usize,
    /// Nodes per label
    pub node_types: BTreeMap<String, usize>,
    /// Relationships per type
    pub relationship_types: BTreeMap<String, usize>,
    /// Distinct non-empty document ids across nodes
    pub unique_documents: usize,
}

impl From<&GraphData> for GraphStats {
    fn from(graph: &GraphData) -> Self {
        let mut node_types = BTreeMap::new();
        for node in &graph.nodes {
            *node_types.entry(node.label.clone()).or_insert(0) += 1;
        }

        let mut relationship_types = BTreeMap::new();
        for edge in &graph.relationships {
            *relationship_types.entry(edge.edge_type.clone()).or_insert(0) += 1;
        }

        let documents: BTreeSet<&str> = graph
            .nodes
            .iter()
            .filter_map(|node| node.document_id())
            .filter(|id| !id.is_empty())
            .collect();

        Self {
            total_nodes: graph.nodes.len(),
            total_relationships: graph.relationships.len(),
            node_types,
            relationship_types,
            unique_documents: documents.len(),
        }
    }
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Nodes: {}", self.total_nodes)?;
        writeln!(f, "Total Relationships: {}", self.total_relationships)?;
        writeln!(f, "Node Types: {}", counts(&self.node_types))?;
        writeln!(f, "Relationship Types: {}", counts(&self.relationship_types))?;
        write!(f, "Unique Documents: {}", self.unique_documents)
    }
}

fn counts(map: &BTreeMap<String, usize>) -> String {
    let pairs: Vec<String> = map.iter().map(|(key, n)| format!("{key}: {n}")).collect();
    format!("{{{}}}", pairs.join(", "))
}
