//! Canonical property-graph model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Ordered property map of a node or edge. Never holds null values.
pub type Properties = Map<String, Value>;

/// Edge type used when a relation record names none
pub const DEFAULT_EDGE_TYPE: &str = "RELATED_TO";

/// An entity node.
///
/// Serializes flat: `id`, `label`, then the properties in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    #[serde(flatten)]
    pub properties: Properties,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            properties: Properties::new(),
        }
    }

    /// Look up a property
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Surface text of the mention
    pub fn text(&self) -> Option<&str> {
        self.property("text").and_then(Value::as_str)
    }

    /// Document the mention came from
    pub fn document_id(&self) -> Option<&str> {
        self.property("document_id").and_then(Value::as_str)
    }
}

/// A directed relationship between two node ids.
///
/// The endpoints are computed, not looked up, so either may be absent from
/// the node list of the same graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source_id: String,
    pub target_id: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    #[serde(flatten)]
    pub properties: Properties,
}

impl GraphEdge {
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            edge_type: edge_type.into(),
            properties: Properties::new(),
        }
    }

    /// Look up a property
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Text of the span that triggered the relation
    pub fn trigger_text(&self) -> Option<&str> {
        self.property("trigger_text").and_then(Value::as_str)
    }

    /// Document the relation came from
    pub fn document_id(&self) -> Option<&str> {
        self.property("document_id").and_then(Value::as_str)
    }
}

/// Output of normalization: `{nodes, relationships}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub relationships: Vec<GraphEdge>,
}

impl GraphData {
    pub fn new(nodes: Vec<GraphNode>, relationships: Vec<GraphEdge>) -> Self {
        Self {
            nodes,
            relationships,
        }
    }

    /// True when there are neither nodes nor relationships
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }

    /// Ids of all nodes, duplicates collapsed
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|node| node.id.as_str()).collect()
    }

    /// Relationships with an endpoint missing from the node list
    pub fn dangling_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        let ids = self.node_ids();
        self.relationships.iter().filter(move |edge| {
            !ids.contains(edge.source_id.as_str()) || !ids.contains(edge.target_id.as_str())
        })
    }

    /// Append another graph's nodes and relationships
    pub fn extend(&mut self, other: GraphData) {
        self.nodes.extend(other.nodes);
        self.relationships.extend(other.relationships);
    }
}
