//! Cypher statement generation.

use super::{GraphData, GraphEdge, GraphNode, Properties};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

lazy_static! {
    static ref PLAIN_IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

/// Node and relationship statements for one graph.
///
/// Each side is a `;\n`-joined list terminated by `;`, or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CypherStatements {
    pub nodes: String,
    pub relationships: String,
}

impl CypherStatements {
    /// Both sides as one script, nodes first
    pub fn script(&self) -> String {
        [self.nodes.as_str(), self.relationships.as_str()]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Renders a [`GraphData`] as Cypher.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementGenerator;

impl StatementGenerator {
    pub fn new() -> Self {
        Self
    }

    /// `CREATE` statements for every node and relationship.
    pub fn generate_create(&self, graph: &GraphData) -> CypherStatements {
        CypherStatements {
            nodes: join(graph.nodes.iter().map(create_node)),
            relationships: join(graph.relationships.iter().map(create_relationship)),
        }
    }

    /// `MERGE ... SET` statements keyed on node id and relationship endpoints.
    pub fn generate_merge(&self, graph: &GraphData) -> CypherStatements {
        CypherStatements {
            nodes: join(
                graph
                    .nodes
                    .iter()
                    .filter(|node| !node.id.is_empty())
                    .map(merge_node),
            ),
            relationships: join(
                graph
                    .relationships
                    .iter()
                    .filter(|edge| !edge.source_id.is_empty() && !edge.target_id.is_empty())
                    .map(merge_relationship),
            ),
        }
    }

    /// `CREATE` scripts of at most `batch_size` items: node batches, then
    /// relationship batches.
    pub fn generate_batches(&self, graph: &GraphData, batch_size: usize) -> Vec<String> {
        let batch_size = batch_size.max(1);
        let node_batches = graph
            .nodes
            .chunks(batch_size)
            .map(|chunk| join(chunk.iter().map(create_node)));
        let relationship_batches = graph
            .relationships
            .chunks(batch_size)
            .map(|chunk| join(chunk.iter().map(create_relationship)));

        node_batches
            .chain(relationship_batches)
            .filter(|batch| !batch.is_empty())
            .collect()
    }
}

fn create_node(node: &GraphNode) -> String {
    let mut props = vec![format!("id: {}", string_literal(&node.id))];
    props.extend(property_pairs(&node.properties, ": ", ""));
    format!("CREATE (n:{} {{{}}})", identifier(&node.label), props.join(", "))
}

fn create_relationship(edge: &GraphEdge) -> String {
    let props = property_pairs(&edge.properties, ": ", "");
    let props = if props.is_empty() {
        String::new()
    } else {
        format!(" {{{}}}", props.join(", "))
    };
    format!(
        "{}\nCREATE (a)-[r:{}{}]->(b)",
        match_endpoints(edge),
        identifier(&edge.edge_type),
        props
    )
}

fn merge_node(node: &GraphNode) -> String {
    let mut statement = format!(
        "MERGE (n:{} {{id: {}}})",
        identifier(&node.label),
        string_literal(&node.id)
    );
    let sets = property_pairs(&node.properties, " = ", "n.");
    if !sets.is_empty() {
        statement.push_str("\nSET ");
        statement.push_str(&sets.join(", "));
    }
    statement
}

fn merge_relationship(edge: &GraphEdge) -> String {
    let mut statement = format!(
        "{}\nMERGE (a)-[r:{}]->(b)",
        match_endpoints(edge),
        identifier(&edge.edge_type)
    );
    let sets = property_pairs(&edge.properties, " = ", "r.");
    if !sets.is_empty() {
        statement.push_str("\nSET ");
        statement.push_str(&sets.join(", "));
    }
    statement
}

fn match_endpoints(edge: &GraphEdge) -> String {
    format!(
        "MATCH (a {{id: {}}}), (b {{id: {}}})",
        string_literal(&edge.source_id),
        string_literal(&edge.target_id)
    )
}

fn property_pairs(properties: &Properties, separator: &str, prefix: &str) -> Vec<String> {
    properties
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| format!("{prefix}{}{separator}{}", identifier(key), literal(value)))
        .collect()
}

fn join(statements: impl Iterator<Item = String>) -> String {
    let statements: Vec<String> = statements.collect();
    if statements.is_empty() {
        String::new()
    } else {
        format!("{};", statements.join(";\n"))
    }
}

/// Labels, types and keys that are not plain identifiers get backticks.
fn identifier(name: &str) -> String {
    if PLAIN_IDENTIFIER.is_match(name) {
        name.to_string()
    } else {
        format!("`{}`", name.replace('`', "``"))
    }
}

fn string_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_literal(s),
        Value::Array(items) => format!(
            "[{}]",
            items.iter().map(literal).collect::<Vec<_>>().join(", ")
        ),
        Value::Object(_) => string_literal(&value.to_string()),
    }
}
