//! Property graph built from extraction records.
//!
//! [`GraphNormalizer`] maps records to nodes and edges with deterministic
//! ids, [`StatementGenerator`] renders the result as Cypher and
//! [`GraphPreview`] draws it as an HTML page.

pub mod cypher;
pub mod ids;
pub mod model;
pub mod normalizer;
pub mod preview;
pub mod stats;

pub use cypher::{CypherStatements, StatementGenerator};
pub use ids::{class_to_label, node_id, normalize_text};
pub use model::{DEFAULT_EDGE_TYPE, GraphData, GraphEdge, GraphNode, Properties};
pub use normalizer::{GraphNormalizer, NormalizeReport};
pub use preview::{EdgeStyle, GraphPreview, NodeStyle, edge_style, node_style};
pub use stats::GraphStats;
