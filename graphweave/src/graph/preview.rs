//! Interactive HTML preview of a graph.
//!
//! Produces a single self-contained page drawing the graph with vis-network,
//! for checking extraction quality before importing into a database.

use super::{GraphData, GraphEdge, GraphNode, GraphStats};
use crate::config::PreviewConfig;
use crate::{GraphweaveError, Result};
use handlebars::{Handlebars, html_escape};
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Characters of node text shown on the canvas
const CAPTION_CHARS: usize = 20;

/// Node properties already shown in the generic part of a hover title
const CORE_NODE_KEYS: &[&str] = &[
    "text",
    "normalized_text",
    "document_id",
    "start_pos",
    "end_pos",
    "extraction_index",
    "alignment_status",
];

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{title}}</title>
<script type="text/javascript" src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
<style type="text/css">
  body { background-color: {{bgcolor}}; font-family: sans-serif; }
  #graph { width: {{width}}; height: {{height}}; border: 1px solid lightgray; }
</style>
</head>
<body>
<h1>{{title}}</h1>
<div id="graph"></div>
<script type="text/javascript">
  var nodes = new vis.DataSet({{{nodes}}});
  var edges = new vis.DataSet({{{edges}}});
  var options = {{{options}}};
  options.nodes = { font: { color: "{{font_color}}" } };
  var network = new vis.Network(document.getElementById("graph"), { nodes: nodes, edges: edges }, options);
</script>
</body>
</html>
"#;

/// Drawing style for one node label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub color: &'static str,
    pub shape: &'static str,
    pub size: u32,
    pub border_width: u32,
    pub border_color: &'static str,
}

/// Drawing style for one relationship type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeStyle {
    pub color: &'static str,
    pub width: u32,
}

/// Style for nodes labelled `label`.
pub fn node_style(label: &str) -> NodeStyle {
    match label {
        "CHARACTER" => NodeStyle {
            color: "#3498db",
            shape: "dot",
            size: 25,
            border_width: 2,
            border_color: "#2980b9",
        },
        "EMOTION" => NodeStyle {
            color: "#e74c3c",
            shape: "triangle",
            size: 20,
            border_width: 2,
            border_color: "#c0392b",
        },
        "THEME" => NodeStyle {
            color: "#9b59b6",
            shape: "square",
            size: 22,
            border_width: 2,
            border_color: "#8e44ad",
        },
        _ => NodeStyle {
            color: "#95a5a6",
            shape: "dot",
            size: 15,
            border_width: 1,
            border_color: "#7f8c8d",
        },
    }
}

/// Style for relationships of type `edge_type`.
pub fn edge_style(edge_type: &str) -> EdgeStyle {
    match edge_type {
        "RELATED_TO" => EdgeStyle {
            color: "#34495e",
            width: 2,
        },
        "FEELS" => EdgeStyle {
            color: "#e67e22",
            width: 3,
        },
        "INTERACTS_WITH" => EdgeStyle {
            color: "#9b59b6",
            width: 2,
        },
        _ => EdgeStyle {
            color: "#bdc3c7",
            width: 1,
        },
    }
}

#[derive(Serialize)]
struct PageData<'a> {
    title: &'a str,
    width: &'a str,
    height: &'a str,
    bgcolor: &'a str,
    font_color: &'a str,
    nodes: String,
    edges: String,
    options: String,
}

/// Renders graphs as HTML pages.
#[derive(Clone)]
pub struct GraphPreview {
    config: PreviewConfig,
    handlebars: Handlebars<'static>,
}

impl std::fmt::Debug for GraphPreview {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphPreview")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for GraphPreview {
    fn default() -> Self {
        Self::new(PreviewConfig::default())
    }
}

impl GraphPreview {
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            config,
            handlebars: Handlebars::new(),
        }
    }

    /// Render `graph` as a complete HTML page.
    pub fn render(&self, graph: &GraphData, title: &str) -> Result<String> {
        let mut seen = HashSet::new();
        let nodes: Vec<Value> = graph
            .nodes
            .iter()
            .filter(|node| seen.insert(node.id.as_str()))
            .map(vis_node)
            .collect();

        let mut edges = Vec::new();
        for edge in &graph.relationships {
            let has_source = seen.contains(edge.source_id.as_str());
            let has_target = seen.contains(edge.target_id.as_str());
            if !has_source || !has_target {
                warn!(
                    edge_type = %edge.edge_type,
                    has_source,
                    has_target,
                    "Skipping relationship with missing endpoint"
                );
                continue;
            }
            edges.push(vis_edge(edge));
        }

        let data = PageData {
            title,
            width: &self.config.width,
            height: &self.config.height,
            bgcolor: &self.config.bgcolor,
            font_color: &self.config.font_color,
            nodes: script_json(&Value::Array(nodes))?,
            edges: script_json(&Value::Array(edges))?,
            options: script_json(&network_options())?,
        };

        self.handlebars
            .render_template(PAGE_TEMPLATE, &data)
            .map_err(|e| GraphweaveError::Other(format!("Failed to render preview: {e}")))
    }

    /// Write the page for `graph` to `path`, or to
    /// `visualization_<timestamp>.html` in the working directory.
    pub fn save(&self, graph: &GraphData, path: Option<&Path>, title: &str) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_file_name(),
        };
        let html = self.render(graph, title)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, html)?;

        info!(
            path = %path.display(),
            nodes = graph.nodes.len(),
            relationships = graph.relationships.len(),
            "Preview saved"
        );
        Ok(path)
    }

    /// Write one page per graph into `dir`, plus `comparison_stats.txt`.
    ///
    /// # Errors
    /// [`GraphweaveError::Other`] when `graphs` and `titles` differ in length.
    pub fn comparison_view<S: AsRef<str>>(
        &self,
        graphs: &[GraphData],
        titles: &[S],
        dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        if graphs.len() != titles.len() {
            return Err(GraphweaveError::Other(format!(
                "{} graphs but {} titles",
                graphs.len(),
                titles.len()
            )));
        }
        std::fs::create_dir_all(dir)?;

        let mut files = Vec::with_capacity(graphs.len());
        let mut report = String::from("Data Comparison Statistics\n");
        report.push_str(&"=".repeat(50));
        report.push_str("\n\n");

        for (i, (graph, title)) in graphs.iter().zip(titles).enumerate() {
            let title = title.as_ref();
            let file = dir.join(format!("comparison_{}_{}.html", i + 1, title.replace(' ', "_")));
            files.push(self.save(graph, Some(&file), &format!("Comparison {}: {}", i + 1, title))?);

            report.push_str(&format!("Title: {title}\n{}\n", GraphStats::from(graph)));
            report.push_str(&"-".repeat(30));
            report.push('\n');
        }

        let stats_file = dir.join("comparison_stats.txt");
        std::fs::write(&stats_file, report)?;
        info!(path = %stats_file.display(), "Comparison statistics saved");

        Ok(files)
    }
}

fn default_file_name() -> PathBuf {
    PathBuf::from(
        chrono::Local::now()
            .format("visualization_%Y%m%d_%H%M%S.html")
            .to_string(),
    )
}

fn vis_node(node: &GraphNode) -> Value {
    let style = node_style(&node.label);
    json!({
        "id": node.id,
        "label": caption(node.text().unwrap_or_default()),
        "title": node_hover(node),
        "color": {"background": style.color, "border": style.border_color},
        "shape": style.shape,
        "size": style.size,
        "borderWidth": style.border_width,
        "borderWidthSelected": style.border_width + 1,
        "chosen": true,
    })
}

fn vis_edge(edge: &GraphEdge) -> Value {
    let style = edge_style(&edge.edge_type);
    json!({
        "from": edge.source_id,
        "to": edge.target_id,
        "title": edge_hover(edge),
        "label": edge.edge_type,
        "color": style.color,
        "width": style.width,
        "arrows": {"to": {"enabled": true, "scaleFactor": 1.2}},
    })
}

/// Truncate `text` to the canvas caption length.
pub fn caption(text: &str) -> String {
    if text.chars().count() > CAPTION_CHARS {
        let head: String = text.chars().take(CAPTION_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

fn node_hover(node: &GraphNode) -> String {
    let mut lines = vec![
        line("ID", &node.id),
        line("Label", &node.label),
        line("Text", node.text().unwrap_or("N/A")),
    ];
    if let Some(start) = node.property("start_pos") {
        lines.push(position(start, node.property("end_pos")));
    }
    if let Some(document) = node.document_id().filter(|d| !d.is_empty()) {
        lines.push(line("Document", document));
    }

    let extra_keys: Vec<&str> = match node.label.as_str() {
        "CHARACTER" => vec!["role", "alias", "title"],
        "EMOTION" => vec!["feeling", "category"],
        _ => node
            .properties
            .keys()
            .map(String::as_str)
            .filter(|key| !CORE_NODE_KEYS.contains(key))
            .collect(),
    };
    for key in extra_keys {
        if let Some(value) = node.property(key).filter(|v| is_truthy(v)) {
            lines.push(line(&title_case(key), &display(value)));
        }
    }
    lines.join("<br>")
}

fn edge_hover(edge: &GraphEdge) -> String {
    let field = |key: &str| {
        edge.property(key)
            .map(display)
            .unwrap_or_else(|| "N/A".to_string())
    };
    let mut lines = vec![
        line("Type", &edge.edge_type),
        line("Trigger", &field("trigger_text")),
        line("From", &format!("{} ({})", field("head_text"), field("head_class"))),
        line("To", &format!("{} ({})", field("tail_text"), field("tail_class"))),
    ];
    if let Some(start) = edge.property("start_pos") {
        lines.push(position(start, edge.property("end_pos")));
    }
    if let Some(document) = edge.document_id().filter(|d| !d.is_empty()) {
        lines.push(line("Document", document));
    }
    lines.join("<br>")
}

fn line(name: &str, value: &str) -> String {
    format!("<b>{}:</b> {}", name, html_escape(value))
}

fn position(start: &Value, end: Option<&Value>) -> String {
    let end = end.map(display).unwrap_or_else(|| "None".to_string());
    line("Position", &format!("{}-{}", display(start), end))
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => true,
    }
}

/// `home_town` becomes `Home_Town`
fn title_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut at_word_start = true;
    for c in key.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

fn network_options() -> Value {
    json!({
        "physics": {
            "enabled": true,
            "stabilization": {"iterations": 100},
            "barnesHut": {
                "gravitationalConstant": -8000,
                "centralGravity": 0.3,
                "springLength": 95,
                "springConstant": 0.04,
                "damping": 0.09
            }
        },
        "interaction": {
            "hover": true,
            "hoverConnectedEdges": true,
            "selectConnectedEdges": false
        },
        "edges": {"arrows": {"to": {"enabled": true}}}
    })
}

/// JSON safe to inline in a `<script>` element.
fn script_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ExtractionRecord;
    use crate::graph::GraphNormalizer;

    fn graph() -> GraphData {
        GraphNormalizer::new().normalize(
            &[
                ExtractionRecord::new("character", "JULIET").with_attribute("role", "speaker"),
                ExtractionRecord::new("character", "Romeo"),
                ExtractionRecord::new("emotion", "O Romeo, Romeo! wherefore art thou Romeo?"),
                ExtractionRecord::relation(
                    "wherefore",
                    ("JULIET", "character"),
                    "addresses",
                    ("Romeo", "character"),
                ),
                ExtractionRecord::relation("is", ("Juliet", "character"), "metaphor", ("the sun", "symbol")),
            ],
            "doc_1",
        )
    }

    #[test]
    fn test_caption() {
        assert_eq!(caption("JULIET"), "JULIET");
        assert_eq!(caption("O Romeo, Romeo! wherefore"), "O Romeo, Romeo! wher...");
        assert_eq!(caption("ééééééééééééééééééééé").chars().count(), 23);
    }

    #[test]
    fn test_styles() {
        assert_eq!(node_style("EMOTION").shape, "triangle");
        assert_eq!(node_style("LOCATION").border_width, 1);
        assert_eq!(edge_style("FEELS").width, 3);
        assert_eq!(edge_style("ADDRESSES").color, "#bdc3c7");
    }

    #[test]
    fn test_render_skips_dangling_edges() {
        let html = GraphPreview::default().render(&graph(), "Balcony").unwrap();

        assert!(html.contains("<title>Balcony</title>"));
        assert!(html.contains("\"label\":\"ADDRESSES\""));
        assert!(!html.contains("METAPHOR"));
        assert!(html.contains("gravitationalConstant"));
        assert!(html.contains("<b>Role:</b> speaker"));
    }

    #[test]
    fn test_render_escapes_script_breakout() {
        let graph = GraphNormalizer::new()
            .normalize(&[ExtractionRecord::new("character", "</script><b>")], "doc_1");
        let html = GraphPreview::default().render(&graph, "t").unwrap();
        assert!(!html.contains("</script><b>"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out.html");
        let written = GraphPreview::default()
            .save(&graph(), Some(&target), "Balcony")
            .unwrap();

        assert_eq!(written, target);
        assert!(std::fs::read_to_string(&target).unwrap().contains("vis.Network"));
    }

    #[test]
    fn test_default_file_name() {
        let name = default_file_name().to_string_lossy().to_string();
        assert!(name.starts_with("visualization_"));
        assert!(name.ends_with(".html"));
        assert_eq!(name.len(), "visualization_20250101_120000.html".len());
    }

    #[test]
    fn test_comparison_view() {
        let dir = tempfile::tempdir().unwrap();
        let files = GraphPreview::default()
            .comparison_view(&[graph(), GraphData::default()], &["Full run", "Empty"], dir.path())
            .unwrap();

        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("comparison_1_Full_run.html"));
        let stats = std::fs::read_to_string(dir.path().join("comparison_stats.txt")).unwrap();
        assert!(stats.starts_with("Data Comparison Statistics\n"));
        assert!(stats.contains("Title: Full run\nTotal Nodes: 3\n"));
        assert!(stats.contains("Title: Empty\nTotal Nodes: 0\n"));
    }

    #[test]
    fn test_comparison_view_length_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let result = GraphPreview::default().comparison_view(&[graph()], &["a", "b"], dir.path());
        assert!(matches!(result, Err(GraphweaveError::Other(_))));
    }
}
