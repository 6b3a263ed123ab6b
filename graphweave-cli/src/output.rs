use colored::*;
use graphweave::GraphweaveError;
use graphweave::extraction::EngineCallSpec;
use graphweave::graph::{GraphData, GraphStats};
use graphweave::strategy::StrategySummary;
use serde::Serialize;
use serde_json::json;

pub struct CliColors;

impl CliColors {
    pub fn success() -> Color {
        Color::TrueColor {
            r: 34,
            g: 197,
            b: 94,
        }
    }

    pub fn error() -> Color {
        Color::TrueColor {
            r: 239,
            g: 68,
            b: 68,
        }
    }

    pub fn warning() -> Color {
        Color::TrueColor {
            r: 245,
            g: 158,
            b: 11,
        }
    }

    pub fn info() -> Color {
        Color::TrueColor {
            r: 59,
            g: 130,
            b: 246,
        }
    }

    pub fn entity() -> Color {
        Color::TrueColor {
            r: 52,
            g: 152,
            b: 219,
        }
    }

    pub fn relation() -> Color {
        Color::TrueColor {
            r: 230,
            g: 126,
            b: 34,
        }
    }

    pub fn muted() -> Color {
        Color::TrueColor {
            r: 148,
            g: 163,
            b: 184,
        }
    }

    pub fn primary() -> Color {
        Color::White
    }

    pub fn accent() -> Color {
        Color::TrueColor {
            r: 155,
            g: 89,
            b: 182,
        }
    }
}

/// Stable machine-readable code for an error
pub fn error_code(error: &GraphweaveError) -> &'static str {
    match error {
        GraphweaveError::NotFound(_) => "NOT_FOUND",
        GraphweaveError::Parse(_) => "PARSE_ERROR",
        GraphweaveError::InvalidStrategy(_) => "INVALID_STRATEGY",
        GraphweaveError::Configuration(_) => "CONFIGURATION_ERROR",
        GraphweaveError::Logging(_) => "LOGGING_ERROR",
        GraphweaveError::Engine(_) => "ENGINE_ERROR",
        GraphweaveError::Io(_) => "IO_ERROR",
        GraphweaveError::Serialization(_) => "SERIALIZATION_ERROR",
        GraphweaveError::Other(_) => "OTHER_ERROR",
    }
}

/// Output a GraphweaveError in structured JSON format
pub fn output_error_json(error: &GraphweaveError, output_format: &str) {
    if output_format == "json" {
        let error_response = json!({
            "error": true,
            "code": error_code(error),
            "message": error.to_string(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        eprintln!("{}", format_error(&error.to_string()));
    }
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".color(CliColors::success()).bold(), msg)
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".color(CliColors::error()).bold(), msg)
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".color(CliColors::warning()).bold(), msg)
}

pub fn format_info(msg: &str) -> String {
    format!("{} {}", "ℹ".color(CliColors::info()).bold(), msg)
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn heading(title: &str) {
    println!("{}", format!("━━━ {} ━━━", title).color(CliColors::accent()).bold());
}

fn field(name: &str, value: impl std::fmt::Display) {
    println!(
        "{}: {}",
        name.color(CliColors::muted()),
        value.to_string().color(CliColors::primary())
    );
}

pub fn print_strategy_list(names: &[String]) {
    if names.is_empty() {
        println!("{}", format_warning("No strategies found"));
        return;
    }
    heading("Strategies");
    for name in names {
        println!("  • {}", name.color(CliColors::primary()).bold());
    }
}

pub fn print_strategy(summary: &StrategySummary) {
    heading(&summary.name);
    field("Description", &summary.description);
    println!(
        "{}: {}",
        "Entities".color(CliColors::muted()),
        summary.entities.join(", ").color(CliColors::entity())
    );
    println!(
        "{}: {}",
        "Relations".color(CliColors::muted()),
        summary.relations.join(", ").color(CliColors::relation())
    );
    let granularity = &summary.granularity;
    field(
        "Granularity",
        format!(
            "breadth={} depth={} confidence={} context_scope={}",
            granularity.breadth, granularity.depth, granularity.confidence, granularity.context_scope
        ),
    );
}

pub fn print_call_spec(spec: &EngineCallSpec) {
    heading("Engine Call");
    field("Strategy", &spec.strategy.name);
    field("Passes", spec.parameters.passes);
    field("Context window", format!("{} chars", spec.parameters.context_window_chars));
    field("Temperature", spec.parameters.temperature);
    field("Examples", spec.examples.len());
    if !spec.engine_overrides.is_empty() {
        let overrides: Vec<String> = spec
            .engine_overrides
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        field("Overrides", overrides.join(", "));
    }
    println!();
    heading("Prompt");
    println!("{}", spec.prompt);
}

pub fn print_graph(graph: &GraphData) {
    heading(&format!("Nodes ({})", graph.nodes.len()));
    for node in &graph.nodes {
        println!(
            "  {} {} {}",
            node.label.color(CliColors::entity()).bold(),
            node.text().unwrap_or_default(),
            format!("[{}]", node.id).color(CliColors::muted())
        );
    }
    println!();
    heading(&format!("Relationships ({})", graph.relationships.len()));
    for edge in &graph.relationships {
        println!(
            "  {} -[{}]-> {}",
            edge.source_id.color(CliColors::muted()),
            edge.edge_type.color(CliColors::relation()).bold(),
            edge.target_id.color(CliColors::muted())
        );
    }
}

pub fn print_stats(stats: &GraphStats) {
    heading("Graph Statistics");
    field("Total nodes", stats.total_nodes);
    field("Total relationships", stats.total_relationships);
    field("Unique documents", stats.unique_documents);
    for (label, count) in &stats.node_types {
        println!("  {} {}", label.color(CliColors::entity()), count);
    }
    for (edge_type, count) in &stats.relationship_types {
        println!("  {} {}", edge_type.color(CliColors::relation()), count);
    }
}
