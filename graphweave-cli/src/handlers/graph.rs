//! Handlers turning engine result files into graphs, statements and pages

use crate::args::{CypherArgs, GraphArgs, PreviewArgs, StatsArgs};
use crate::context::GraphweaveCliContext;
use crate::output::{format_info, format_success, print_graph, print_json, print_stats};
use crate::utils::read_document;
use graphweave::graph::{GraphData, GraphNormalizer, GraphPreview, GraphStats, StatementGenerator};
use serde_json::json;
use std::path::Path;

fn load_graph(input: &Path) -> graphweave::Result<GraphData> {
    let document = read_document(input)?;
    Ok(GraphNormalizer::new().normalize_document(&document))
}

pub fn handle_graph_command(args: GraphArgs, output_format: &str) -> graphweave::Result<()> {
    let mut document = read_document(&args.input)?;
    if document.document_id.is_none() {
        document.document_id = args.document_id;
    }

    let (graph, report) = GraphNormalizer::new()
        .normalize_with_report(&document.extractions, document.document_id_or_default());

    if output_format == "json" {
        print_json(&graph);
    } else {
        print_graph(&graph);
        if report.dropped_relations > 0 {
            println!();
            println!(
                "{}",
                format_info(&format!(
                    "{} relation record(s) without head/tail linkage were dropped",
                    report.dropped_relations
                ))
            );
        }
    }

    Ok(())
}

pub fn handle_cypher_command(args: CypherArgs, output_format: &str) -> graphweave::Result<()> {
    let graph = load_graph(&args.input)?;
    let generator = StatementGenerator::new();

    match args.batch_size {
        Some(batch_size) if !args.merge => {
            let batches = generator.generate_batches(&graph, batch_size);
            if output_format == "json" {
                print_json(&json!({ "batches": batches }));
            } else {
                for (i, batch) in batches.iter().enumerate() {
                    println!("// batch {}", i + 1);
                    println!("{}", batch);
                }
            }
        }
        _ => {
            let statements = if args.merge {
                generator.generate_merge(&graph)
            } else {
                generator.generate_create(&graph)
            };
            if output_format == "json" {
                print_json(&statements);
            } else {
                println!("{}", statements.script());
            }
        }
    }

    Ok(())
}

pub fn handle_preview_command(
    args: PreviewArgs,
    ctx: &GraphweaveCliContext,
    output_format: &str,
) -> graphweave::Result<()> {
    let graph = load_graph(&args.input)?;
    let preview = GraphPreview::new(ctx.config.preview.clone());
    let path = preview.save(&graph, args.out.as_deref(), &args.title)?;

    if output_format == "json" {
        print_json(&json!({
            "path": path,
            "nodes": graph.nodes.len(),
            "relationships": graph.relationships.len(),
        }));
    } else {
        println!(
            "{}",
            format_success(&format!("Preview written to {}", path.display()))
        );
    }

    Ok(())
}

pub fn handle_stats_command(args: StatsArgs, output_format: &str) -> graphweave::Result<()> {
    let stats = GraphStats::from(&load_graph(&args.input)?);

    if output_format == "json" {
        print_json(&stats);
    } else {
        print_stats(&stats);
    }

    Ok(())
}
