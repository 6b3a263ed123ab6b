use clap::{CommandFactory, Parser};
use graphweave_cli::handlers::{
    handle_cypher_command, handle_graph_command, handle_plan_command, handle_preview_command,
    handle_stats_command, handle_strategy_command,
};
use graphweave_cli::{Cli, Commands, GraphweaveCliContext, output_error_json};
use std::process::ExitCode;
use tracing::Level;

fn main() -> ExitCode {
    let cli_args = Cli::parse();

    // Priority: env var > cli arg > default
    let output_format = std::env::var("GRAPHWEAVE_OUTPUT").unwrap_or_else(|_| cli_args.output.clone());

    let is_quiet = cli_args.quiet
        || std::env::var("GRAPHWEAVE_QUIET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

    // JSON output stays clean: logs go to stderr and only errors by default
    let log_level = if is_quiet || output_format == "json" {
        Level::ERROR
    } else if cli_args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli_args, &output_format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output_error_json(&e, &output_format);
            ExitCode::FAILURE
        }
    }
}

fn run(cli_args: Cli, output_format: &str) -> graphweave::Result<()> {
    let context = || GraphweaveCliContext::new(cli_args.config.clone(), cli_args.definitions.clone());

    match cli_args.command {
        Commands::Version => {
            println!("Graphweave CLI v{}", graphweave::VERSION);
        }

        Commands::Strategy(cmd) => handle_strategy_command(cmd, &context()?, output_format)?,

        Commands::Plan(args) => handle_plan_command(args, &context()?, output_format)?,

        Commands::Graph(args) => handle_graph_command(args, output_format)?,

        Commands::Cypher(args) => handle_cypher_command(args, output_format)?,

        Commands::Preview(args) => handle_preview_command(args, &context()?, output_format)?,

        Commands::Stats(args) => handle_stats_command(args, output_format)?,

        Commands::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(
                clap_complete::Shell::from(args.shell),
                &mut cmd,
                "graphweave-cli",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}
