//! Command enum definitions
//!
//! This module contains the top-level parser and all command enums that
//! define the command structure.

use crate::args::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graphweave-cli")]
#[command(about = "Plan extraction calls and turn extraction results into graphs", long_about = None)]
#[command(version = graphweave::VERSION)]
pub struct Cli {
    /// Configuration file (toml, yaml or json)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Definitions directory holding strategies/, schemas/ and templates/
    #[arg(long, short, global = true)]
    pub definitions: Option<PathBuf>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    pub output: String,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display version information
    Version,

    /// Inspect extraction strategies
    #[command(subcommand)]
    Strategy(StrategyCommands),

    /// Show the engine call an extraction request resolves to
    #[command(long_about = r#"
Resolve a strategy for the given text and overrides, derive the sampling
parameters and compose the prompt. Prints the call that would be handed to the
extraction engine; no engine is contacted.

RESOLUTION:
  • --strategy alone uses the stored strategy as is
  • --strategy plus any override derives "<name>_custom"
  • --entity/--relation without --strategy builds "custom"
  • anything else, including an unknown name, uses "fallback"

EXAMPLES:
  graphweave-cli plan "ROMEO. But soft!" --strategy literary
  graphweave-cli plan --file act2.txt --strategy literary --breadth minimal
  graphweave-cli plan "Acme hired Jane." -e person -e organization -r relationship
  graphweave-cli plan "..." --set max_workers=10 --set temperature=0.5
"#)]
    Plan(PlanArgs),

    /// Normalize an engine result into nodes and relationships
    Graph(GraphArgs),

    /// Generate Cypher statements for an engine result
    #[command(long_about = r#"
Normalize an engine result and print Cypher statements for it.

EXAMPLES:
  graphweave-cli cypher result.json
  graphweave-cli cypher result.json --merge
  graphweave-cli cypher result.json --batch-size 500
"#)]
    Cypher(CypherArgs),

    /// Write an interactive HTML preview of an engine result
    Preview(PreviewArgs),

    /// Summarize the graph of an engine result
    Stats(StatsArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Subcommand)]
pub enum StrategyCommands {
    /// List the strategies in the definitions directory
    #[command(alias = "ls")]
    List,

    /// Show a strategy's vocabulary and granularity
    #[command(alias = "get")]
    Show(StrategyNameArgs),

    /// Print the prompt composed for a strategy
    Prompt(StrategyNameArgs),
}
