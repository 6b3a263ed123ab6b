//! Command argument structures
//!
//! This module contains all CLI argument structs organized by command category.

use clap::Args;
use std::path::PathBuf;

// Strategy command arguments
#[derive(Args)]
pub struct StrategyNameArgs {
    /// Strategy name, e.g. literary
    pub name: String,
}

// Plan command arguments
#[derive(Args)]
pub struct PlanArgs {
    /// Text to extract from
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file instead
    #[arg(long, short)]
    pub file: Option<PathBuf>,

    /// Named strategy to start from
    #[arg(long, short)]
    pub strategy: Option<String>,

    /// Entity class to extract (repeatable)
    #[arg(long = "entity", short = 'e')]
    pub entities: Vec<String>,

    /// Relation class to extract (repeatable)
    #[arg(long = "relation", short = 'r')]
    pub relations: Vec<String>,

    /// Breadth override (minimal, standard, comprehensive)
    #[arg(long)]
    pub breadth: Option<String>,

    /// Depth override (surface, semantic, inferential)
    #[arg(long)]
    pub depth: Option<String>,

    /// Confidence override (high, medium, all)
    #[arg(long)]
    pub confidence: Option<String>,

    /// Context scope override (local, paragraph, document)
    #[arg(long)]
    pub context_scope: Option<String>,

    /// Engine option as key=value, value parsed as JSON when possible (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
}

// Graph output arguments
#[derive(Args)]
pub struct GraphArgs {
    /// Engine result JSON file
    pub input: PathBuf,

    /// Document id to use when the file has none
    #[arg(long)]
    pub document_id: Option<String>,
}

#[derive(Args)]
pub struct CypherArgs {
    /// Engine result JSON file
    pub input: PathBuf,

    /// Emit MERGE statements instead of CREATE
    #[arg(long)]
    pub merge: bool,

    /// Split CREATE statements into batches of this many items
    #[arg(long)]
    pub batch_size: Option<usize>,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Engine result JSON file
    pub input: PathBuf,

    /// Output HTML file (default: visualization_<timestamp>.html)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Page title
    #[arg(long, default_value = "Extraction Graph")]
    pub title: String,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Engine result JSON file
    pub input: PathBuf,
}

// Completions command arguments
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[clap(name = "powershell")]
    Power,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::Power => clap_complete::Shell::PowerShell,
        }
    }
}
