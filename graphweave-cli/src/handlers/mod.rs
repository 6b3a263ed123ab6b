//! Command handlers for the Graphweave CLI

pub mod graph;
pub mod plan;
pub mod strategy;

pub use graph::{
    handle_cypher_command, handle_graph_command, handle_preview_command, handle_stats_command,
};
pub use plan::handle_plan_command;
pub use strategy::handle_strategy_command;
