pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;
pub mod utils;

pub use commands::{Cli, Commands, StrategyCommands};
pub use context::GraphweaveCliContext;
pub use output::{
    CliColors, error_code, format_error, format_info, format_success, format_warning,
    output_error_json, print_call_spec, print_graph, print_json, print_stats, print_strategy,
    print_strategy_list,
};
pub use utils::{build_request, parse_assignment, read_document};
