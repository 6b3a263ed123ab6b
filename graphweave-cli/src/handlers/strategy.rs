//! Strategy inspection handlers

use crate::commands::StrategyCommands;
use crate::context::GraphweaveCliContext;
use crate::output::{print_json, print_strategy, print_strategy_list};
use serde_json::json;

pub fn handle_strategy_command(
    cmd: StrategyCommands,
    ctx: &GraphweaveCliContext,
    output_format: &str,
) -> graphweave::Result<()> {
    match cmd {
        StrategyCommands::List => {
            let names = ctx.store().list_available();
            if output_format == "json" {
                print_json(&json!({
                    "definitions_dir": ctx.config.definitions.dir,
                    "strategies": names,
                }));
            } else {
                print_strategy_list(&names);
            }
        }

        StrategyCommands::Show(args) => {
            let summary = ctx.store().describe(&args.name)?;
            if output_format == "json" {
                print_json(&summary);
            } else {
                print_strategy(&summary);
            }
        }

        StrategyCommands::Prompt(args) => {
            let strategy = ctx.store().load(&args.name)?;
            let prompt = ctx.orchestrator.composer().render(&strategy);
            if output_format == "json" {
                print_json(&json!({
                    "strategy": strategy.name,
                    "prompt_template": strategy.prompt_template,
                    "prompt": prompt,
                }));
            } else {
                println!("{}", prompt);
            }
        }
    }

    Ok(())
}
