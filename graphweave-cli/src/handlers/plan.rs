//! Engine call planning handler

use crate::args::PlanArgs;
use crate::context::GraphweaveCliContext;
use crate::output::{print_call_spec, print_json};
use crate::utils::build_request;
use graphweave::extraction::EngineRequest;
use serde_json::json;

pub fn handle_plan_command(
    args: PlanArgs,
    ctx: &GraphweaveCliContext,
    output_format: &str,
) -> graphweave::Result<()> {
    let request = build_request(&args)?;
    let call = ctx.orchestrator.run(&request)?;

    if output_format == "json" {
        let engine_request =
            EngineRequest::new(call.clone(), ctx.config.model.clone(), ctx.config.engine.clone());
        print_json(&json!({
            "strategy": call.strategy.name,
            "call": call,
            "options": engine_request.options(),
            "model_id": ctx.config.model.model_id,
        }));
    } else {
        print_call_spec(&call);
    }

    Ok(())
}
