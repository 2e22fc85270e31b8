use crate::context::{ExecutionContext, RenderSettings};
use anyhow::Result;
use nimbus_render::to_value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Plan {
    name: String,
    memory: u64,
    cpu_milli: u64,
    #[serde(default)]
    default: bool,
}

pub fn list(ctx: &ExecutionContext, render: &RenderSettings) -> Result<()> {
    let plans: Vec<Plan> = ctx.client()?.get("/plans")?;
    render.print_list(&to_value(&plans)?)
}
