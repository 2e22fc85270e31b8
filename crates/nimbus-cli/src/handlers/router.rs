use crate::context::{ExecutionContext, RenderSettings};
use anyhow::Result;
use nimbus_render::to_value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Router {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    default: bool,
}

pub fn list(ctx: &ExecutionContext, render: &RenderSettings) -> Result<()> {
    let routers: Vec<Router> = ctx.client()?.get("/routers")?;
    render.print_list(&to_value(&routers)?)
}
