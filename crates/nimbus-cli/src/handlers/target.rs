use crate::context::{ExecutionContext, RenderSettings};
use anyhow::Result;
use nimbus_client::Targets;
use nimbus_render::to_value;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TargetRow {
    current: String,
    label: String,
    url: String,
}

pub fn add(ctx: &ExecutionContext, label: &str, url: &str, set_current: bool) -> Result<()> {
    let mut targets = Targets::load_from(&ctx.targets_path())?;
    targets.add(label, url, set_current)?;
    targets.save_to(&ctx.targets_path())?;
    println!("{}", format!("New target \"{}\" added.", label).green());
    Ok(())
}

pub fn list(ctx: &ExecutionContext, render: &RenderSettings) -> Result<()> {
    let targets = ctx.targets()?;
    let rows: Vec<TargetRow> = targets
        .targets
        .iter()
        .map(|(label, entry)| TargetRow {
            current: if targets.current.as_deref() == Some(label) {
                "*".to_string()
            } else {
                String::new()
            },
            label: label.clone(),
            url: entry.url.clone(),
        })
        .collect();
    render.print_list(&to_value(&rows)?)
}

pub fn set(ctx: &ExecutionContext, label: &str) -> Result<()> {
    let mut targets = Targets::load_from(&ctx.targets_path())?;
    targets.set_current(label)?;
    targets.save_to(&ctx.targets_path())?;
    println!("Target set to \"{}\".", label);
    Ok(())
}

pub fn remove(ctx: &ExecutionContext, label: &str) -> Result<()> {
    let mut targets = Targets::load_from(&ctx.targets_path())?;
    targets.remove(label)?;
    targets.save_to(&ctx.targets_path())?;
    println!("Target \"{}\" removed.", label);
    Ok(())
}
