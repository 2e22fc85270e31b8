use crate::context::{ExecutionContext, RenderSettings};
use anyhow::{bail, Result};
use nimbus_render::to_value;
use serde::Serialize;
use std::fs;
use std::process::Command;

#[derive(Debug, Serialize)]
struct PluginRow {
    name: String,
    path: String,
}

pub fn list(ctx: &ExecutionContext, render: &RenderSettings) -> Result<()> {
    let dir = ctx.plugins_dir();
    let mut rows: Vec<PluginRow> = Vec::new();
    if dir.is_dir() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            rows.push(PluginRow {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().to_string_lossy().into_owned(),
            });
        }
    }
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    render.print_list(&to_value(&rows)?)
}

/// Run an unrecognized subcommand as an external plugin.
///
/// The first token names an executable under the plugin directory; the rest
/// are passed through untouched. The resolved target and token travel via
/// environment so plugins never parse our config files.
pub fn delegate(ctx: &ExecutionContext, args: &[String]) -> Result<()> {
    let Some((name, rest)) = args.split_first() else {
        bail!("no command given");
    };

    let path = ctx.plugins_dir().join(name);
    if !path.is_file() {
        bail!(
            "\"{}\" is not a nimbus command and no plugin was found at {}",
            name,
            path.display()
        );
    }

    let mut command = Command::new(&path);
    command.args(rest);
    if let Ok((label, url)) = ctx.current_target() {
        command.env("NIMBUS_TARGET", url);
        if let Some(token) = ctx.token()? {
            command.env("NIMBUS_TOKEN", token);
        }
        command.env("NIMBUS_TARGET_LABEL", label);
    }

    let status = command.status()?;
    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}
