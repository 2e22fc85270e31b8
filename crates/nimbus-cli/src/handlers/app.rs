use crate::context::{ExecutionContext, RenderSettings};
use anyhow::{Context, Result};
use nimbus_render::{to_value, Summary, Value};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct AppItem {
    name: String,
    platform: String,
    #[serde(default)]
    teams: Vec<String>,
}

pub fn list(ctx: &ExecutionContext, render: &RenderSettings) -> Result<()> {
    let apps: Vec<AppItem> = ctx.client()?.get("/apps")?;
    render.print_list(&to_value(&apps)?)
}

pub fn info(ctx: &ExecutionContext, render: &RenderSettings, name: &str) -> Result<()> {
    let app = ctx.client()?.get_json(&format!("/apps/{}", name))?;
    render.print_info(&Value::custom(summarize(&app)))
}

// Curated flattening of the app document; the generic reflective path never
// sees the raw API shape for `app info`.
fn summarize(app: &serde_json::Value) -> Summary {
    let text = |key: &str| {
        app.get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    };

    let mut summary = Summary::new()
        .field("Name", text("name"))
        .field("Platform", text("platform"))
        .field("Deploys", app.get("deploys").and_then(|v| v.as_u64()).unwrap_or(0));

    let plan = app
        .get("plan")
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or_default();
    if !plan.is_empty() {
        summary = summary.field("Plan", plan);
    }

    let teams: Vec<&str> = app
        .get("teams")
        .and_then(|t| t.as_array())
        .map(|teams| teams.iter().filter_map(|t| t.as_str()).collect())
        .unwrap_or_default();
    if !teams.is_empty() {
        summary = summary.field("Teams", teams.join(", "));
    }

    let units: Vec<Vec<String>> = app
        .get("units")
        .and_then(|u| u.as_array())
        .map(|units| {
            units
                .iter()
                .map(|unit| {
                    let cell = |key: &str| {
                        unit.get(key)
                            .and_then(|v| v.as_str())
                            .unwrap_or_default()
                            .to_string()
                    };
                    vec![cell("id"), cell("status")]
                })
                .collect()
        })
        .unwrap_or_default();
    if !units.is_empty() {
        summary = summary.detail("Units", ["id", "status"], units);
    }

    summary
}

pub fn create(
    ctx: &ExecutionContext,
    render: &RenderSettings,
    name: &str,
    platform: &str,
    plan: Option<&str>,
) -> Result<()> {
    let mut body = serde_json::json!({
        "name": name,
        "platform": platform,
    });
    if let Some(plan) = plan {
        body["plan"] = serde_json::Value::String(plan.to_string());
    }

    let response = ctx.client()?.post_json("/apps", &body)?;
    println!("{}", format!("App \"{}\" has been created.", name).green());
    render.print_info(&Value::from(response))
}

pub fn remove(ctx: &ExecutionContext, name: &str) -> Result<()> {
    ctx.client()?.delete(&format!("/apps/{}", name))?;
    println!("{}", format!("App \"{}\" has been removed.", name).green());
    Ok(())
}

/// Stream logs straight through the renderer's byte-stream path; no
/// buffering, no reformatting.
pub fn log(ctx: &ExecutionContext, render: &RenderSettings, name: &str) -> Result<()> {
    let body = ctx
        .client()?
        .get_stream(&format!("/apps/{}/log", name))
        .with_context(|| format!("unable to stream logs for \"{}\"", name))?;
    render.print_info(&Value::stream(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_render::{print_info, Format};

    #[test]
    fn summarize_builds_the_curated_layout() {
        let app = serde_json::json!({
            "name": "myapp",
            "platform": "python",
            "deploys": 7,
            "plan": {"name": "small"},
            "units": [
                {"id": "unit1", "status": "started"},
                {"id": "unit2", "status": "stopped"},
            ],
        });

        let mut out = Vec::new();
        print_info(&mut out, Format::Table, &Value::custom(summarize(&app)), None).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Deploys:"), "{text}");
        assert!(text.contains("Name:      myapp"), "{text}");
        assert!(text.contains("\nUnits:\n"), "{text}");
        assert!(text.contains("unit1  started"), "{text}");
    }

    #[test]
    fn summarize_skips_absent_sections() {
        let app = serde_json::json!({"name": "bare", "platform": "go"});
        let mut out = Vec::new();
        print_info(&mut out, Format::Table, &Value::custom(summarize(&app)), None).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!text.contains("Units"), "{text}");
        assert!(!text.contains("Plan"), "{text}");
    }
}
