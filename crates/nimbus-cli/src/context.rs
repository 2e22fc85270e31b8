use anyhow::Result;
use nimbus_client::{auth, ApiClient, Targets};
use nimbus_render::{print_info, print_list, Format, Value, ViewOptions};
use once_cell::sync::OnceCell;
use std::io;
use std::path::{Path, PathBuf};

/// Per-invocation execution state, constructed once in `run` and passed by
/// reference into every handler. Targets and the API client are loaded
/// lazily; no handler touches global state.
pub struct ExecutionContext {
    data_dir: PathBuf,
    target_override: Option<String>,
    targets: OnceCell<Targets>,
    client: OnceCell<ApiClient>,
}

impl ExecutionContext {
    pub fn new(data_dir: PathBuf, target_override: Option<String>) -> Self {
        Self {
            data_dir,
            target_override,
            targets: OnceCell::new(),
            client: OnceCell::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn targets_path(&self) -> PathBuf {
        self.data_dir.join("targets.toml")
    }

    pub fn plugins_dir(&self) -> PathBuf {
        self.data_dir.join("plugins")
    }

    pub fn targets(&self) -> Result<&Targets> {
        self.targets.get_or_try_init(|| {
            let targets = Targets::load_from(&self.targets_path())?;
            Ok(targets)
        })
    }

    /// The (label, url) pair requests should go to.
    pub fn current_target(&self) -> Result<(String, String)> {
        let targets = self.targets()?;
        Ok(targets.resolve(self.target_override.as_deref())?)
    }

    /// Stored token for the resolved target, if any.
    pub fn token(&self) -> Result<Option<String>> {
        let (label, _) = self.current_target()?;
        Ok(auth::load_token(&self.data_dir, &label)?)
    }

    /// Authenticated client for the resolved target.
    pub fn client(&self) -> Result<&ApiClient> {
        self.client.get_or_try_init(|| {
            let (label, url) = self.current_target()?;
            let token = auth::load_token(&self.data_dir, &label)?;
            let client = ApiClient::new(&url, token)?;
            Ok(client)
        })
    }

    /// Unauthenticated client for the resolved target (used by login, which
    /// runs before any token exists).
    pub fn anonymous_client(&self) -> Result<ApiClient> {
        let (_, url) = self.current_target()?;
        Ok(ApiClient::new(&url, None)?)
    }
}

/// Output configuration shared by every handler: the normalized format plus
/// the field visibility flags, resolved once from the CLI arguments.
pub struct RenderSettings {
    pub format: Format,
    pub view: Option<ViewOptions>,
}

impl RenderSettings {
    pub fn from_flags(format: &str, fields: Option<&str>, hide_fields: Option<&str>) -> Self {
        let fields = split_fields(fields);
        let hidden_fields = split_fields(hide_fields);
        let view = if fields.is_empty() && hidden_fields.is_empty() {
            None
        } else {
            Some(ViewOptions {
                fields,
                hidden_fields,
            })
        };
        Self {
            format: Format::parse(format),
            view,
        }
    }

    pub fn print_info(&self, value: &Value) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        print_info(&mut out, self.format, value, self.view.as_ref())?;
        Ok(())
    }

    pub fn print_list(&self, value: &Value) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        print_list(&mut out, self.format, value, self.view.as_ref())?;
        Ok(())
    }
}

fn split_fields(flag: Option<&str>) -> Vec<String> {
    flag.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn context_loads_targets_lazily() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = ExecutionContext::new(temp_dir.path().to_path_buf(), None);

        assert!(ctx.targets.get().is_none());
        assert!(ctx.targets().unwrap().targets.is_empty());
        assert!(ctx.targets.get().is_some());
        // Nothing selected yet, so there is no current target.
        assert!(ctx.current_target().is_err());
    }

    #[test]
    fn render_settings_parse_field_flags() {
        let settings = RenderSettings::from_flags("json", Some("Name, Deploys"), None);
        assert_eq!(settings.format, Format::Json);
        let view = settings.view.unwrap();
        assert_eq!(view.fields, ["Name", "Deploys"]);
        assert!(view.hidden_fields.is_empty());
    }

    #[test]
    fn render_settings_without_flags_have_no_view() {
        let settings = RenderSettings::from_flags("bogus", None, None);
        assert_eq!(settings.format, Format::Table);
        assert!(settings.view.is_none());
    }
}
