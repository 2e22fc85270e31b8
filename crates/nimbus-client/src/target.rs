use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The set of named API targets, persisted as `targets.toml` in the data
/// dir. At most one target is current at a time.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Targets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(default)]
    pub targets: BTreeMap<String, TargetEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetEntry {
    pub url: String,
}

impl Targets {
    /// Load from disk; a missing file is an empty target set.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Targets::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn add(&mut self, label: &str, url: &str, set_current: bool) -> Result<()> {
        if self.targets.contains_key(label) {
            return Err(Error::DuplicateTarget(label.to_string()));
        }
        self.targets.insert(
            label.to_string(),
            TargetEntry {
                url: url.trim_end_matches('/').to_string(),
            },
        );
        if set_current || self.current.is_none() {
            self.current = Some(label.to_string());
        }
        Ok(())
    }

    pub fn set_current(&mut self, label: &str) -> Result<()> {
        if !self.targets.contains_key(label) {
            return Err(Error::UnknownTarget(label.to_string()));
        }
        self.current = Some(label.to_string());
        Ok(())
    }

    pub fn remove(&mut self, label: &str) -> Result<()> {
        if self.targets.remove(label).is_none() {
            return Err(Error::UnknownTarget(label.to_string()));
        }
        if self.current.as_deref() == Some(label) {
            self.current = None;
        }
        Ok(())
    }

    /// Resolve the target to use: an explicit label override wins over the
    /// stored current target.
    pub fn resolve(&self, label_override: Option<&str>) -> Result<(String, String)> {
        let label = match label_override {
            Some(label) => label,
            None => self.current.as_deref().ok_or(Error::NoTarget)?,
        };
        let entry = self
            .targets
            .get(label)
            .ok_or_else(|| Error::UnknownTarget(label.to_string()))?;
        Ok((label.to_string(), entry.url.clone()))
    }
}
