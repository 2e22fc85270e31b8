//! Bearer token storage, one token file per target label under
//! `<data_dir>/tokens/`.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

fn token_path(data_dir: &Path, label: &str) -> PathBuf {
    data_dir.join("tokens").join(label)
}

pub fn save_token(data_dir: &Path, label: &str, token: &str) -> Result<()> {
    let path = token_path(data_dir, label);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, token)?;
    Ok(())
}

/// Load the stored token, if any. Whitespace from manual edits is trimmed.
pub fn load_token(data_dir: &Path, label: &str) -> Result<Option<String>> {
    let path = token_path(data_dir, label);
    if !path.exists() {
        return Ok(None);
    }
    let token = fs::read_to_string(path)?;
    let token = token.trim();
    if token.is_empty() {
        return Ok(None);
    }
    Ok(Some(token.to_string()))
}

/// Delete the stored token. Returns whether one existed.
pub fn remove_token(data_dir: &Path, label: &str) -> Result<bool> {
    let path = token_path(data_dir, label);
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_file(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_load_remove_cycle() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_token(dir.path(), "prod").unwrap(), None);

        save_token(dir.path(), "prod", "tok-123").unwrap();
        assert_eq!(
            load_token(dir.path(), "prod").unwrap().as_deref(),
            Some("tok-123")
        );

        assert!(remove_token(dir.path(), "prod").unwrap());
        assert!(!remove_token(dir.path(), "prod").unwrap());
        assert_eq!(load_token(dir.path(), "prod").unwrap(), None);
    }

    #[test]
    fn tokens_are_scoped_per_label() {
        let dir = TempDir::new().unwrap();
        save_token(dir.path(), "prod", "a").unwrap();
        save_token(dir.path(), "staging", "b").unwrap();
        assert_eq!(load_token(dir.path(), "prod").unwrap().as_deref(), Some("a"));
        assert_eq!(
            load_token(dir.path(), "staging").unwrap().as_deref(),
            Some("b")
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let dir = TempDir::new().unwrap();
        save_token(dir.path(), "prod", "tok-123\n").unwrap();
        assert_eq!(
            load_token(dir.path(), "prod").unwrap().as_deref(),
            Some("tok-123")
        );
    }
}
