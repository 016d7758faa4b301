use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Per-project settings, loaded from `<root>/.logview/config.toml` when the
/// file exists. Everything is optional; a missing file means defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Directory names the scanner prunes. Replaces the built-in default
    /// set when present.
    #[serde(default)]
    pub ignored_dirs: Option<Vec<String>>,

    /// View used by `scan` when `--name` is not given.
    #[serde(default)]
    pub default_view: Option<String>,
}

impl Config {
    pub fn path(root: &Path) -> PathBuf {
        root.join(logview_store::STATE_DIR).join("config.toml")
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Ignore set for the scanner, or `None` to use its built-in default.
    pub fn ignored_set(&self) -> Option<HashSet<String>> {
        self.ignored_dirs
            .as_ref()
            .map(|dirs| dirs.iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert!(config.ignored_dirs.is_none());
        assert!(config.default_view.is_none());
    }

    #[test]
    fn test_parse_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(".logview");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "ignored_dirs = [\".git\", \"build\"]\ndefault_view = \"experiments\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.default_view.as_deref(), Some("experiments"));
        let ignored = config.ignored_set().unwrap();
        assert!(ignored.contains("build"));
    }
}
