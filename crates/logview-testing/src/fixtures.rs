//! Fixtures for scanner/store/CLI integration tests.
//!
//! Provides a throwaway project root backed by a temp directory, with
//! helpers to place JSON log files at relative paths.

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory for tests.
pub struct ProjectFixture {
    root: TempDir,
}

impl ProjectFixture {
    pub fn new() -> Result<Self> {
        Ok(Self {
            root: TempDir::new()?,
        })
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Write a JSON value to `rel_path` under the project root, creating
    /// intermediate directories as needed.
    pub fn write_json(&self, rel_path: &str, value: &serde_json::Value) -> Result<PathBuf> {
        self.write_raw(rel_path, &serde_json::to_string_pretty(value)?)
    }

    /// Write arbitrary file contents to `rel_path` under the project root.
    pub fn write_raw(&self, rel_path: &str, contents: &str) -> Result<PathBuf> {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Create an empty directory under the project root.
    pub fn mkdir(&self, rel_path: &str) -> Result<PathBuf> {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path)?;
        Ok(path)
    }
}
