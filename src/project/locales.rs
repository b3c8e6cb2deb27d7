//! Locale JSON files on disk: one `<locale>.json` per locale under the locales root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::core::LocaleTree;

/// A locale tree together with the file it was read from.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    pub locale: String,
    pub path: PathBuf,
    pub tree: LocaleTree,
    exists: bool,
}

impl LocaleFile {
    /// Read `<dir>/<locale>.json`, or start an empty tree when the file is missing.
    pub fn open_or_create(dir: &Path, locale: &str) -> Result<Self> {
        let path = locale_path(dir, locale);
        let exists = path.exists();
        let tree = if exists {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?;
            let value: Value = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON: {}", path.display()))?;
            LocaleTree::from_value(value)
                .with_context(|| format!("Invalid locale file: {}", path.display()))?
        } else {
            LocaleTree::new()
        };

        Ok(Self {
            locale: locale.to_string(),
            path,
            tree,
            exists,
        })
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Write the tree with 2-space indentation and a trailing newline,
    /// creating the locales directory when needed.
    pub fn save(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(&self.tree.as_value())
            .context("Failed to serialize JSON")?;

        fs::write(&self.path, format!("{}\n", content))
            .with_context(|| format!("Failed to write file: {}", self.path.display()))?;

        self.exists = true;
        Ok(())
    }
}

pub fn locale_path(dir: &Path, locale: &str) -> PathBuf {
    dir.join(format!("{}.json", locale))
}

/// Locale names of every `*.json` file directly under `dir`, sorted.
/// A missing directory has no locales.
pub fn discover_locales(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut locales = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to read directory: {}", dir.display()))?
            .path();
        if path.is_file()
            && path.extension().is_some_and(|ext| ext == "json")
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
        {
            locales.push(stem.to_string());
        }
    }
    locales.sort();
    Ok(locales)
}
