use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::parsers::{DEFAULT_TRANSLATABLE_ATTRIBUTES, ExtractOptions};

pub const CONFIG_FILE_NAME: &str = ".autoglotrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
    "**/*.stories.tsx",
    "**/*.stories.ts",
];

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_locales_root")]
    pub locales_root: String,
    #[serde(default = "default_default_locale")]
    pub default_locale: String,
    /// Locales to keep in sync. Empty means every `*.json` file in `localesRoot`.
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    #[serde(default = "default_translatable_attributes")]
    pub translatable_attributes: Vec<String>,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
}

fn default_source_root() -> String {
    "src".to_string()
}

fn default_locales_root() -> String {
    "locales".to_string()
}

fn default_default_locale() -> String {
    "en".to_string()
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_translatable_attributes() -> Vec<String> {
    DEFAULT_TRANSLATABLE_ATTRIBUTES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            locales_root: default_locales_root(),
            default_locale: default_default_locale(),
            locales: Vec::new(),
            includes: default_includes(),
            ignores: Vec::new(),
            ignore_test_files: default_ignore_test_files(),
            translatable_attributes: default_translatable_attributes(),
            ignore_texts: Vec::new(),
        }
    }
}

impl Config {
    /// Find and parse the config reachable from `start_dir`, falling back to
    /// defaults when there is none.
    pub fn load(start_dir: &Path) -> Result<LoadedConfig> {
        let Some(path) = locate(start_dir) else {
            return Ok(LoadedConfig {
                config: Config::default(),
                path: None,
                root: start_dir.to_path_buf(),
            });
        };

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        let root = path.parent().unwrap_or(start_dir).to_path_buf();
        Ok(LoadedConfig {
            config,
            path: Some(path),
            root,
        })
    }

    /// Reject glob patterns that do not compile and an empty default locale.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            compile("ignores", pattern)?;
        }
        // An include without wildcards is a literal directory, so `[slug]` is fine there.
        for pattern in self.includes.iter().filter(|p| p.contains(['*', '?'])) {
            compile("includes", pattern)?;
        }
        if self.default_locale.trim().is_empty() {
            bail!("'defaultLocale' must not be empty");
        }
        Ok(())
    }

    /// Parser and replacer knobs derived from this config.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            translatable_attributes: self.translatable_attributes.clone(),
            ignore_texts: self.ignore_texts.clone(),
        }
    }
}

fn compile(field: &str, pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).with_context(|| format!("'{}' holds a bad glob: \"{}\"", field, pattern))
}

/// A config together with where it came from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when no config file was found.
    pub path: Option<PathBuf>,
    /// Directory that relative paths in the config resolve against.
    pub root: PathBuf,
}

/// Contents written by `autoglot init`.
pub fn default_config_json() -> Result<String> {
    serde_json::to_string_pretty(&Config::default()).context("Failed to serialize the default config")
}

/// Nearest config file at or above `start_dir`. The search ends at the first
/// directory containing `.git`.
fn locate(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find_map(|dir| {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                Some(Some(candidate))
            } else if dir.join(".git").exists() {
                Some(None)
            } else {
                None
            }
        })
        .flatten()
}
