//! File-system side of autoglot: locating the project, discovering sources,
//! deriving namespaces and reading or writing locale files.

pub mod files;
pub mod locales;
pub mod pipeline;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::debug;

use crate::config::Config;
use crate::core::{ExtractOptions, Syntax, namespace::namespace_for_path};

use files::scan_files;
use locales::{LocaleFile, discover_locales};

/// Values given on the command line that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ProjectOverrides {
    pub source_root: Option<PathBuf>,
    pub locales_root: Option<PathBuf>,
    pub default_locale: Option<String>,
}

/// A source file read into memory, with the namespace its keys live under.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the project root, used in reports.
    pub display_path: String,
    pub syntax: Syntax,
    pub namespace: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
    pub source_root: PathBuf,
    pub locales_dir: PathBuf,
}

impl Project {
    /// Load the configuration reachable from `start_dir` and apply `overrides`.
    /// Relative paths resolve against the directory holding the config file.
    pub fn load(start_dir: &Path, overrides: &ProjectOverrides) -> Result<Self> {
        let loaded = Config::load(start_dir)?;
        let mut config = loaded.config;
        let root = loaded.root;

        if let Some(locale) = &overrides.default_locale {
            config.default_locale = locale.clone();
        }

        let source_root = root.join(
            overrides
                .source_root
                .as_deref()
                .unwrap_or_else(|| Path::new(&config.source_root)),
        );
        let locales_dir = root.join(
            overrides
                .locales_root
                .as_deref()
                .unwrap_or_else(|| Path::new(&config.locales_root)),
        );

        debug!(
            root = %root.display(),
            config_file = loaded.path.is_some(),
            source_root = %source_root.display(),
            locales = %locales_dir.display(),
            "project loaded"
        );

        Ok(Self {
            root,
            config,
            source_root,
            locales_dir,
        })
    }

    pub fn extract_options(&self) -> ExtractOptions {
        self.config.extract_options()
    }

    pub fn default_locale(&self) -> &str {
        &self.config.default_locale
    }

    /// Namespace of a file: relative to the source root when inside it,
    /// relative to the project root otherwise.
    pub fn namespace_for(&self, path: &Path) -> String {
        if path.starts_with(&self.source_root) {
            namespace_for_path(&self.source_root, path)
        } else {
            namespace_for_path(&self.root, path)
        }
    }

    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Discover and read every source file the config selects, sorted by path.
    pub fn source_files(&self) -> Result<Vec<SourceFile>> {
        let scan = scan_files(
            &self.root,
            &self.config.includes,
            &self.config.ignores,
            self.config.ignore_test_files,
        );
        if scan.skipped_count > 0 {
            debug!(skipped = scan.skipped_count, "unreadable entries skipped");
        }

        let paths: Vec<PathBuf> = scan.files.into_iter().collect();
        paths
            .par_iter()
            .filter_map(|path| Syntax::from_path(path).map(|syntax| (path, syntax)))
            .map(|(path, syntax)| {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read file: {}", path.display()))?;
                Ok(SourceFile {
                    path: path.clone(),
                    display_path: self.display_path(path),
                    syntax,
                    namespace: self.namespace_for(path),
                    content,
                })
            })
            .collect()
    }

    /// Locales to keep in sync: the configured list, or every locale file found.
    /// The default locale always comes first.
    pub fn locales(&self) -> Result<Vec<String>> {
        let mut locales = if self.config.locales.is_empty() {
            discover_locales(&self.locales_dir)?
        } else {
            self.config.locales.clone()
        };
        locales.retain(|locale| locale != self.default_locale());
        locales.insert(0, self.default_locale().to_string());
        Ok(locales)
    }

    pub fn open_locale(&self, locale: &str) -> Result<LocaleFile> {
        LocaleFile::open_or_create(&self.locales_dir, locale)
    }

    pub fn open_default_locale(&self) -> Result<LocaleFile> {
        self.open_locale(self.default_locale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn project_in(dir: &Path) -> Project {
        fs::create_dir_all(dir.join(".git")).unwrap();
        Project::load(dir, &ProjectOverrides::default()).unwrap()
    }

    #[test]
    fn test_namespace_for_source_and_outside_files() {
        let dir = tempdir().unwrap();
        let project = project_in(dir.path());

        assert_eq!(
            project.namespace_for(&dir.path().join("src/billing/invoice-list.vue")),
            "Billing.InvoiceList"
        );
        assert_eq!(
            project.namespace_for(&dir.path().join("resources/views/welcome.blade.php")),
            "Resources.Views.Welcome"
        );
    }

    #[test]
    fn test_source_files_are_sorted_and_namespaced() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src").join("billing");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("index.vue"), "<template><p>Hi</p></template>").unwrap();
        fs::write(dir.path().join("src").join("App.tsx"), "export {}").unwrap();

        let project = project_in(dir.path());
        let files = project.source_files().unwrap();

        let summary: Vec<(&str, &str)> = files
            .iter()
            .map(|f| (f.display_path.as_str(), f.namespace.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("src/App.tsx", "App"), ("src/billing/index.vue", "Billing")]
        );
    }

    #[test]
    fn test_overrides_win_over_config() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "sourceRoot": "app", "localesRoot": "lang", "defaultLocale": "de" }"#,
        )
        .unwrap();

        let loaded = Project::load(dir.path(), &ProjectOverrides::default()).unwrap();
        assert_eq!(loaded.source_root, dir.path().join("app"));
        assert_eq!(loaded.locales_dir, dir.path().join("lang"));
        assert_eq!(loaded.default_locale(), "de");

        let overrides = ProjectOverrides {
            source_root: Some(PathBuf::from("web")),
            locales_root: Some(PathBuf::from("i18n")),
            default_locale: Some("en".to_string()),
        };
        let overridden = Project::load(dir.path(), &overrides).unwrap();
        assert_eq!(overridden.source_root, dir.path().join("web"));
        assert_eq!(overridden.locales_dir, dir.path().join("i18n"));
        assert_eq!(overridden.default_locale(), "en");
    }

    #[test]
    fn test_locales_put_default_first() {
        let dir = tempdir().unwrap();
        let locales = dir.path().join("locales");
        fs::create_dir_all(&locales).unwrap();
        for name in ["de", "en", "fr"] {
            fs::write(locales.join(format!("{}.json", name)), "{}").unwrap();
        }

        let project = project_in(dir.path());
        assert_eq!(project.locales().unwrap(), vec!["en", "de", "fr"]);
    }
}
