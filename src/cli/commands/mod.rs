pub mod check;
pub mod extract;
pub mod init;
pub mod replace;
pub mod sync;

use serde::Serialize;

use super::exit_status::ExitStatus;
use crate::core::ExtractedItem;
use crate::issues::{Issue, Severity};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractSummary),
    Replace(ReplaceSummary),
    Check,
    Sync(SyncSummary),
    Init(InitSummary),
}

/// Items found in one file and the keys they added.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFile {
    pub path: String,
    pub namespace: String,
    pub items: Vec<ExtractedItem>,
    /// `(key, text)` pairs new to the default locale.
    #[serde(skip)]
    pub added: Vec<(String, String)>,
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub files: Vec<ExtractedFile>,
    pub locale_path: String,
    pub added_count: usize,
    pub is_apply: bool,
    pub json: bool,
}

/// Changes made to one source file.
#[derive(Debug)]
pub struct ReplacedFile {
    pub path: String,
    pub change_count: usize,
}

#[derive(Debug)]
pub struct ReplaceSummary {
    pub files: Vec<ReplacedFile>,
    pub change_count: usize,
    pub is_apply: bool,
}

/// Keys copied into one locale.
#[derive(Debug)]
pub struct LocaleSync {
    pub locale: String,
    pub path: String,
    pub added: Vec<String>,
}

#[derive(Debug)]
pub struct SyncSummary {
    pub default_locale: String,
    pub locales: Vec<LocaleSync>,
    pub added_count: usize,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running an autoglot command.
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// Issues found by `check`. Empty for other commands.
    pub issues: Vec<Issue>,
    /// Number of files whose script content failed to parse.
    pub parse_error_count: usize,
    pub source_files_checked: usize,
    pub locale_files_checked: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        Self {
            summary,
            error_count: 0,
            exit_on_errors: true,
            issues: Vec::new(),
            parse_error_count: 0,
            source_files_checked: 0,
            locale_files_checked: 0,
        }
    }

    /// Sort `issues` and count the errors among them.
    pub fn with_issues(mut self, mut issues: Vec<Issue>) -> Self {
        issues.sort();
        self.error_count += issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();
        self.issues = issues;
        self
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_errors && self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
