//! Issue types produced by `autoglot check`.
//!
//! Each issue carries everything the report needs: location, message,
//! severity and rule.

use enum_dispatch::enum_dispatch;

use crate::core::Kind;

// ============================================================
// Severity and Rule
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    HardcodedText,
    MissingLocaleKey,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::HardcodedText => write!(f, "hardcoded"),
            Rule::MissingLocaleKey => write!(f, "missing-locale-key"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Locations
// ============================================================

/// A position in a source file plus the line it sits on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub file_path: String,
    /// 1-based.
    pub line: usize,
    /// 1-based, in characters.
    pub col: usize,
    pub source_line: String,
}

impl SourceContext {
    pub fn new(
        file_path: impl Into<String>,
        line: usize,
        col: usize,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
            source_line: source_line.into(),
        }
    }

    /// Build the context for `line` of `content`.
    pub fn from_content(file_path: impl Into<String>, content: &str, line: usize, col: usize) -> Self {
        let source_line = content
            .lines()
            .nth(line.saturating_sub(1))
            .unwrap_or_default();
        Self::new(file_path, line, col, source_line)
    }
}

// ============================================================
// Issue Types
// ============================================================

/// UI copy in a source file with no key in the default locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardcodedTextIssue {
    pub context: SourceContext,
    pub text: String,
    pub kind: Kind,
    /// Key the text would get on `extract`.
    pub suggested_key: Option<String>,
}

impl HardcodedTextIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::HardcodedText
    }
}

/// Default-locale key that does not resolve in another locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingLocaleKeyIssue {
    /// Locale file the key is missing from.
    pub file_path: String,
    pub locale: String,
    pub key: String,
    /// Default-locale text for the key.
    pub default_value: String,
}

impl MissingLocaleKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingLocaleKey
    }
}

/// Script content the parser could not read; nothing was extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    HardcodedText(HardcodedTextIssue),
    MissingLocaleKey(MissingLocaleKeyIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Source code location (has source_line for context display).
    Source(&'a SourceContext),
    /// File-level only.
    File { path: &'a str },
}

/// Uniform view over issue types for the report printer.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (text, key, error).
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for HardcodedTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<String> {
        self.suggested_key
            .as_ref()
            .map(|key| format!("run `autoglot extract` to add it as `{}`", key))
    }
}

impl Report for MissingLocaleKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "missing in '{}', default text: \"{}\"",
            self.locale, self.default_value
        ))
    }

    fn hint(&self) -> Option<String> {
        Some("run `autoglot sync --apply` to copy the default text".to_string())
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_key(&self) -> (&str, usize, usize) {
        match self.location() {
            ReportLocation::Source(ctx) => (ctx.file_path.as_str(), ctx.line, ctx.col),
            ReportLocation::File { path } => (path, 0, 0),
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
