//! Report formatting and printing utilities.
//!
//! Issues print in cargo style; command summaries print as short dry-run or
//! apply listings. Everything goes to stdout except the parse warning.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, ExtractSummary, InitSummary, ReplaceSummary, SyncSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stdout.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stdout().lock());
}

/// Print issues to a custom writer. `issues` are expected sorted.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let max_line_width = calculate_max_line_width(issues);

    for issue in issues {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(issues, writer);
}

/// Print a success message when no issues are found.
pub fn print_success(source_files: usize, locale_files: usize) {
    print_success_to(source_files, locale_files, &mut io::stdout().lock());
}

pub fn print_success_to<W: Write>(source_files: usize, locale_files: usize, writer: &mut W) {
    let msg = if locale_files == 0 {
        format!(
            "Checked {} source {} - no issues found",
            source_files,
            plural(source_files, "file", "files")
        )
    } else {
        format!(
            "Checked {} source {}, {} locale {} - no issues found",
            source_files,
            plural(source_files, "file", "files"),
            locale_files,
            plural(locale_files, "file", "files")
        )
    };
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed (use {} for details)",
            "warning:".bold().yellow(),
            count,
            "-v".cyan()
        );
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

// ============================================================
// Issues
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let severity = issue.report_severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    match issue.location() {
        ReportLocation::Source(ctx) => {
            let _ = writeln!(
                writer,
                "  {} {}:{}:{}",
                "-->".blue(),
                ctx.file_path,
                ctx.line,
                ctx.col
            );

            let caret_char = match severity {
                Severity::Error => "^".red(),
                Severity::Warning => "^".yellow(),
            };
            let _ = writeln!(
                writer,
                "{:>width$} {}",
                "",
                "|".blue(),
                width = max_line_width
            );
            let _ = writeln!(
                writer,
                "{:>width$} {} {}",
                ctx.line.to_string().blue(),
                "|".blue(),
                ctx.source_line,
                width = max_line_width
            );

            // col is 1-based and counted in characters
            let prefix: String = ctx.source_line.chars().take(ctx.col.saturating_sub(1)).collect();
            let caret_padding = UnicodeWidthStr::width(prefix.as_str());
            let _ = writeln!(
                writer,
                "{:>width$} {} {:>padding$}{}",
                "",
                "|".blue(),
                "",
                caret_char,
                width = max_line_width,
                padding = caret_padding
            );
        }
        ReportLocation::File { path } => {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
        }
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        plural(total_errors, "error", "errors").red(),
        total_warnings,
        plural(total_warnings, "warning", "warnings").yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .filter_map(|i| match i.location() {
            ReportLocation::Source(ctx) => Some(ctx.line),
            ReportLocation::File { .. } => None,
        })
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

// ============================================================
// Command output
// ============================================================

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Check => {
            report(&result.issues);
            if result.issues.is_empty() {
                print_success(result.source_files_checked, result.locale_files_checked);
            }
        }
        CommandSummary::Extract(summary) if summary.json => print_extract_json(summary),
        CommandSummary::Extract(summary) => {
            print_extract_to(summary, &mut io::stdout().lock());
        }
        CommandSummary::Replace(summary) => {
            print_replace_to(summary, &mut io::stdout().lock());
        }
        CommandSummary::Sync(summary) => {
            print_sync_to(summary, &mut io::stdout().lock());
        }
        CommandSummary::Init(summary) => print_init(summary),
    }

    print_parse_warning(result.parse_error_count, verbose);
}

fn print_extract_json(summary: &ExtractSummary) {
    match serde_json::to_string_pretty(&summary.files) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("{} {}", "error:".bold().red(), e),
    }
}

pub fn print_extract_to<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    for file in &summary.files {
        let _ = writeln!(
            writer,
            "  {} ({}): {} item(s), {} new key(s)",
            file.path,
            file.namespace,
            file.items.len(),
            file.added.len()
        );
        if !summary.is_apply {
            for (key, text) in &file.added {
                let _ = writeln!(writer, "    {} {} = \"{}\"", "+".green(), key, text);
            }
        }
    }

    if summary.added_count == 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("No new keys for {}", summary.locale_path).green()
        );
    } else if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} key(s) to {}.",
            "Added".green().bold(),
            summary.added_count,
            summary.locale_path
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} key(s) to {}.",
            "Would add".yellow().bold(),
            summary.added_count,
            summary.locale_path
        );
        let _ = writeln!(writer, "Run with {} to write them.", "--apply".cyan());
    }
}

pub fn print_replace_to<W: Write>(summary: &ReplaceSummary, writer: &mut W) {
    for file in &summary.files {
        let _ = writeln!(writer, "  {}: {} replacement(s)", file.path, file.change_count);
    }

    if summary.files.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "Nothing to replace".green()
        );
    } else if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} string(s) in {} file(s).",
            "Replaced".green().bold(),
            summary.change_count,
            summary.files.len()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} string(s) in {} file(s).",
            "Would replace".yellow().bold(),
            summary.change_count,
            summary.files.len()
        );
        let _ = writeln!(writer, "Run with {} to rewrite these files.", "--apply".cyan());
    }
}

pub fn print_sync_to<W: Write>(summary: &SyncSummary, writer: &mut W) {
    for locale in summary.locales.iter().filter(|l| !l.added.is_empty()) {
        let _ = writeln!(
            writer,
            "  {}: {} missing key(s)",
            locale.path,
            locale.added.len()
        );
        if !summary.is_apply {
            for key in &locale.added {
                let _ = writeln!(writer, "    {} {}", "+".green(), key);
            }
        }
    }

    if summary.added_count == 0 {
        let msg = if summary.locales.is_empty() {
            format!("No locales besides '{}' to sync", summary.default_locale)
        } else {
            format!("All locales are in sync with '{}'", summary.default_locale)
        };
        let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());
        return;
    }

    let file_count = summary.locales.iter().filter(|l| !l.added.is_empty()).count();
    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} key(s) to {} locale file(s).",
            "Added".green().bold(),
            summary.added_count,
            file_count
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} key(s) to {} locale file(s).",
            "Would add".yellow().bold(),
            summary.added_count,
            file_count
        );
        let _ = writeln!(writer, "Run with {} to write them.", "--apply".cyan());
    }
}

fn print_init(summary: &InitSummary) {
    if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

// ============================================================
// Tests
// ============================================================
