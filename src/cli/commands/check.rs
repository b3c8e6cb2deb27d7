use std::env;

use anyhow::Result;
use clap::ValueEnum;

use super::{CommandResult, CommandSummary};
use crate::cli::args::CheckCommand;
use crate::core::{KeyMap, LocaleTree, naming::key_for_item};
use crate::issues::{
    HardcodedTextIssue, Issue, MissingLocaleKeyIssue, ParseErrorIssue, SourceContext,
};
use crate::project::{
    Project,
    pipeline::{Extraction, extract_all},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    /// UI copy with no key in the default locale
    Hardcoded,
    /// Default-locale keys absent from another locale
    MissingLocaleKey,
    /// Script content that could not be parsed
    ParseError,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![
            CheckRule::Hardcoded,
            CheckRule::MissingLocaleKey,
            CheckRule::ParseError,
        ]
    }
}

/// Requested rules in canonical order, each once. Nothing requested means all rules.
fn selected_rules(requested: &[CheckRule]) -> Vec<CheckRule> {
    CheckRule::all()
        .into_iter()
        .filter(|rule| requested.is_empty() || requested.contains(rule))
        .collect()
}

const PARSE_ERROR_MESSAGE: &str = "script content could not be parsed; nothing was extracted";

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let project = Project::load(&env::current_dir()?, &cmd.common.overrides())?;

    let checks = selected_rules(&cmd.checks);

    let files = project.source_files()?;
    let needs_sources = checks
        .iter()
        .any(|c| matches!(c, CheckRule::Hardcoded | CheckRule::ParseError));
    let extractions = if needs_sources {
        extract_all(&files, &project.extract_options())
    } else {
        Vec::new()
    };

    let default_locale = project.open_default_locale()?;
    let mut locale_files_checked = usize::from(default_locale.exists());
    let mut issues: Vec<Issue> = Vec::new();

    for check in checks {
        match check {
            CheckRule::Hardcoded => {
                let keymap = KeyMap::build(&default_locale.tree);
                let found = hardcoded_text_issues(&extractions, &keymap);
                issues.extend(found.into_iter().map(Issue::HardcodedText));
            }
            CheckRule::MissingLocaleKey => {
                for locale in project.locales()?.into_iter().skip(1) {
                    let file = project.open_locale(&locale)?;
                    locale_files_checked += 1;
                    let path = project.display_path(&file.path);
                    let found = missing_locale_key_issues(&path, &locale, &file.tree, &default_locale.tree);
                    issues.extend(found.into_iter().map(Issue::MissingLocaleKey));
                }
            }
            CheckRule::ParseError => {
                issues.extend(
                    extractions
                        .iter()
                        .filter(|e| e.result.stats.parse_failed)
                        .map(|e| {
                            Issue::ParseError(ParseErrorIssue {
                                file_path: e.file.display_path.clone(),
                                error: PARSE_ERROR_MESSAGE.to_string(),
                            })
                        }),
                );
            }
        }
    }

    let mut result = CommandResult::new(CommandSummary::Check).with_issues(issues);
    result.source_files_checked = files.len();
    result.locale_files_checked = locale_files_checked;
    Ok(result)
}

/// Extracted items the key map has no key for.
pub fn hardcoded_text_issues(extractions: &[Extraction<'_>], keymap: &KeyMap) -> Vec<HardcodedTextIssue> {
    let mut issues = Vec::new();
    for extraction in extractions {
        let file = extraction.file;
        for item in &extraction.result.items {
            if keymap
                .lookup(&file.namespace, item.kind.as_str(), &item.text)
                .is_some()
            {
                continue;
            }
            issues.push(HardcodedTextIssue {
                context: SourceContext::from_content(
                    &file.display_path,
                    &file.content,
                    item.line,
                    item.col,
                ),
                text: item.text.clone(),
                kind: item.kind.clone(),
                suggested_key: key_for_item(&file.namespace, item),
            });
        }
    }
    issues
}

/// Paths of `reference` that do not resolve in `tree`.
pub fn missing_locale_key_issues(
    file_path: &str,
    locale: &str,
    tree: &LocaleTree,
    reference: &LocaleTree,
) -> Vec<MissingLocaleKeyIssue> {
    tree.missing_from(reference)
        .into_iter()
        .map(|key| MissingLocaleKeyIssue {
            file_path: file_path.to_string(),
            locale: locale.to_string(),
            default_value: reference.get(&key).unwrap_or_default().to_string(),
            key,
        })
        .collect()
}
