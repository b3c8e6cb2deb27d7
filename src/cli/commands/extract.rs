use std::env;

use anyhow::{Context, Result};
use tracing::debug;

use super::{CommandResult, CommandSummary, ExtractSummary, ExtractedFile};
use crate::cli::args::ExtractCommand;
use crate::project::{Project, pipeline::extract_all};

/// Parse every source file and merge the items into the default locale tree.
///
/// The merge always runs in memory so a dry run reports the keys it would add;
/// the locale file is only written with `--apply`.
pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let project = Project::load(&env::current_dir()?, &cmd.common.overrides())?;
    let files = project.source_files()?;
    let extractions = extract_all(&files, &project.extract_options());
    let mut locale = project.open_default_locale()?;

    let mut parse_error_count = 0;
    let mut extracted = Vec::new();
    for extraction in extractions {
        let file = extraction.file;
        if extraction.result.stats.parse_failed {
            parse_error_count += 1;
            debug!("{}: script content could not be parsed", file.display_path);
        }
        if extraction.result.items.is_empty() {
            continue;
        }

        let merge = locale
            .tree
            .merge_items(&file.namespace, &extraction.result.items)
            .with_context(|| format!("Failed to merge keys from {}", file.display_path))?;
        let added = merge
            .added
            .into_iter()
            .map(|key| {
                let text = locale.tree.get(&key).unwrap_or_default().to_string();
                (key, text)
            })
            .collect();

        extracted.push(ExtractedFile {
            path: file.display_path.clone(),
            namespace: file.namespace.clone(),
            items: extraction.result.items,
            added,
        });
    }

    let added_count: usize = extracted.iter().map(|f| f.added.len()).sum();
    if cmd.apply && added_count > 0 {
        locale.save()?;
    }

    let mut result = CommandResult::new(CommandSummary::Extract(ExtractSummary {
        files: extracted,
        locale_path: project.display_path(&locale.path),
        added_count,
        is_apply: cmd.apply,
        json: cmd.json,
    }));
    result.parse_error_count = parse_error_count;
    result.source_files_checked = files.len();
    result.locale_files_checked = 1;
    Ok(result)
}
