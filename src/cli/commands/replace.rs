use std::{env, fs};

use anyhow::{Context, Result, bail};
use tracing::debug;

use super::{CommandResult, CommandSummary, ReplaceSummary, ReplacedFile};
use crate::cli::args::ReplaceCommand;
use crate::core::KeyMap;
use crate::project::{Project, pipeline::replace_all};

pub fn replace(cmd: ReplaceCommand) -> Result<CommandResult> {
    let project = Project::load(&env::current_dir()?, &cmd.common.overrides())?;
    let locale = project.open_default_locale()?;
    if !locale.exists() {
        bail!(
            "Default locale file not found: {} (run `autoglot extract --apply` first)",
            project.display_path(&locale.path)
        );
    }

    let keymap = KeyMap::build(&locale.tree);
    debug!(entries = keymap.len(), "key map built");

    let files = project.source_files()?;
    let replacements = replace_all(&files, &keymap, &project.extract_options());

    let mut replaced = Vec::new();
    for replacement in replacements {
        let file = replacement.file;
        if replacement.result.content == file.content {
            continue;
        }
        if cmd.apply {
            fs::write(&file.path, &replacement.result.content)
                .with_context(|| format!("Failed to write file: {}", file.path.display()))?;
        }
        replaced.push(ReplacedFile {
            path: file.display_path.clone(),
            change_count: replacement.result.change_count,
        });
    }

    let change_count = replaced.iter().map(|f| f.change_count).sum();
    let mut result = CommandResult::new(CommandSummary::Replace(ReplaceSummary {
        files: replaced,
        change_count,
        is_apply: cmd.apply,
    }));
    result.source_files_checked = files.len();
    result.locale_files_checked = 1;
    Ok(result)
}
