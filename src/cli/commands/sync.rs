use std::env;

use anyhow::{Context, Result, bail};

use super::{CommandResult, CommandSummary, LocaleSync, SyncSummary};
use crate::cli::args::SyncCommand;
use crate::project::Project;

/// Copy every default-locale leaf missing from the other locales, using the
/// default text as the value.
pub fn sync(cmd: SyncCommand) -> Result<CommandResult> {
    let project = Project::load(&env::current_dir()?, &cmd.common.overrides())?;
    let reference = project.open_default_locale()?;
    if !reference.exists() {
        bail!(
            "Default locale file not found: {}",
            project.display_path(&reference.path)
        );
    }

    let mut synced = Vec::new();
    for locale in project.locales()?.into_iter().skip(1) {
        let mut file = project.open_locale(&locale)?;
        let added = file
            .tree
            .sync_from(&reference.tree)
            .with_context(|| format!("Failed to sync {}", file.path.display()))?;
        if cmd.apply && !added.is_empty() {
            file.save()?;
        }
        synced.push(LocaleSync {
            locale,
            path: project.display_path(&file.path),
            added,
        });
    }

    let added_count = synced.iter().map(|l| l.added.len()).sum();
    let locale_files_checked = synced.len() + 1;
    let mut result = CommandResult::new(CommandSummary::Sync(SyncSummary {
        default_locale: reference.locale,
        locales: synced,
        added_count,
        is_apply: cmd.apply,
    }));
    result.locale_files_checked = locale_files_checked;
    Ok(result)
}
