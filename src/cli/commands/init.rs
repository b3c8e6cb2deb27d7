use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default config into the working directory. An existing file is
/// left alone and reported as an error.
pub fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        let mut result = CommandResult::new(CommandSummary::Init(InitSummary { created: false }));
        result.error_count = 1;
        return Ok(result);
    }

    fs::write(config_path, format!("{}\n", default_config_json()?))
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    Ok(CommandResult::new(CommandSummary::Init(InitSummary {
        created: true,
    })))
}
