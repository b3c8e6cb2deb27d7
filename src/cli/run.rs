use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, check::check, extract::extract, init::init, replace::replace, sync::sync,
    },
};

/// Dispatch to the command handler.
///
/// `Err` means the command could not run at all (unreadable config, invalid locale
/// file, failed write); issues and dry-run findings come back in the result.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Replace(cmd)) => replace(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
