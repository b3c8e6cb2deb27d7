//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: collect UI copy into the default locale file
//! - `replace`: rewrite sources to call the translation runtime
//! - `check`: report hardcoded text, keys missing from other locales and parse errors
//! - `sync`: copy default-locale keys missing from the other locales
//! - `init`: write a default `.autoglotrc.json`
//!
//! Every command that writes files is a dry run unless `--apply` is given.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use super::commands::check::CheckRule;
use crate::project::ProjectOverrides;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Replace(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Sync(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all project commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Default locale (overrides config file)
    #[arg(long, env = "AUTOGLOT_DEFAULT_LOCALE")]
    pub default_locale: Option<String>,

    /// Source root namespaces are derived from (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Directory holding `<locale>.json` files (overrides config file)
    #[arg(long)]
    pub locales_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn overrides(&self) -> ProjectOverrides {
        ProjectOverrides {
            source_root: self.source_root.clone(),
            locales_root: self.locales_root.clone(),
            default_locale: self.default_locale.clone(),
        }
    }
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write new keys to the default locale file (default is dry-run)
    #[arg(long)]
    pub apply: bool,

    /// Print extracted items as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ReplaceCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Rewrite source files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Rules to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write missing keys to the locale files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract hardcoded UI copy into the default locale file
    Extract(ExtractCommand),
    /// Replace UI copy that has a locale key with translation calls
    Replace(ReplaceCommand),
    /// Check for hardcoded text, keys missing from locales and parse errors
    Check(CheckCommand),
    /// Copy keys missing from other locales, using the default text
    Sync(SyncCommand),
    /// Initialize a new .autoglotrc.json configuration file
    Init,
}
