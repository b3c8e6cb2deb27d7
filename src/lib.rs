//! autoglot - extract hardcoded UI copy into locale files and rewrite sources to
//! call the translation runtime.
//!
//! Supports Vue single-file components, JS/TS/JSX/TSX, Blade-like templates and
//! plain HTML.
//!
//! ## Module Structure
//!
//! - `core`: extraction and replacement engine (no file-system access)
//! - `project`: file discovery, namespaces, locale files and the parallel pipeline
//! - `config`: `.autoglotrc.json` loading
//! - `issues`: issue types reported by `check`
//! - `cli`: command-line interface
//! - `logging`: tracing subscriber setup for the binary
//! - `utils`: shared text helpers

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod logging;
pub mod project;
pub mod utils;
