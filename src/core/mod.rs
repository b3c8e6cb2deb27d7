//! Extraction and replacement engine.
//!
//! Everything under `core` works on strings and in-memory trees; no module here
//! touches the file system.
//!
//! - `validator`: decides whether a string is UI copy or a technical token
//! - `parsers`: per-syntax extraction of [`data::ExtractedItem`]s
//! - `naming` / `namespace`: key slugs and namespaces derived from file paths
//! - `locale_tree`: nested locale JSON, merge and sync
//! - `keymap`: `(namespace, kind, text) -> key` lookup built from a locale tree
//! - `replacers`: per-syntax rewriting of literals into runtime calls
//! - `template`: placeholder analysis of template literals and interpolations

pub mod data;
pub mod keymap;
pub mod locale_tree;
pub mod namespace;
pub mod naming;
pub mod parsers;
pub mod replacers;
pub mod runtime;
pub mod template;
pub mod validator;

pub use data::{ExtractedItem, ItemType, Kind, ParseResult, ParseStats, ScriptDialect, Syntax};
pub use keymap::KeyMap;
pub use locale_tree::{KeyAction, LocaleTree, LocaleTreeError, MergeSummary};
pub use parsers::{ExtractOptions, parse_source};
pub use replacers::{ReplaceResult, replace_source};
