//! Core data types shared by parsers, key naming and replacers.
//!
//! ## Module Structure
//!
//! - `item`: ExtractedItem, ItemType, ParseStats, ParseResult
//! - `kind`: Kind (semantic role of a translatable string)
//! - `syntax`: Syntax and ScriptDialect (inferred from file extensions)

pub mod item;
pub mod kind;
pub mod syntax;

pub use item::{ExtractedItem, ItemType, ParseResult, ParseStats};
pub use kind::Kind;
pub use syntax::{ScriptDialect, Syntax};
