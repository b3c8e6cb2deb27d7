//! Parallel extraction and replacement over a set of source files.
//!
//! Each file is handled independently on the rayon pool. The only shared state is
//! the immutable [`KeyMap`] and the extract options; results come back in file order.

use rayon::prelude::*;
use tracing::debug;

use crate::core::{ExtractOptions, KeyMap, ParseResult, ReplaceResult, parse_source, replace_source};

use super::SourceFile;

/// Parser output for one file.
#[derive(Debug)]
pub struct Extraction<'a> {
    pub file: &'a SourceFile,
    pub result: ParseResult,
}

/// Replacer output for one file.
#[derive(Debug)]
pub struct Replacement<'a> {
    pub file: &'a SourceFile,
    pub result: ReplaceResult,
}

pub fn extract_all<'a>(files: &'a [SourceFile], options: &ExtractOptions) -> Vec<Extraction<'a>> {
    files
        .par_iter()
        .map(|file| {
            let result = parse_source(file.syntax, &file.content, options);
            debug!(
                file = %file.display_path,
                syntax = file.syntax.name(),
                namespace = %file.namespace,
                items = result.items.len(),
                rejected = result.stats.rejected,
                parse_failed = result.stats.parse_failed,
                "extracted"
            );
            Extraction { file, result }
        })
        .collect()
}

pub fn replace_all<'a>(
    files: &'a [SourceFile],
    keymap: &KeyMap,
    options: &ExtractOptions,
) -> Vec<Replacement<'a>> {
    files
        .par_iter()
        .map(|file| {
            let result = replace_source(file.syntax, &file.content, keymap, &file.namespace, options);
            debug!(
                file = %file.display_path,
                namespace = %file.namespace,
                changes = result.change_count,
                "replaced"
            );
            Replacement { file, result }
        })
        .collect()
}
