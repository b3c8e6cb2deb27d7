//! Guards shared by the substitution passes.

use crate::core::parsers::markup::Document;
use crate::core::runtime::{contains_runtime_call, ends_with_runtime_callee, looks_like_key};

/// True if `offset` sits inside the argument list of a runtime call that starts at or
/// after `scope_start`. Walks backwards balancing parentheses.
pub fn inside_runtime_call(content: &str, scope_start: usize, offset: usize) -> bool {
    let scope = &content[scope_start..offset];
    let mut depth = 0usize;
    for (index, c) in scope.char_indices().rev() {
        match c {
            ')' => depth += 1,
            '(' if depth > 0 => depth -= 1,
            '(' if ends_with_runtime_callee(&scope[..index]) => return true,
            _ => {}
        }
    }
    false
}

/// A literal value that is already converted, or that never should be.
pub fn is_converted(value: &str) -> bool {
    looks_like_key(value) || contains_runtime_call(value)
}

/// True if `offset` falls inside an opening tag (between `<name` and `>`).
pub fn inside_open_tag(doc: &Document, offset: usize) -> bool {
    doc.tag_at(offset).is_some_and(|tag| !tag.closing)
}

/// True if the `>` at `gt` closes a tag and the `<` at `lt` opens one, so the text
/// between them is element content.
pub fn between_tags(doc: &Document, gt: usize, lt: usize) -> bool {
    doc.is_tag_end(gt) && doc.is_tag_start(lt) && !doc.in_skipped_region(gt + 1)
}
