use tracing::debug;

use crate::core::data::ScriptDialect;
use crate::core::keymap::KeyMap;
use crate::core::parsers::ExtractOptions;
use crate::core::parsers::script::{CandidateSite, ScriptCandidate, scan_script};

use super::{ReplaceResult, SyntaxReplacer};

/// One splice into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    start: usize,
    end: usize,
    replacement: String,
}

/// Rewrites JS/TS/JSX/TSX literals into `t('Key')` calls.
#[derive(Debug, Clone)]
pub struct ScriptReplacer {
    dialect: ScriptDialect,
    options: ExtractOptions,
}

impl ScriptReplacer {
    pub fn new(dialect: ScriptDialect, options: ExtractOptions) -> Self {
        Self { dialect, options }
    }

    /// Rewritten content, or `None` when the content does not parse.
    pub fn rewrite(&self, content: &str, keymap: &KeyMap, namespace: &str) -> Option<String> {
        let scan = scan_script(content, self.dialect, &self.options)?;
        let edits: Vec<Edit> = scan
            .candidates
            .iter()
            .filter(|candidate| candidate.exact)
            .filter_map(|candidate| edit_for(candidate, keymap, namespace))
            .collect();
        Some(splice(content, edits))
    }
}

fn edit_for(candidate: &ScriptCandidate, keymap: &KeyMap, namespace: &str) -> Option<Edit> {
    let key = keymap.lookup(namespace, candidate.kind.as_str(), &candidate.text)?;
    let call = match candidate
        .template
        .as_ref()
        .and_then(|info| info.call_arguments())
    {
        Some(arguments) => format!("t('{}', {})", key, arguments),
        None => format!("t('{}')", key),
    };
    let replacement = match candidate.site {
        CandidateSite::JsxText | CandidateSite::JsxAttribute => format!("{{{}}}", call),
        CandidateSite::StringLiteral | CandidateSite::TemplateLiteral => call,
    };
    Some(Edit {
        start: candidate.span.start,
        end: candidate.span.end,
        replacement,
    })
}

/// Apply edits from the end of the file backwards, dropping any edit that overlaps
/// one already accepted.
fn splice(content: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by(|a, b| b.start.cmp(&a.start).then(a.end.cmp(&b.end)));

    let mut output = content.to_string();
    let mut boundary = usize::MAX;
    for edit in edits {
        if edit.end > boundary || edit.start > edit.end || edit.end > content.len() {
            debug!(start = edit.start, end = edit.end, "dropping overlapping edit");
            continue;
        }
        output.replace_range(edit.start..edit.end, &edit.replacement);
        boundary = edit.start;
    }
    output
}

impl SyntaxReplacer for ScriptReplacer {
    fn replace(&self, content: &str, keymap: &KeyMap, namespace: &str) -> ReplaceResult {
        match self.rewrite(content, keymap, namespace) {
            Some(output) => ReplaceResult::between(content, output),
            None => ReplaceResult::unchanged(content),
        }
    }
}
