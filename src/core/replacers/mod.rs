//! Per-syntax replacers: rewrite literal UI copy into translation runtime calls.
//!
//! Every replacer only substitutes text the [`KeyMap`] resolves, so a second run
//! over its own output changes nothing.
//!
//! ## Module Structure
//!
//! - `rules`: ordered regex substitution passes (`Rule`, `apply_rules`)
//! - `guard`: shared guards (inside a runtime call, inside a tag, key-shaped values)
//! - `markup`: the text and attribute passes shared by markup syntaxes
//! - `vue`, `blade`, `html`: markup replacers
//! - `script`: span edits driven by the script candidate walker

pub mod blade;
pub mod guard;
pub mod html;
pub mod markup;
pub mod rules;
pub mod script;
pub mod vue;

use enum_dispatch::enum_dispatch;
use serde::Serialize;

use super::data::Syntax;
use super::keymap::KeyMap;
use super::parsers::ExtractOptions;
use super::runtime::count_runtime_calls;

pub use blade::BladeReplacer;
pub use html::HtmlReplacer;
pub use script::ScriptReplacer;
pub use vue::VueReplacer;

/// Rewritten content and the number of runtime calls it gained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceResult {
    pub content: String,
    pub change_count: usize,
}

impl ReplaceResult {
    /// Account `output` against `input` by counting new runtime-call markers.
    pub fn between(input: &str, output: String) -> Self {
        let change_count = count_runtime_calls(&output).saturating_sub(count_runtime_calls(input));
        Self {
            content: output,
            change_count,
        }
    }

    pub fn unchanged(input: &str) -> Self {
        Self {
            content: input.to_string(),
            change_count: 0,
        }
    }

    pub fn is_changed(&self) -> bool {
        self.change_count > 0
    }
}

/// Rewrites source text using a prebuilt key map. Never fails: anything the
/// replacer cannot handle is left as it was.
#[enum_dispatch]
pub trait SyntaxReplacer {
    fn replace(&self, content: &str, keymap: &KeyMap, namespace: &str) -> ReplaceResult;
}

#[enum_dispatch(SyntaxReplacer)]
#[derive(Debug, Clone)]
pub enum Replacer {
    Vue(VueReplacer),
    Script(ScriptReplacer),
    Blade(BladeReplacer),
    Html(HtmlReplacer),
}

impl Replacer {
    pub fn for_syntax(syntax: Syntax, options: ExtractOptions) -> Replacer {
        match syntax {
            Syntax::Vue => VueReplacer::new(options).into(),
            Syntax::Script(dialect) => ScriptReplacer::new(dialect, options).into(),
            Syntax::Blade => BladeReplacer::new(options).into(),
            Syntax::Html => HtmlReplacer::new(options).into(),
        }
    }
}

/// Replace translatable text in `content` written in `syntax`.
pub fn replace_source(
    syntax: Syntax,
    content: &str,
    keymap: &KeyMap,
    namespace: &str,
    options: &ExtractOptions,
) -> ReplaceResult {
    Replacer::for_syntax(syntax, options.clone()).replace(content, keymap, namespace)
}
