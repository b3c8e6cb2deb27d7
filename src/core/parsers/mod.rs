//! Per-syntax parsers emitting translatable text candidates.
//!
//! - `markup`: the character-level state machine shared by markup syntaxes
//! - `vue`, `blade`, `html`: markup dialects
//! - `script`: JS/TS/JSX/TSX via swc

pub mod blade;
pub mod html;
pub mod markup;
pub mod script;
pub mod vue;

use enum_dispatch::enum_dispatch;

use super::data::{ParseResult, ScriptDialect, Syntax};

pub use blade::BladeParser;
pub use html::HtmlParser;
pub use script::ScriptParser;
pub use vue::VueParser;

/// Attributes whose literal values are UI copy by default.
pub const DEFAULT_TRANSLATABLE_ATTRIBUTES: &[&str] = &[
    "placeholder",
    "title",
    "alt",
    "label",
    "aria-label",
    "aria-description",
    "aria-placeholder",
    "tooltip",
    "hint",
];

/// Knobs shared by every parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Attribute names whose literal values are extracted.
    pub translatable_attributes: Vec<String>,
    /// Exact texts never extracted.
    pub ignore_texts: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            translatable_attributes: DEFAULT_TRANSLATABLE_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignore_texts: Vec::new(),
        }
    }
}

impl ExtractOptions {
    pub fn is_translatable_attribute(&self, name: &str) -> bool {
        self.translatable_attributes
            .iter()
            .any(|attr| attr.eq_ignore_ascii_case(name))
    }

    pub fn ignores_text(&self, text: &str) -> bool {
        self.ignore_texts.iter().any(|ignored| ignored == text)
    }
}

/// Turns source text into extracted items. Never fails.
#[enum_dispatch]
pub trait SyntaxParser {
    fn parse(&self, content: &str) -> ParseResult;
}

#[enum_dispatch(SyntaxParser)]
#[derive(Debug, Clone)]
pub enum Parser {
    Vue(VueParser),
    Script(ScriptParser),
    Blade(BladeParser),
    Html(HtmlParser),
}

impl Parser {
    pub fn for_syntax(syntax: Syntax, options: ExtractOptions) -> Parser {
        match syntax {
            Syntax::Vue => VueParser::new(options).into(),
            Syntax::Script(dialect) => ScriptParser::new(dialect, options).into(),
            Syntax::Blade => BladeParser::new(options).into(),
            Syntax::Html => HtmlParser::new(options).into(),
        }
    }
}

/// Parse `content` written in `syntax`.
///
/// ```
/// use autoglot::core::data::Syntax;
/// use autoglot::core::parsers::{ExtractOptions, parse_source};
///
/// let result = parse_source(Syntax::Vue, "<h1>Welcome Home</h1>", &ExtractOptions::default());
/// assert_eq!(result.items[0].text, "Welcome Home");
/// ```
pub fn parse_source(syntax: Syntax, content: &str, options: &ExtractOptions) -> ParseResult {
    Parser::for_syntax(syntax, options.clone()).parse(content)
}

/// Script dialect for a `<script lang="...">` block.
pub fn script_dialect_for_lang(lang: Option<&str>) -> ScriptDialect {
    match lang.map(str::to_ascii_lowercase).as_deref() {
        Some("ts") => ScriptDialect::Ts,
        _ => ScriptDialect::Tsx,
    }
}
