//! Character-level markup state machine shared by the Vue, Blade and HTML parsers.
//!
//! ## Module Structure
//!
//! - `state`: `State`, `Effect` and the pure `transition` function
//! - `scanner`: applies transitions and builds a [`Document`] outline
//! - `kinds`: tag and attribute kind tables

pub mod kinds;
pub mod scanner;
pub mod state;

use std::sync::LazyLock;

use regex::Regex;

use crate::core::data::{ExtractedItem, ParseResult};
use crate::core::runtime::record_runtime_calls;
use crate::core::validator::is_translatable_text;
use crate::utils::{build_line_index, collapse_whitespace, offset_to_line_col};

use super::ExtractOptions;
pub use scanner::{Attribute, AttrValue, Document, RawBlock, TagToken, TextNode, scan};
use state::RawKind;

static BLADE_DIRECTIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\w@.])@[A-Za-z]+").unwrap());

/// Syntax differences between the markup flavors.
#[derive(Debug)]
pub struct Dialect {
    pub name: &'static str,
    /// `(open, close)` pairs stripped from text.
    pub interpolations: &'static [(&'static str, &'static str)],
    /// `(open, close)` pairs skipped verbatim. Checked before interpolations.
    pub comments: &'static [(&'static str, &'static str)],
    /// Elements whose contents are not markup.
    pub raw_tags: &'static [(&'static str, RawKind)],
    /// Attribute name prefixes that mark directives or bindings.
    pub denied_attribute_prefixes: &'static [&'static str],
    /// Drop text nodes containing `@directive` tokens.
    pub drops_directive_text: bool,
}

pub static VUE: Dialect = Dialect {
    name: "vue",
    interpolations: &[("{{", "}}")],
    comments: &[("<!--", "-->")],
    raw_tags: &[
        ("script", RawKind::Script),
        ("style", RawKind::Style),
        ("i18n", RawKind::Style),
    ],
    denied_attribute_prefixes: &["v-", ":", "@", "#"],
    drops_directive_text: false,
};

pub static BLADE: Dialect = Dialect {
    name: "blade",
    interpolations: &[("{!!", "!!}"), ("{{", "}}")],
    comments: &[("{{--", "--}}"), ("<!--", "-->"), ("@php", "@endphp"), ("@verbatim", "@endverbatim")],
    raw_tags: &[("script", RawKind::Script), ("style", RawKind::Style)],
    denied_attribute_prefixes: &[":", "wire:", "x-", "@"],
    drops_directive_text: true,
};

pub static HTML: Dialect = Dialect {
    name: "html",
    interpolations: &[("{{", "}}")],
    comments: &[("{{!", "}}"), ("<!--", "-->")],
    raw_tags: &[("script", RawKind::Script), ("style", RawKind::Style)],
    denied_attribute_prefixes: &[":", "@", "x-", "on"],
    drops_directive_text: false,
};

impl Dialect {
    pub fn raw_kind(&self, tag: &str) -> Option<RawKind> {
        self.raw_tags
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tag))
            .map(|(_, kind)| *kind)
    }

    pub fn is_denied_attribute(&self, name: &str) -> bool {
        self.denied_attribute_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix))
    }

    pub fn has_directive(&self, text: &str) -> bool {
        self.drops_directive_text && BLADE_DIRECTIVE_REGEX.is_match(text)
    }
}

/// Extract translatable items from markup.
pub fn extract(content: &str, dialect: &Dialect, options: &ExtractOptions) -> ParseResult {
    let doc = scan(content, dialect);
    let line_index = build_line_index(content);
    let position = |offset: usize| offset_to_line_col(content, &line_index, offset);
    let mut result = ParseResult::default();

    // Items are emitted in document order: walk tags and texts together.
    let mut texts = doc.texts.iter().peekable();
    for tag in &doc.tags {
        while let Some(node) = texts.next_if(|node| node.span.start < tag.span.start) {
            extract_text(node, dialect, options, &position, &mut result);
        }
        if !tag.closing {
            extract_attributes(tag, dialect, options, &position, &mut result);
        }
    }
    for node in texts {
        extract_text(node, dialect, options, &position, &mut result);
    }

    for span in &doc.interpolations {
        record_runtime_calls(&content[span.clone()], &mut result.stats);
    }
    for block in doc.raw_blocks.iter().filter(|b| b.kind == RawKind::Script) {
        record_runtime_calls(&content[block.span.clone()], &mut result.stats);
    }

    result
}

fn accept(text: &str, options: &ExtractOptions, result: &mut ParseResult) -> bool {
    if options.ignores_text(text) {
        return false;
    }
    if !is_translatable_text(text) {
        result.stats.rejected += 1;
        return false;
    }
    true
}

fn extract_text(
    node: &TextNode,
    dialect: &Dialect,
    options: &ExtractOptions,
    position: &impl Fn(usize) -> (usize, usize),
    result: &mut ParseResult,
) {
    let text = collapse_whitespace(&node.text);
    if text.is_empty() {
        return;
    }
    result.stats.text_nodes += 1;
    if dialect.has_directive(&text) || !accept(&text, options, result) {
        return;
    }

    let kind = kinds::kind_for_text(node.ancestors.iter().map(String::as_str));
    let (line, col) = position(node.first_visible.unwrap_or(node.span.start));
    result
        .items
        .push(ExtractedItem::text(text, kind, node.ancestors.last().cloned()).at(line, col));
}

fn extract_attributes(
    tag: &TagToken,
    dialect: &Dialect,
    options: &ExtractOptions,
    position: &impl Fn(usize) -> (usize, usize),
    result: &mut ParseResult,
) {
    for attr in &tag.attributes {
        let Some(value) = &attr.value else { continue };
        if dialect.is_denied_attribute(&attr.name) || !options.is_translatable_attribute(&attr.name)
        {
            continue;
        }
        let text = collapse_whitespace(&value.text);
        if text.is_empty() {
            continue;
        }
        result.stats.attributes += 1;
        if dialect.has_directive(&text) || text.contains("{{") || !accept(&text, options, result) {
            continue;
        }

        let kind = kinds::kind_for_attribute(&attr.name, &tag.name);
        let (line, col) = position(value.span.start);
        result.items.push(
            ExtractedItem::attribute(text, kind, Some(tag.name.clone()), attr.name.clone())
                .at(line, col),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{ItemType, Kind};
    use pretty_assertions::assert_eq;

    fn extract_vue(content: &str) -> ParseResult {
        extract(content, &VUE, &ExtractOptions::default())
    }

    #[test]
    fn test_button_with_title_and_script_sibling() {
        let result = extract_vue(
            r#"<button title="Submit now">Go</button>
<script>const label = "Hidden Script Text"; t('App.text.seen')</script>"#,
        );

        assert_eq!(
            result.items,
            vec![
                ExtractedItem::attribute("Submit now", Kind::Title, Some("button".into()), "title")
                    .at(1, 16),
                ExtractedItem::text("Go", Kind::Button, Some("button".into())).at(1, 28),
            ]
        );
        assert_eq!(result.stats.runtime_calls, 1);
        assert_eq!(result.stats.runtime_keys, vec!["App.text.seen"]);
    }

    #[test]
    fn test_headings_inline_tags_and_whitespace() {
        let result = extract_vue("<template>\n  <h1>\n    Welcome   <em>Home</em>\n  </h1>\n</template>");
        let texts: Vec<(&str, &Kind)> = result.items.iter().map(|i| (i.text.as_str(), &i.kind)).collect();
        assert_eq!(
            texts,
            vec![("Welcome", &Kind::Heading), ("Home", &Kind::Heading)]
        );
        assert_eq!((result.items[0].line, result.items[0].col), (3, 5));
    }

    #[test]
    fn test_vue_bindings_are_denied() {
        let result = extract_vue(
            r#"<input :placeholder="dynamicText" v-bind:title="other" placeholder="Search invoices">"#,
        );
        assert_eq!(result.items.len(), 1);
        assert_eq!(result.items[0].item_type, ItemType::Attribute);
        assert_eq!(result.items[0].kind, Kind::Placeholder);
        assert_eq!(result.items[0].attribute_name.as_deref(), Some("placeholder"));
    }

    #[test]
    fn test_interpolations_are_stripped_and_scanned() {
        let result = extract_vue("<p>Hello {{ user.name }}, welcome back {{ $t('App.text.x') }}</p>");
        assert_eq!(result.items[0].text, "Hello , welcome back");
        assert_eq!(result.stats.runtime_keys, vec!["App.text.x"]);
    }

    #[test]
    fn test_technical_text_is_rejected() {
        let result = extract_vue(r#"<div class="w-full">btn-primary</div><p>{{ count }}</p>"#);
        assert!(result.items.is_empty());
        assert_eq!(result.stats.rejected, 1);
        assert_eq!(result.stats.text_nodes, 1);
    }

    #[test]
    fn test_ignored_texts() {
        let options = ExtractOptions {
            ignore_texts: vec!["Acme Corp".to_string()],
            ..ExtractOptions::default()
        };
        let result = extract("<footer>Acme Corp</footer>", &VUE, &options);
        assert!(result.items.is_empty());
        assert_eq!(result.stats.rejected, 0);
    }

    #[test]
    fn test_blade_directive_text_dropped() {
        let result = extract(
            "<p>@if($user) Welcome back @endif</p><p>Contact support@example.com today</p>",
            &BLADE,
            &ExtractOptions::default(),
        );
        let texts: Vec<&str> = result.items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Contact support@example.com today"]);
    }
}
