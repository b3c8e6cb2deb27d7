//! Text and attribute passes shared by the Vue, Blade and HTML replacers.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::data::Kind;
use crate::core::keymap::KeyMap;
use crate::core::parsers::ExtractOptions;
use crate::core::parsers::markup::kinds::{kind_for_attribute, kind_for_text};
use crate::core::parsers::markup::{Dialect, Document, scan};
use crate::core::runtime::contains_runtime_call;
use crate::core::template::{TemplateInfo, analyze_interpolations};
use crate::core::validator::is_translatable_text;
use crate::utils::collapse_whitespace;

use super::guard::{between_tags, inside_open_tag, inside_runtime_call, is_converted};
use super::rules::{Rule, apply_rules};

/// Element content between a tag end and the next tag start.
static TEXT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">([^<>]+)<").unwrap());

/// A plain `name="value"` attribute.
static ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\s)([A-Za-z_][\w:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

static INTERPOLATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{\{.*?\}\}").unwrap());

static STRING_LITERAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'((?:[^'\\\n]|\\.)*)'|"((?:[^"\\\n]|\\.)*)""#).unwrap()
});

/// `:attr="'literal'"` or `v-bind:attr="'literal'"`.
static BOUND_ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(\s)(:|v-bind:)([A-Za-z_][\w-]*)\s*=\s*(?:"\s*'([^'\\"]*)'\s*"|'\s*"([^"\\']*)"\s*')"#,
    )
    .unwrap()
});

/// `v-model:arg="'literal'"` or `:prop.sync="'literal'"`.
static TWO_WAY_BINDING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(\s)(?:v-model:([A-Za-z_][\w-]*)|:([A-Za-z_][\w-]*)\.sync)\s*=\s*"\s*'([^'\\"]*)'\s*""#,
    )
    .unwrap()
});

/// How a resolved key is written back into markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStyle {
    /// `{{ $t('K') }}` in text, `:attr="$t('K')"` on attributes.
    Vue,
    /// `{{ __('K') }}`.
    Blade,
    /// `{{ t('K') }}`.
    Generic,
}

impl CallStyle {
    fn function(self) -> &'static str {
        match self {
            CallStyle::Vue => "$t",
            CallStyle::Blade => "__",
            CallStyle::Generic => "t",
        }
    }

    /// `$t('K')` or `$t('K', { name: expr })`.
    pub fn call(self, key: &str, arguments: Option<&str>) -> String {
        match arguments {
            Some(arguments) => format!("{}('{}', {})", self.function(), key, arguments),
            None => format!("{}('{}')", self.function(), key),
        }
    }

    fn text(self, key: &str, arguments: Option<&str>) -> String {
        format!("{{{{ {} }}}}", self.call(key, arguments))
    }

    fn attribute(self, name: &str, key: &str) -> String {
        match self {
            CallStyle::Vue => format!(":{}=\"{}\"", name, self.call(key, None)),
            _ => format!("{}=\"{}\"", name, self.text(key, None)),
        }
    }

    /// Interpolations in element text become named arguments (Vue only).
    fn keeps_interpolations(self) -> bool {
        self == CallStyle::Vue
    }
}

/// What every markup pass sees: the outline of the text being rewritten.
pub struct MarkupContext<'a> {
    doc: Document,
    dialect: &'a Dialect,
    style: CallStyle,
    keymap: &'a KeyMap,
    namespace: &'a str,
    options: &'a ExtractOptions,
}

impl MarkupContext<'_> {
    fn lookup(&self, kind: &Kind, text: &str) -> Option<&str> {
        if !is_translatable_text(text) {
            return None;
        }
        self.keymap.lookup(self.namespace, kind.as_str(), text)
    }

    fn text_kind(&self, offset: usize) -> Kind {
        self.doc
            .text_at(offset)
            .map(|node| kind_for_text(node.ancestors.iter().map(String::as_str)))
            .unwrap_or(Kind::Text)
    }

    fn tag_name(&self, offset: usize) -> &str {
        self.doc
            .tag_at(offset)
            .map(|tag| tag.name.as_str())
            .unwrap_or_default()
    }

    fn is_translatable_attribute(&self, name: &str) -> bool {
        !self.dialect.is_denied_attribute(name) && self.options.is_translatable_attribute(name)
    }
}

/// Rewrite resolvable text and attributes in `content`.
pub fn replace_markup(
    content: &str,
    dialect: &Dialect,
    style: CallStyle,
    keymap: &KeyMap,
    namespace: &str,
    options: &ExtractOptions,
) -> String {
    let mut rules = vec![
        Rule {
            name: "element-text",
            pattern: &TEXT_REGEX,
            guard: guard_text,
            rewrite: rewrite_text,
        },
        Rule {
            name: "literal-attribute",
            pattern: &ATTRIBUTE_REGEX,
            guard: guard_attribute,
            rewrite: rewrite_attribute,
        },
    ];
    if style == CallStyle::Vue {
        rules.extend([
            Rule {
                name: "interpolated-literal",
                pattern: &INTERPOLATION_REGEX,
                guard: guard_interpolation,
                rewrite: rewrite_interpolation,
            },
            Rule {
                name: "bound-attribute",
                pattern: &BOUND_ATTRIBUTE_REGEX,
                guard: guard_bound_attribute,
                rewrite: rewrite_bound_attribute,
            },
            Rule {
                name: "two-way-binding",
                pattern: &TWO_WAY_BINDING_REGEX,
                guard: guard_two_way_binding,
                rewrite: rewrite_two_way_binding,
            },
        ]);
    }

    apply_rules(content, &rules, |source| MarkupContext {
        doc: scan(source, dialect),
        dialect,
        style,
        keymap,
        namespace,
        options,
    })
}

fn guard_text(ctx: &MarkupContext, caps: &Captures) -> bool {
    let (Some(whole), Some(text)) = (caps.get(0), caps.get(1)) else {
        return false;
    };
    let text = text.as_str();
    if text.trim().is_empty() || !between_tags(&ctx.doc, whole.start(), whole.end() - 1) {
        return false;
    }
    if contains_runtime_call(text) || ctx.dialect.has_directive(text) {
        return false;
    }
    ctx.style.keeps_interpolations() || !(text.contains("{{") || text.contains("{!!"))
}

fn rewrite_text(ctx: &MarkupContext, caps: &Captures) -> Option<String> {
    let whole = caps.get(0)?;
    let raw = caps.get(1)?.as_str();
    let info = if ctx.style.keeps_interpolations() {
        analyze_interpolations(raw, "{{", "}}")
    } else {
        TemplateInfo {
            base_text: raw.to_string(),
            placeholders: Vec::new(),
        }
    };
    let text = collapse_whitespace(&info.base_text);
    let key = ctx.lookup(&ctx.text_kind(whole.start() + 1), &text)?;

    let leading = &raw[..raw.len() - raw.trim_start().len()];
    let trailing = &raw[raw.trim_end().len()..];
    let arguments = info.call_arguments();
    Some(format!(
        ">{}{}{}<",
        leading,
        ctx.style.text(key, arguments.as_deref()),
        trailing
    ))
}

fn attribute_value<'c>(caps: &'c Captures) -> Option<&'c str> {
    caps.get(3).or_else(|| caps.get(4)).map(|m| m.as_str())
}

fn guard_attribute(ctx: &MarkupContext, caps: &Captures) -> bool {
    let (Some(name), Some(value)) = (caps.get(2), attribute_value(caps)) else {
        return false;
    };
    inside_open_tag(&ctx.doc, name.start())
        && ctx.is_translatable_attribute(name.as_str())
        && !value.trim().is_empty()
        && !value.contains("{{")
        && !is_converted(value)
        && !ctx.dialect.has_directive(value)
}

fn rewrite_attribute(ctx: &MarkupContext, caps: &Captures) -> Option<String> {
    let name = caps.get(2)?;
    let text = collapse_whitespace(attribute_value(caps)?);
    let kind = kind_for_attribute(name.as_str(), ctx.tag_name(name.start()));
    let key = ctx.lookup(&kind, &text)?;
    Some(format!("{}{}", &caps[1], ctx.style.attribute(name.as_str(), key)))
}

fn guard_interpolation(ctx: &MarkupContext, caps: &Captures) -> bool {
    caps.get(0).is_some_and(|whole| {
        ctx.doc.in_interpolation(whole.start()) && !ctx.doc.in_skipped_region(whole.start())
    })
}

fn rewrite_interpolation(ctx: &MarkupContext, caps: &Captures) -> Option<String> {
    let whole = caps.get(0)?;
    let body = whole.as_str();
    let kind = ctx.text_kind(whole.start());
    let mut output = String::with_capacity(body.len());
    let mut last = 0;

    for literal in STRING_LITERAL_REGEX.captures_iter(body) {
        let Some(span) = literal.get(0) else { continue };
        let value = literal.get(1).or_else(|| literal.get(2)).map_or("", |m| m.as_str());
        if inside_runtime_call(body, 0, span.start()) || is_converted(value) {
            continue;
        }
        let Some(key) = ctx.lookup(&kind, &collapse_whitespace(value)) else {
            continue;
        };
        output.push_str(&body[last..span.start()]);
        output.push_str(&ctx.style.call(key, None));
        last = span.end();
    }

    if last == 0 {
        return None;
    }
    output.push_str(&body[last..]);
    Some(output)
}

fn bound_literal<'c>(caps: &'c Captures, first: usize) -> Option<&'c str> {
    caps.get(first)
        .or_else(|| caps.get(first + 1))
        .map(|m| m.as_str())
}

fn guard_bound_attribute(ctx: &MarkupContext, caps: &Captures) -> bool {
    let (Some(name), Some(value)) = (caps.get(3), bound_literal(caps, 4)) else {
        return false;
    };
    inside_open_tag(&ctx.doc, name.start())
        && ctx.options.is_translatable_attribute(name.as_str())
        && !value.trim().is_empty()
        && !is_converted(value)
}

fn rewrite_bound_attribute(ctx: &MarkupContext, caps: &Captures) -> Option<String> {
    let name = caps.get(3)?;
    let text = collapse_whitespace(bound_literal(caps, 4)?);
    let kind = kind_for_attribute(name.as_str(), ctx.tag_name(name.start()));
    let key = ctx.lookup(&kind, &text)?;
    Some(format!(
        "{}{}{}=\"{}\"",
        &caps[1],
        &caps[2],
        name.as_str(),
        ctx.style.call(key, None)
    ))
}

fn two_way_name<'c>(caps: &'c Captures) -> Option<regex::Match<'c>> {
    caps.get(2).or_else(|| caps.get(3))
}

fn guard_two_way_binding(ctx: &MarkupContext, caps: &Captures) -> bool {
    let (Some(name), Some(value)) = (two_way_name(caps), caps.get(4)) else {
        return false;
    };
    inside_open_tag(&ctx.doc, name.start())
        && ctx.options.is_translatable_attribute(name.as_str())
        && !value.as_str().trim().is_empty()
        && !is_converted(value.as_str())
}

fn rewrite_two_way_binding(ctx: &MarkupContext, caps: &Captures) -> Option<String> {
    let name = two_way_name(caps)?;
    let text = collapse_whitespace(caps.get(4)?.as_str());
    let kind = kind_for_attribute(name.as_str(), ctx.tag_name(name.start()));
    let key = ctx.lookup(&kind, &text)?;
    Some(format!("{}{}", &caps[1], ctx.style.attribute(name.as_str(), key)))
}
