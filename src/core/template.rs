//! Template literal and interpolation analysis.
//!
//! Turns `` `Welcome ${user.name}!` `` into the lookup text `Welcome {name}!` plus the
//! expressions needed to rebuild a call with named arguments.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$]*$").unwrap());
static MEMBER_CHAIN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$]*(?:\??\.[A-Za-z_$][\w$]*)+$").unwrap());
static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").unwrap());

/// Words that never make a useful placeholder name.
const RESERVED_NAMES: &[&str] = &[
    "this", "true", "false", "null", "undefined", "new", "typeof", "await", "void",
];

/// A named hole in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placeholder {
    pub name: String,
    pub expression: String,
}

/// Static skeleton of a template plus its interpolated expressions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub base_text: String,
    pub placeholders: Vec<Placeholder>,
}

impl TemplateInfo {
    /// `{ name: user.name, count: items.length }`, or `None` without placeholders.
    pub fn call_arguments(&self) -> Option<String> {
        if self.placeholders.is_empty() {
            return None;
        }
        let pairs: Vec<String> = self
            .placeholders
            .iter()
            .map(|p| format!("{}: {}", p.name, p.expression))
            .collect();
        Some(format!("{{ {} }}", pairs.join(", ")))
    }
}

/// Analyze a JavaScript template literal, with or without its backticks.
///
/// ```
/// use autoglot::core::template::analyze_template_literal;
///
/// let info = analyze_template_literal("`Welcome ${user.name}!`");
/// assert_eq!(info.base_text, "Welcome {name}!");
/// assert_eq!(info.placeholders[0].expression, "user.name");
/// ```
pub fn analyze_template_literal(source: &str) -> TemplateInfo {
    let body = source
        .strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
        .unwrap_or(source);
    analyze_interpolations(body, "${", "}")
}

/// Analyze text with `open expr close` interpolations (`{{ expr }}` for mustache).
///
/// Braces and quoted strings inside an expression are balanced before the closing
/// delimiter is accepted. An unterminated interpolation is kept as static text.
pub fn analyze_interpolations(text: &str, open: &str, close: &str) -> TemplateInfo {
    let mut info = TemplateInfo::default();
    let mut rest = text;

    while let Some(start) = rest.find(open) {
        let after_open = &rest[start + open.len()..];
        let Some(end) = find_expression_end(after_open, close) else {
            break;
        };

        info.base_text.push_str(&rest[..start]);
        let expression = after_open[..end].trim().to_string();
        let name = unique_name(placeholder_name(&expression), &info.placeholders);
        info.base_text.push('{');
        info.base_text.push_str(&name);
        info.base_text.push('}');
        info.placeholders.push(Placeholder { name, expression });

        rest = &after_open[end + close.len()..];
    }

    info.base_text.push_str(rest);
    info
}

/// Byte offset of the closing delimiter that ends the expression at the start of `text`.
fn find_expression_end(text: &str, close: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        if depth == 0 && text[i..].starts_with(close) {
            return Some(i);
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '{' | '(' | '[' => depth += 1,
            '}' | ')' | ']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    None
}

/// Argument name for an interpolated expression.
///
/// A bare identifier names itself, a member chain uses its last property, and
/// anything else borrows its first meaningful word.
pub fn placeholder_name(expression: &str) -> String {
    let expression = expression.trim();
    let candidate = if IDENTIFIER_REGEX.is_match(expression) {
        expression
    } else if MEMBER_CHAIN_REGEX.is_match(expression) {
        expression
            .rsplit('.')
            .next()
            .unwrap_or(expression)
    } else {
        WORD_REGEX
            .find_iter(expression)
            .map(|m| m.as_str())
            .find(|word| !RESERVED_NAMES.contains(word))
            .unwrap_or("value")
    };

    let sanitized: String = candidate
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    match sanitized.chars().next() {
        Some(first) if !first.is_ascii_digit() => sanitized,
        _ => "value".to_string(),
    }
}

fn unique_name(base: String, taken: &[Placeholder]) -> String {
    if !taken.iter().any(|p| p.name == base) {
        return base;
    }
    (2..)
        .map(|n| format!("{base}{n}"))
        .find(|name| !taken.iter().any(|p| &p.name == name))
        .unwrap_or(base)
}
