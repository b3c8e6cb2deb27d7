//! Recognizing calls into the translation runtime (`t(...)`, `$t(...)`, `__(...)`).

use std::sync::LazyLock;

use regex::Regex;

use super::data::ParseStats;

/// Call markers, checked for an identifier boundary by hand since `regex` has no
/// look-behind.
static MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\$t|__|t)\(").unwrap());

/// A runtime call with an optional receiver and a static first argument.
static CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:this\.|i18n\.|vm\.)?(?:\$t|__|t)\(\s*(?:'([^'\\\n]*)'|"([^"\\\n]*)"|`([^`$\\]*)`)?"#,
    )
    .unwrap()
});

static KEY_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*(?:\.[A-Za-z0-9_]+){2,}$").unwrap());

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// True if `start` is not preceded by an identifier character or a member dot.
fn at_call_boundary(content: &str, start: usize) -> bool {
    content[..start]
        .chars()
        .next_back()
        .is_none_or(|prev| !is_identifier_char(prev) && prev != '.')
}

/// Number of runtime-call markers in `content`.
///
/// ```
/// use autoglot::core::runtime::count_runtime_calls;
///
/// assert_eq!(count_runtime_calls("{{ $t('A.b.c') }} t('x') __('y')"), 3);
/// assert_eq!(count_runtime_calls("split('x') emit('y') obj.t('z')"), 0);
/// ```
pub fn count_runtime_calls(content: &str) -> usize {
    MARKER_REGEX
        .find_iter(content)
        .filter(|m| at_call_boundary(content, m.start()))
        .count()
}

/// True if `content` contains at least one runtime call.
pub fn contains_runtime_call(content: &str) -> bool {
    count_runtime_calls(content) > 0
}

/// True if `prefix` ends with a runtime callee name (`$t`, `t`, `__`) at an identifier
/// boundary, so that a `(` following it opens a runtime call.
pub fn ends_with_runtime_callee(prefix: &str) -> bool {
    let trimmed = prefix.trim_end();
    ["$t", "__", "t"].iter().any(|name| {
        trimmed
            .strip_suffix(name)
            .is_some_and(|before| at_call_boundary(before, before.len()))
    })
}

/// Record runtime calls found in a chunk of script or interpolation code.
pub fn record_runtime_calls(code: &str, stats: &mut ParseStats) {
    for caps in CALL_REGEX.captures_iter(code) {
        let Some(whole) = caps.get(0) else { continue };
        if !at_call_boundary(code, whole.start()) {
            continue;
        }
        stats.runtime_calls += 1;
        if let Some(key) = caps.get(1).or(caps.get(2)).or(caps.get(3)) {
            stats.runtime_keys.push(key.as_str().to_string());
        }
    }
}

/// Names a function that is a translation call: `t`, `$t`, `__`, `i18n.t`, `this.$t`.
pub fn is_runtime_callee(name: &str) -> bool {
    matches!(
        name,
        "t" | "$t" | "__" | "i18n.t" | "this.$t" | "this.t" | "vm.$t" | "i18n.global.t"
    )
}

/// Already shaped like a translation key (`Namespace.kind.identifier`).
pub fn looks_like_key(text: &str) -> bool {
    KEY_SHAPE_REGEX.is_match(text.trim())
}
