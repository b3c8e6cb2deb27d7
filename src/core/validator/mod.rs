//! Translatability classifier.
//!
//! Decides whether a candidate string is real UI copy or a technical token
//! (identifier, CSS class list, URL, ID, ...). Parsers use it as a gate before
//! emitting items and replacers use it before looking a string up.
//!
//! The rules run in a fixed order and the first rejection wins. The word lists
//! live in [`tables`] so they can be tuned without touching the rules.

mod phonetic;
pub mod tables;

use std::sync::LazyLock;

use regex::Regex;

pub use phonetic::has_english_phonetic_pattern;
use tables::{
    CODE_KEYWORDS, FILE_EXTENSIONS, ID_TOKEN_MAX_LEN, ID_TOKEN_MIN_LEN, PHONETIC_WORD_RATIO,
    TECHNICAL_WORDS,
};

static GUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});
static QUERY_OR_FRAGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[?#&]\S*$").unwrap());
static CODE_KEYWORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b(?:{})\b", CODE_KEYWORDS.join("|"))).unwrap());
static CAMEL_CASE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9]*[A-Z][A-Za-z0-9]*$").unwrap());
static PASCAL_CASE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z0-9]+[A-Z][A-Za-z0-9]*$").unwrap());
static ALL_CAPS_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,5}$").unwrap());
static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[a-z][a-z0-9+.-]*://|www\.|mailto:|tel:|//)|://").unwrap()
});
static FILE_PATH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^[\w@~./\\-]*\.(?:{})$",
        FILE_EXTENSIONS.join("|")
    ))
    .unwrap()
});
static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap()
});
static ID_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());
static CSS_CLASS_LIST_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9:/\[\]-]+(?:\s+[a-z0-9:/\[\]-]+)*$").unwrap()
});
static DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z]{2,}(?::\d{1,5})?(?:\s*\([^)]*\))?$",
    )
    .unwrap()
});
static UTILITY_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[a-z0-9]+:)*-?[a-z0-9]+(?:-[a-z0-9/.\[\]]+)+$").unwrap()
});

/// A rejection rule: returns true when the candidate must be rejected.
type RejectRule = fn(&str) -> bool;

/// Ordered rejection rules. First match wins.
const RULES: &[(&str, RejectRule)] = &[
    ("too-short", is_too_short),
    ("technical-token", is_technical_token),
    ("css-class-list", is_css_class_list),
    ("domain-name", is_domain_name),
    ("utility-classes", is_mostly_utility_classes),
    ("phonetic", fails_phonetic_check),
    ("lowercase-single-word", is_lowercase_single_word),
    ("all-hyphenated", is_all_hyphenated),
];

/// Returns true if the candidate reads like translatable UI copy.
///
/// # Examples
///
/// ```
/// use autoglot::core::validator::is_translatable_text;
///
/// assert!(is_translatable_text("Save Changes"));
/// assert!(is_translatable_text("Submit"));
/// assert!(!is_translatable_text("btn-primary"));
/// assert!(!is_translatable_text("true"));
/// ```
pub fn is_translatable_text(candidate: &str) -> bool {
    rejection_reason(candidate).is_none()
}

/// Name of the first rule rejecting the candidate, or `None` if it is translatable.
pub fn rejection_reason(candidate: &str) -> Option<&'static str> {
    let text = candidate.trim();
    RULES
        .iter()
        .find(|(_, rejects)| rejects(text))
        .map(|(name, _)| *name)
}

fn is_single_token(text: &str) -> bool {
    !text.contains(char::is_whitespace)
}

/// `{name}` style placeholders, ignoring surrounding punctuation.
fn is_placeholder_word(word: &str) -> bool {
    let core = word.trim_matches(|c: char| !c.is_alphanumeric() && c != '{' && c != '}');
    core.len() > 2 && core.starts_with('{') && core.ends_with('}')
}

fn content_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|w| !is_placeholder_word(w))
        .collect()
}

fn strip_trailing_punctuation(text: &str) -> &str {
    text.trim_end_matches(['.', '!', '?', '…', ':', ',', ';'])
}

// Rule 1
fn is_too_short(text: &str) -> bool {
    !text.chars().any(|c| c.is_alphabetic()) || text.chars().count() < 2
}

// Rule 2
fn is_technical_token(text: &str) -> bool {
    if GUID_REGEX.is_match(text) || QUERY_OR_FRAGMENT_REGEX.is_match(text) {
        return true;
    }
    if CODE_KEYWORD_REGEX.is_match(text) && (text.contains('{') || text.contains(';')) {
        return true;
    }
    if URL_REGEX.is_match(text) || HEX_COLOR_REGEX.is_match(text) {
        return true;
    }
    if is_mostly_numeric(text) {
        return true;
    }
    if !is_single_token(text) {
        return false;
    }

    CAMEL_CASE_REGEX.is_match(text)
        || PASCAL_CASE_REGEX.is_match(text)
        || ALL_CAPS_CODE_REGEX.is_match(text)
        || FILE_PATH_REGEX.is_match(text)
        || text.starts_with('/')
        || text.starts_with("./")
        || text.starts_with("../")
        || is_id_token(text)
        || is_dotted_or_snake_token(text)
        || is_technical_word(text)
}

fn is_mostly_numeric(text: &str) -> bool {
    let digits = text.chars().filter(|c| c.is_ascii_digit()).count();
    let letters = text.chars().filter(|c| c.is_alphabetic()).count();
    digits > letters
}

fn is_id_token(text: &str) -> bool {
    let len = text.chars().count();
    (ID_TOKEN_MIN_LEN..=ID_TOKEN_MAX_LEN).contains(&len)
        && ID_TOKEN_REGEX.is_match(text)
        && text.chars().any(|c| c.is_ascii_alphabetic())
        && text.chars().any(|c| c.is_ascii_digit())
}

/// Any `_` or `.` in a space-free token, trailing dots included.
fn is_dotted_or_snake_token(text: &str) -> bool {
    text.contains(['_', '.'])
}

fn is_technical_word(text: &str) -> bool {
    let word = strip_trailing_punctuation(text).to_lowercase();
    TECHNICAL_WORDS.contains(&word.as_str())
}

// Rule 3
fn is_css_class_list(text: &str) -> bool {
    CSS_CLASS_LIST_REGEX.is_match(text)
        && (text.split_whitespace().count() > 3 || text.contains('-'))
}

// Rule 4
fn is_domain_name(text: &str) -> bool {
    DOMAIN_REGEX.is_match(text)
}

// Rule 5
fn is_mostly_utility_classes(text: &str) -> bool {
    let words = content_words(text);
    let utility = words
        .iter()
        .filter(|w| UTILITY_TOKEN_REGEX.is_match(w))
        .count();
    utility >= 1 && utility + 1 >= words.len()
}

// Rule 6
fn fails_phonetic_check(text: &str) -> bool {
    let words: Vec<&str> = content_words(text)
        .into_iter()
        .filter(|w| w.chars().any(|c| c.is_alphabetic()))
        .collect();
    if words.is_empty() {
        return true;
    }
    let passing = words
        .iter()
        .filter(|w| has_english_phonetic_pattern(w))
        .count();
    (passing as f64) < (words.len() as f64) * PHONETIC_WORD_RATIO
}

// Rule 7
fn is_lowercase_single_word(text: &str) -> bool {
    if !is_single_token(text) {
        return false;
    }
    match text.chars().next() {
        Some(first) => !(first.is_uppercase() || (first.is_alphabetic() && !first.is_lowercase())),
        None => true,
    }
}

// Rule 8
fn is_all_hyphenated(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    words.len() > 1 && words.iter().all(|w| w.contains('-'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_known_fixtures() {
        assert!(is_translatable_text("Save Changes"));
        assert!(!is_translatable_text("btn-primary"));
        assert!(!is_translatable_text("a1b2c3d4e5"));
        assert!(!is_translatable_text("true"));
        assert!(is_translatable_text("Submit"));
        assert!(!is_translatable_text("w-full"));
    }

    #[test]
    fn test_real_copy_passes() {
        for text in [
            "Welcome Home",
            "Invoice Overview",
            "Go",
            "Hello World",
            "Submit now",
            "Enter your email address",
            "Are you sure you want to delete this invoice?",
            "Welcome back, {name}!",
            "Delete",
            "保存",
            "Überprüfen Sie Ihre Eingabe",
        ] {
            assert!(is_translatable_text(text), "{text:?} should be translatable");
        }
    }

    #[test]
    fn test_rejection_reasons() {
        let cases = [
            ("", "too-short"),
            ("A", "too-short"),
            ("123", "too-short"),
            ("550e8400-e29b-41d4-a716-446655440000", "technical-token"),
            ("?page=2", "technical-token"),
            ("#section", "technical-token"),
            ("if (x) { return; }", "technical-token"),
            ("userName", "technical-token"),
            ("UserProfile", "technical-token"),
            ("USD", "technical-token"),
            ("https://example.com/docs", "technical-token"),
            ("assets/logo.png", "technical-token"),
            ("#fff", "technical-token"),
            ("Q1 2024", "technical-token"),
            ("user_id", "technical-token"),
            ("config.json", "technical-token"),
            ("Done.", "technical-token"),
            ("Loading...", "technical-token"),
            ("Div", "technical-token"),
            ("flex items center justify", "css-class-list"),
            ("text-sm font-bold", "css-class-list"),
            ("api.example.com:8080 (staging)", "domain-name"),
            ("Box hover:bg-blue-500 md:px-4", "utility-classes"),
            ("Box w-full", "utility-classes"),
            ("Xkcdq Zzxyq", "phonetic"),
            ("hello", "lowercase-single-word"),
            ("Sign-in Log-out", "all-hyphenated"),
        ];
        for (text, expected) in cases {
            assert_eq!(rejection_reason(text), Some(expected), "{text:?}");
        }
    }

    #[test]
    fn test_placeholder_only_is_rejected() {
        assert!(!is_translatable_text("{count}"));
        assert!(!is_translatable_text("{a} {b}"));
    }

    #[test]
    fn test_candidate_is_trimmed() {
        assert!(is_translatable_text("   Save Changes \n"));
    }
}
