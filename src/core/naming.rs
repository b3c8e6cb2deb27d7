//! Translation key naming.
//!
//! Keys have the shape `{namespace}.{kind}.{slug}`. The slug is a one-way,
//! deterministic normalization of the source text; collisions are resolved by
//! the locale tree merge, not here.

use super::data::{ExtractedItem, Kind};
use super::validator::is_translatable_text;

/// Shared namespace for short, reusable copy ("Save", "Cancel").
pub const COMMONS: &str = "Commons";

/// Slugs longer than this are cut back to the last `_` boundary.
pub const MAX_SLUG_LEN: usize = 48;

const MAX_COMMON_WORDS: usize = 2;
const MAX_COMMON_CHARS: usize = 24;
const SENTENCE_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Derive the key slug for a piece of text.
///
/// # Examples
///
/// ```
/// use autoglot::core::naming::slugify;
///
/// assert_eq!(slugify("Invoice Overview"), "invoice_overview");
/// assert_eq!(slugify("Crème brûlée!"), "creme_brulee");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        match transliterate(c) {
            Some(ascii) => {
                if pending_separator && !slug.is_empty() {
                    slug.push('_');
                }
                pending_separator = false;
                slug.push_str(ascii);
            }
            None => pending_separator = true,
        }
    }

    if slug.is_empty() {
        return format!("t_{:08x}", fnv1a(text));
    }
    truncate_slug(slug)
}

fn truncate_slug(slug: String) -> String {
    if slug.len() <= MAX_SLUG_LEN {
        return slug;
    }
    // slug is pure ASCII here, so byte slicing is safe
    let head = &slug[..MAX_SLUG_LEN];
    if slug.as_bytes()[MAX_SLUG_LEN] == b'_' {
        return head.to_string();
    }
    match head.rfind('_') {
        Some(cut) if cut > 0 => head[..cut].to_string(),
        _ => head.to_string(),
    }
}

/// Map a lowercase character to its ASCII spelling, or `None` for separators
/// and letters without a Latin transliteration.
fn transliterate(c: char) -> Option<&'static str> {
    const ASCII: [&str; 36] = [
        "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "a", "b", "c", "d", "e", "f", "g", "h",
        "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z",
    ];
    if let Some(digit) = c.to_digit(36).filter(|_| c.is_ascii()) {
        return Some(ASCII[digit as usize]);
    }
    let ascii = match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ţ' | 'ť' | 'ŧ' => "t",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        'þ' => "th",
        _ => return None,
    };
    Some(ascii)
}

/// 32-bit FNV-1a, used for slugs of text with no Latin letters.
fn fnv1a(text: &str) -> u32 {
    text.bytes().fold(0x811c_9dc5, |hash: u32, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    })
}

/// Build the full dotted key for a piece of text.
///
/// ```
/// use autoglot::core::data::Kind;
/// use autoglot::core::naming::generate_key;
///
/// assert_eq!(
///     generate_key(&Kind::Heading, "Billing", "Invoice Overview"),
///     "Billing.heading.invoice_overview"
/// );
/// ```
pub fn generate_key(kind: &Kind, namespace: &str, text: &str) -> String {
    format!("{}.{}.{}", namespace, kind, slugify(text))
}

/// Key an extracted item should be stored under, or `None` if the text is not
/// translatable. Common short text goes to the `Commons` namespace.
pub fn key_for_item(namespace: &str, item: &ExtractedItem) -> Option<String> {
    if !is_translatable_text(&item.text) {
        return None;
    }
    let namespace = if is_common_short_text(&item.text) {
        COMMONS
    } else {
        namespace
    };
    Some(generate_key(&item.kind, namespace, &item.text))
}

/// Short, punctuation-free copy that is shared through `Commons`.
pub fn is_common_short_text(text: &str) -> bool {
    let text = text.trim();
    !text.is_empty()
        && text.split_whitespace().count() <= MAX_COMMON_WORDS
        && text.chars().count() <= MAX_COMMON_CHARS
        && !text.contains(SENTENCE_PUNCTUATION)
        && !text.contains(['/', '_'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Save Changes"), "save_changes");
        assert_eq!(slugify("  Welcome back, {name}!  "), "welcome_back_name");
        assert_eq!(slugify("Don't panic"), "don_t_panic");
        assert_eq!(slugify("Straße & Größe"), "strasse_grosse");
        assert_eq!(slugify("Page 2 of 10"), "page_2_of_10");
    }

    #[test]
    fn test_slugify_caps_on_word_boundary() {
        let text = "Please confirm that you want to permanently delete every invoice";
        let slug = slugify(text);
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert_eq!(slug, "please_confirm_that_you_want_to_permanently");
        assert!(!slug.ends_with('_'));
    }

    #[test]
    fn test_slugify_without_latin_letters_hashes() {
        let slug = slugify("保存");
        assert!(slug.starts_with("t_"));
        assert_eq!(slug.len(), 10);
        assert_eq!(slug, slugify("保存"));
        assert_ne!(slug, slugify("取消"));
    }

    #[test]
    fn test_generate_key() {
        assert_eq!(
            generate_key(&Kind::AriaLabel, "App.Nav", "Open menu"),
            "App.Nav.aria_label.open_menu"
        );
    }

    #[test]
    fn test_key_for_item_routes_common_text() {
        let save = ExtractedItem::text("Save", Kind::Button, Some("button".to_string()));
        assert_eq!(
            key_for_item("Billing", &save),
            Some("Commons.button.save".to_string())
        );

        let sentence = ExtractedItem::text("Your invoice is ready.", Kind::Text, None);
        assert_eq!(
            key_for_item("Billing", &sentence),
            Some("Billing.text.your_invoice_is_ready".to_string())
        );

        let token = ExtractedItem::text("btn-primary", Kind::Text, None);
        assert_eq!(key_for_item("Billing", &token), None);
    }

    #[test]
    fn test_is_common_short_text() {
        assert!(is_common_short_text("Save"));
        assert!(is_common_short_text("Invoice Overview"));
        assert!(!is_common_short_text("Save all changes"));
        assert!(!is_common_short_text("Save!"));
        assert!(!is_common_short_text("Yes/No"));
        assert!(is_common_short_text("{count} items"));
        assert!(!is_common_short_text("Internationalization Considerations"));
        assert!(!is_common_short_text("   "));
    }
}
