//! Kind inference tables for markup.

use crate::core::data::Kind;

/// Formatting tags whose text takes its kind from the enclosing element.
const INLINE_TAGS: &[&str] = &[
    "span", "strong", "b", "i", "em", "small", "mark", "u", "s", "sub", "sup", "abbr", "code",
    "kbd", "del", "ins", "q", "cite", "time", "font", "bdi", "bdo",
];

const LINK_TAGS: &[&str] = &["a", "router-link", "nuxt-link", "inertia-link", "link-to"];

/// Component names from popular Vue component libraries, normalized to kebab case.
///
/// Element Plus, Vuetify, Quasar, Ant Design Vue, Naive UI, PrimeVue and Bootstrap-Vue.
const COMPONENT_KINDS: &[(&str, &str)] = &[
    // Element Plus
    ("el-link", "link"),
    ("el-menu-item", "link"),
    ("el-breadcrumb-item", "link"),
    ("el-form-item", "label"),
    ("el-tab-pane", "label"),
    ("el-checkbox", "label"),
    ("el-radio", "label"),
    ("el-input", "placeholder"),
    ("el-select", "placeholder"),
    ("el-dialog", "title"),
    ("el-tooltip", "title"),
    // Vuetify
    ("v-btn", "button"),
    ("v-card-title", "title"),
    ("v-toolbar-title", "title"),
    ("v-list-item-title", "title"),
    ("v-text-field", "placeholder"),
    ("v-textarea", "placeholder"),
    ("v-select", "placeholder"),
    ("v-tab", "label"),
    ("v-chip", "label"),
    // Quasar
    ("q-btn", "button"),
    ("q-input", "placeholder"),
    ("q-select", "placeholder"),
    ("q-item-label", "label"),
    ("q-toolbar-title", "title"),
    ("q-tab", "label"),
    ("q-tooltip", "title"),
    // Ant Design Vue
    ("a-input", "placeholder"),
    ("a-select", "placeholder"),
    ("a-form-item", "label"),
    ("a-menu-item", "link"),
    ("a-modal", "title"),
    ("a-tooltip", "title"),
    ("a-typography-title", "heading"),
    // Naive UI
    ("n-input", "placeholder"),
    ("n-select", "placeholder"),
    ("n-form-item", "label"),
    ("n-h1", "heading"),
    ("n-h2", "heading"),
    ("n-h3", "heading"),
    ("n-h4", "heading"),
    ("n-h5", "heading"),
    ("n-h6", "heading"),
    ("n-tooltip", "title"),
    // PrimeVue
    ("input-text", "placeholder"),
    ("dropdown", "placeholder"),
    ("dialog", "title"),
    ("panel", "title"),
    ("tab-panel", "label"),
    // Bootstrap-Vue
    ("b-link", "link"),
    ("b-nav-item", "link"),
    ("b-dropdown-item", "link"),
    ("b-form-input", "placeholder"),
    ("b-form-textarea", "placeholder"),
    ("b-form-group", "label"),
    ("b-modal", "title"),
    ("b-card-title", "title"),
];

/// `InputText` → `input-text`, `el-button` stays as is.
pub fn normalize_tag(tag: &str) -> String {
    let mut normalized = String::with_capacity(tag.len() + 4);
    for (i, c) in tag.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 && !normalized.ends_with('-') {
                normalized.push('-');
            }
            normalized.push(c.to_ascii_lowercase());
        } else {
            normalized.push(c);
        }
    }
    normalized
}

pub fn is_inline_tag(tag: &str) -> bool {
    INLINE_TAGS.contains(&normalize_tag(tag).as_str())
}

/// Kind implied by an element, if it implies one.
pub fn kind_for_tag(tag: &str) -> Option<Kind> {
    let tag = normalize_tag(tag);

    if let [b'h', level] = tag.as_bytes()
        && (b'1'..=b'6').contains(level)
    {
        return Some(Kind::Heading);
    }
    if let Some((_, kind)) = COMPONENT_KINDS.iter().find(|(name, _)| *name == tag) {
        return Some(Kind::parse(kind));
    }
    if tag.contains("button") || tag.contains("btn") {
        return Some(Kind::Button);
    }
    match tag.as_str() {
        "label" | "legend" => Some(Kind::Label),
        "title" => Some(Kind::Title),
        "input" | "textarea" | "select" => Some(Kind::Placeholder),
        _ if LINK_TAGS.contains(&tag.as_str()) => Some(Kind::Link),
        _ => None,
    }
}

/// Kind of a text node given its open ancestors, innermost last.
///
/// Inline formatting tags defer to their parent.
pub fn kind_for_text<'a>(ancestors: impl DoubleEndedIterator<Item = &'a str>) -> Kind {
    ancestors
        .rev()
        .find(|tag| !is_inline_tag(tag))
        .and_then(kind_for_tag)
        .unwrap_or(Kind::Text)
}

/// Kind of an attribute value, falling back to the kind of its element.
pub fn kind_for_attribute(attribute: &str, tag: &str) -> Kind {
    let name = attribute.to_ascii_lowercase();
    match name.as_str() {
        "title" | "tooltip" => Kind::Title,
        "alt" => Kind::Alt,
        "placeholder" | "aria-placeholder" => Kind::Placeholder,
        "aria-label" | "aria-description" => Kind::AriaLabel,
        "label" => Kind::Label,
        _ if name.contains("button") || name.contains("btn") => Kind::Button,
        _ => kind_for_tag(tag).unwrap_or(Kind::Text),
    }
}
