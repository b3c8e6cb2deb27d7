use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Semantic role of a translatable string.
///
/// Inferred from the markup context during extraction. `Other` carries kinds
/// supplied by the user when converting a selection by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Text,
    Heading,
    Button,
    Label,
    Placeholder,
    Link,
    Title,
    Alt,
    AriaLabel,
    Other(String),
}

impl Kind {
    pub fn as_str(&self) -> &str {
        match self {
            Kind::Text => "text",
            Kind::Heading => "heading",
            Kind::Button => "button",
            Kind::Label => "label",
            Kind::Placeholder => "placeholder",
            Kind::Link => "link",
            Kind::Title => "title",
            Kind::Alt => "alt",
            Kind::AriaLabel => "aria_label",
            Kind::Other(name) => name,
        }
    }

    /// Parse a kind name. Unknown names become `Kind::Other`.
    pub fn parse(name: &str) -> Kind {
        match name {
            "text" => Kind::Text,
            "heading" => Kind::Heading,
            "button" => Kind::Button,
            "label" => Kind::Label,
            "placeholder" => Kind::Placeholder,
            "link" => Kind::Link,
            "title" => Kind::Title,
            "alt" => Kind::Alt,
            "aria_label" | "aria-label" => Kind::AriaLabel,
            other => Kind::Other(other.to_string()),
        }
    }

    /// Infer a kind from an identifier such as a variable or property name.
    ///
    /// The identifier is split into words (`submitButtonText` → `submit`, `button`, `text`)
    /// so that `salt` never reads as `alt`.
    pub fn from_identifier(name: &str) -> Kind {
        let words = identifier_words(name);
        let has = |w: &str| words.iter().any(|word| word == w);

        if has("heading") || has("header") || has("headline") {
            Kind::Heading
        } else if has("title") {
            Kind::Title
        } else if has("button") || has("btn") || has("cta") {
            Kind::Button
        } else if has("placeholder") {
            Kind::Placeholder
        } else if has("label") {
            Kind::Label
        } else if has("link") || has("href") {
            Kind::Link
        } else if has("alt") {
            Kind::Alt
        } else {
            Kind::Text
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Kind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Kind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Kind::parse(&name))
    }
}

/// Split a camelCase, PascalCase, snake_case or kebab-case identifier into lowercase words.
fn identifier_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in name.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
