use serde::Serialize;

use super::Kind;

/// Whether an item came from a text node or an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Text,
    Attribute,
}

/// A translatable text candidate found by a parser.
///
/// `text` is already whitespace-normalized and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub text: String,
    pub kind: Kind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_name: Option<String>,
    /// 1-based line of the item in the parsed content.
    pub line: usize,
    /// 1-based column of the item in the parsed content.
    pub col: usize,
}

impl ExtractedItem {
    pub fn text(text: impl Into<String>, kind: Kind, parent_tag: Option<String>) -> Self {
        Self {
            item_type: ItemType::Text,
            text: text.into(),
            kind,
            parent_tag,
            attribute_name: None,
            line: 1,
            col: 1,
        }
    }

    pub fn attribute(
        text: impl Into<String>,
        kind: Kind,
        parent_tag: Option<String>,
        attribute_name: impl Into<String>,
    ) -> Self {
        Self {
            item_type: ItemType::Attribute,
            text: text.into(),
            kind,
            parent_tag,
            attribute_name: Some(attribute_name.into()),
            line: 1,
            col: 1,
        }
    }

    pub fn at(mut self, line: usize, col: usize) -> Self {
        self.line = line;
        self.col = col;
        self
    }
}

/// Counters collected during one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseStats {
    /// Non-empty text nodes seen.
    pub text_nodes: usize,
    /// Allow-listed attribute values seen.
    pub attributes: usize,
    /// Candidates rejected by the text validator.
    pub rejected: usize,
    /// Calls into the translation runtime (`t(...)`, `$t(...)`).
    pub runtime_calls: usize,
    /// Static keys passed to those calls, in source order.
    pub runtime_keys: Vec<String>,
    /// True when the content could not be parsed at all (script syntax only).
    pub parse_failed: bool,
}

/// Output of a parser run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub items: Vec<ExtractedItem>,
    pub stats: ParseStats,
}
