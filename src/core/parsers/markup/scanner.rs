//! Drives the transition function over a document and records what it sees.

use std::ops::Range;

use super::Dialect;
use super::state::{Context, Effect, RawKind, State, transition};

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrValue {
    pub text: String,
    /// Byte range of the value, quotes excluded.
    pub span: Range<usize>,
    pub quote: Option<char>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Byte offset of the first character of the name.
    pub start: usize,
    pub value: Option<AttrValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken {
    pub name: String,
    /// From `<` to `>` inclusive.
    pub span: Range<usize>,
    pub closing: bool,
    pub self_closing: bool,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    /// Raw byte range of the node, interpolations included.
    pub span: Range<usize>,
    /// Node text with interpolations and comments removed, not yet normalized.
    pub text: String,
    /// Byte offset of the first visible character, if any.
    pub first_visible: Option<usize>,
    /// Open elements enclosing the node, innermost last.
    pub ancestors: Vec<String>,
    pub has_interpolation: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock {
    pub kind: RawKind,
    pub tag: String,
    /// Contents between the open and close tags.
    pub span: Range<usize>,
}

/// Structural outline of a markup document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub tags: Vec<TagToken>,
    pub texts: Vec<TextNode>,
    pub raw_blocks: Vec<RawBlock>,
    /// Comments and dialect raw blocks such as `@php ... @endphp`.
    pub comments: Vec<Range<usize>>,
    pub interpolations: Vec<Range<usize>>,
}

impl Document {
    /// The tag token whose span contains `offset`.
    pub fn tag_at(&self, offset: usize) -> Option<&TagToken> {
        let index = self.tags.partition_point(|tag| tag.span.start <= offset);
        let tag = self.tags.get(index.checked_sub(1)?)?;
        tag.span.contains(&offset).then_some(tag)
    }

    /// True if a tag ends with the `>` at `offset`.
    pub fn is_tag_end(&self, offset: usize) -> bool {
        self.tag_at(offset).is_some_and(|tag| tag.span.end == offset + 1)
    }

    /// True if a tag starts with the `<` at `offset`.
    pub fn is_tag_start(&self, offset: usize) -> bool {
        self.tag_at(offset).is_some_and(|tag| tag.span.start == offset)
    }

    pub fn text_at(&self, offset: usize) -> Option<&TextNode> {
        self.texts.iter().find(|node| node.span.contains(&offset))
    }

    pub fn in_interpolation(&self, offset: usize) -> bool {
        self.interpolations.iter().any(|span| span.contains(&offset))
    }

    pub fn interpolation_at(&self, offset: usize) -> Option<&Range<usize>> {
        self.interpolations.iter().find(|span| span.contains(&offset))
    }

    /// Inside a comment, a skipped block, or the raw contents of a script or style.
    pub fn in_skipped_region(&self, offset: usize) -> bool {
        self.comments.iter().any(|span| span.contains(&offset))
            || self.raw_blocks.iter().any(|block| block.span.contains(&offset))
    }
}

#[derive(Default)]
struct PendingAttr {
    name: String,
    start: usize,
    value: Option<AttrValue>,
}

#[derive(Default)]
struct PendingTag {
    start: usize,
    name: String,
    closing: bool,
    attributes: Vec<Attribute>,
    attr: Option<PendingAttr>,
}

impl PendingTag {
    fn finish_attr(&mut self, end: usize) {
        if let Some(mut attr) = self.attr.take() {
            if let Some(value) = attr.value.as_mut()
                && value.quote.is_none()
            {
                value.span.end = end;
            }
            self.attributes.push(Attribute {
                name: attr.name,
                start: attr.start,
                value: attr.value,
            });
        }
    }
}

#[derive(Default)]
struct PendingText {
    start: Option<usize>,
    text: String,
    first_visible: Option<usize>,
    has_interpolation: bool,
}

struct Scanner<'a> {
    content: &'a str,
    dialect: &'a Dialect,
    doc: Document,
    stack: Vec<String>,
    text: PendingText,
    tag: PendingTag,
    raw_tag: String,
    raw_start: usize,
    comment_start: usize,
}

/// Scan `content` with the markup state machine.
///
/// Never fails: malformed markup is consumed until a recognizable transition appears.
pub fn scan(content: &str, dialect: &Dialect) -> Document {
    let mut scanner = Scanner {
        content,
        dialect,
        doc: Document::default(),
        stack: Vec::new(),
        text: PendingText::default(),
        tag: PendingTag::default(),
        raw_tag: String::new(),
        raw_start: 0,
        comment_start: 0,
    };

    let mut state = State::Text;
    let mut pos = 0;
    while let Some(c) = content[pos..].chars().next() {
        let rest = &content[pos..];
        let ctx = Context {
            dialect,
            tag_name: &scanner.tag.name,
            closing_tag: scanner.tag.closing,
            raw_tag: &scanner.raw_tag,
        };
        let step = transition(state, c, rest, &ctx);
        let consumed = step.consumed.max(c.len_utf8());
        scanner.apply(step.effect, step.state, c, pos, consumed);
        state = step.state;
        pos += consumed;
    }

    scanner.finish(state);
    scanner.doc
}

impl Scanner<'_> {
    fn apply(&mut self, effect: Effect, next: State, c: char, pos: usize, consumed: usize) {
        match effect {
            Effect::None => {}
            Effect::TextChar => {
                self.text.start.get_or_insert(pos);
                if !c.is_whitespace() {
                    self.text.first_visible.get_or_insert(pos);
                }
                self.text.text.push(c);
            }
            Effect::Interpolation { .. } => {
                self.text.start.get_or_insert(pos);
                self.text.has_interpolation = true;
                self.text.text.push(' ');
                self.doc.interpolations.push(pos..pos + consumed);
            }
            Effect::TagStart => {
                self.flush_text(pos);
                self.tag = PendingTag {
                    start: pos,
                    ..PendingTag::default()
                };
            }
            Effect::BeginTag => self.tag.name.push(c),
            Effect::BeginClosingTag => self.tag.closing = true,
            Effect::TagNameChar => self.tag.name.push(c),
            Effect::BeginAttr => {
                self.tag.finish_attr(pos);
                self.tag.attr = Some(PendingAttr {
                    name: c.to_string(),
                    start: pos,
                    value: None,
                });
            }
            Effect::AttrNameChar => {
                if let Some(attr) = self.tag.attr.as_mut() {
                    attr.name.push(c);
                }
            }
            Effect::BeginQuotedValue => {
                if let Some(attr) = self.tag.attr.as_mut() {
                    attr.value = Some(AttrValue {
                        text: String::new(),
                        span: pos + 1..pos + 1,
                        quote: Some(c),
                    });
                }
            }
            Effect::ValueChar => {
                if let Some(attr) = self.tag.attr.as_mut() {
                    let value = attr.value.get_or_insert_with(|| AttrValue {
                        text: String::new(),
                        span: pos..pos,
                        quote: None,
                    });
                    value.text.push(c);
                    value.span.end = pos + c.len_utf8();
                }
            }
            Effect::EndAttrValue => self.tag.finish_attr(pos),
            Effect::EndTag { self_closing } => self.end_tag(pos + consumed, self_closing, next),
            Effect::CommentStart => {
                self.comment_start = pos;
            }
            Effect::CommentEnd => {
                self.doc.comments.push(self.comment_start..pos + consumed);
            }
            Effect::EndRaw => {
                self.end_raw(pos);
                self.tag = PendingTag {
                    start: pos,
                    ..PendingTag::default()
                };
            }
        }
    }

    fn end_tag(&mut self, end: usize, self_closing: bool, next: State) {
        self.tag.finish_attr(end - 1);
        let tag = std::mem::take(&mut self.tag);
        let name = tag.name.trim().to_string();

        if tag.closing {
            let lower = name.to_ascii_lowercase();
            if let Some(index) = self
                .stack
                .iter()
                .rposition(|open| open.to_ascii_lowercase() == lower)
            {
                self.stack.truncate(index);
            }
        } else if !self_closing
            && !name.starts_with('!')
            && !VOID_TAGS.contains(&name.to_ascii_lowercase().as_str())
        {
            self.stack.push(name.clone());
        }

        if matches!(next, State::Script | State::Style) {
            self.raw_tag = name.clone();
            self.raw_start = end;
        }

        self.doc.tags.push(TagToken {
            name,
            span: tag.start..end,
            closing: tag.closing,
            self_closing,
            attributes: tag.attributes,
        });
    }

    fn end_raw(&mut self, end: usize) {
        let kind = self
            .dialect
            .raw_kind(&self.raw_tag)
            .unwrap_or(RawKind::Style);
        self.doc.raw_blocks.push(RawBlock {
            kind,
            tag: std::mem::take(&mut self.raw_tag),
            span: self.raw_start..end,
        });
    }

    fn flush_text(&mut self, end: usize) {
        let text = std::mem::take(&mut self.text);
        let Some(start) = text.start else {
            return;
        };
        self.doc.texts.push(TextNode {
            span: start..end,
            text: text.text,
            first_visible: text.first_visible,
            ancestors: self.stack.clone(),
            has_interpolation: text.has_interpolation,
        });
    }

    fn finish(&mut self, state: State) {
        let end = self.content.len();
        match state {
            State::Text => self.flush_text(end),
            State::Comment { .. } => self.doc.comments.push(self.comment_start..end),
            State::Script | State::Style => self.end_raw(end),
            // an unterminated tag is dropped
            _ => {}
        }
    }
}
