//! States and the pure transition function of the markup scanner.
//!
//! The transition looks at the current character and the remaining input and
//! says where to go next, what the scanner should do with its buffers, and how
//! many bytes were consumed. It never touches the buffers itself.

use super::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Text,
    /// Just consumed `<`.
    TagOpen,
    TagName,
    /// Between attributes inside an open tag.
    TagSpace,
    AttrName,
    /// After an attribute name, waiting for `=` or the next attribute.
    AttrEquals,
    /// After `=`, waiting for the value.
    AttrValueStart,
    AttrValue { quote: Option<char> },
    /// Inside `</name`.
    TagClose,
    /// Skipped verbatim until `close`. Also used for dialect raw blocks.
    Comment { close: &'static str },
    /// Raw contents of `<script>`, scanned for runtime calls only.
    Script,
    /// Raw contents of `<style>` and other skipped elements.
    Style,
}

/// What the scanner does with the consumed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Append the character to the current text node.
    TextChar,
    /// The consumed bytes are an interpolation (`{{ expr }}`).
    Interpolation { open: &'static str, close: &'static str },
    /// `<` starts a tag: flush the text node and mark the tag start.
    TagStart,
    /// First character of an opening tag name.
    BeginTag,
    BeginClosingTag,
    TagNameChar,
    /// First character of an attribute name.
    BeginAttr,
    AttrNameChar,
    BeginQuotedValue,
    ValueChar,
    EndAttrValue,
    EndTag { self_closing: bool },
    CommentStart,
    CommentEnd,
    /// The raw element ended; the consumed `<` starts its closing tag.
    EndRaw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: State,
    pub effect: Effect,
    /// Bytes consumed, always at least the current character.
    pub consumed: usize,
}

/// Read-only view of the scanner the transition may consult.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub dialect: &'a Dialect,
    /// Name of the tag being read (valid in tag states).
    pub tag_name: &'a str,
    pub closing_tag: bool,
    /// Name of the raw element being skipped (valid in `Script`/`Style`).
    pub raw_tag: &'a str,
}

/// Kind of raw element a tag opens, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    Script,
    Style,
}

fn step(state: State, effect: Effect, c: char) -> Transition {
    Transition {
        state,
        effect,
        consumed: c.len_utf8(),
    }
}

fn jump(state: State, effect: Effect, consumed: usize) -> Transition {
    Transition {
        state,
        effect,
        consumed,
    }
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// A block opener ending in a letter (`@php`) must be followed by whitespace.
fn opens_block(rest: &str, open: &str) -> bool {
    if !rest.starts_with(open) {
        return false;
    }
    if open.ends_with(|c: char| c.is_ascii_alphabetic()) {
        return rest[open.len()..].starts_with(char::is_whitespace);
    }
    true
}

/// State reached after `>` closes an opening tag.
fn state_after_open_tag(ctx: &Context) -> State {
    if ctx.closing_tag {
        return State::Text;
    }
    match ctx.dialect.raw_kind(ctx.tag_name) {
        Some(RawKind::Script) => State::Script,
        Some(RawKind::Style) => State::Style,
        None => State::Text,
    }
}

fn end_of_tag(c: char, rest: &str, ctx: &Context) -> Option<Transition> {
    if rest.starts_with("/>") {
        return Some(jump(
            State::Text,
            Effect::EndTag { self_closing: true },
            2,
        ));
    }
    if c == '>' {
        return Some(step(
            state_after_open_tag(ctx),
            Effect::EndTag {
                self_closing: false,
            },
            c,
        ));
    }
    None
}

pub fn transition(state: State, c: char, rest: &str, ctx: &Context) -> Transition {
    match state {
        State::Text => text(c, rest, ctx),
        State::TagOpen => match c {
            '/' => step(State::TagClose, Effect::BeginClosingTag, c),
            c if c.is_alphabetic() || c == '!' => step(State::TagName, Effect::BeginTag, c),
            _ => step(State::Text, Effect::TextChar, c),
        },
        State::TagName => {
            if let Some(t) = end_of_tag(c, rest, ctx) {
                t
            } else if c.is_whitespace() {
                step(State::TagSpace, Effect::None, c)
            } else {
                step(State::TagName, Effect::TagNameChar, c)
            }
        }
        State::TagSpace => {
            if let Some(t) = end_of_tag(c, rest, ctx) {
                t
            } else if c.is_whitespace() || c == '/' {
                step(State::TagSpace, Effect::None, c)
            } else if c == '<' {
                // unterminated tag followed by a new one
                step(State::TagOpen, Effect::TagStart, c)
            } else {
                step(State::AttrName, Effect::BeginAttr, c)
            }
        }
        State::AttrName => {
            if let Some(t) = end_of_tag(c, rest, ctx) {
                t
            } else if c == '=' {
                step(State::AttrValueStart, Effect::None, c)
            } else if c.is_whitespace() {
                step(State::AttrEquals, Effect::None, c)
            } else {
                step(State::AttrName, Effect::AttrNameChar, c)
            }
        }
        State::AttrEquals => {
            if let Some(t) = end_of_tag(c, rest, ctx) {
                t
            } else if c == '=' {
                step(State::AttrValueStart, Effect::None, c)
            } else if c.is_whitespace() {
                step(State::AttrEquals, Effect::None, c)
            } else {
                step(State::AttrName, Effect::BeginAttr, c)
            }
        }
        State::AttrValueStart => match c {
            '"' | '\'' => step(
                State::AttrValue { quote: Some(c) },
                Effect::BeginQuotedValue,
                c,
            ),
            c if c.is_whitespace() => step(State::AttrValueStart, Effect::None, c),
            '>' => step(
                state_after_open_tag(ctx),
                Effect::EndTag {
                    self_closing: false,
                },
                c,
            ),
            _ => step(State::AttrValue { quote: None }, Effect::ValueChar, c),
        },
        State::AttrValue { quote: Some(q) } => {
            if c == q {
                step(State::TagSpace, Effect::EndAttrValue, c)
            } else {
                step(state, Effect::ValueChar, c)
            }
        }
        State::AttrValue { quote: None } => {
            if c == '>' {
                step(
                    state_after_open_tag(ctx),
                    Effect::EndTag {
                        self_closing: false,
                    },
                    c,
                )
            } else if c.is_whitespace() {
                step(State::TagSpace, Effect::EndAttrValue, c)
            } else {
                step(state, Effect::ValueChar, c)
            }
        }
        State::TagClose => match c {
            '>' => step(
                State::Text,
                Effect::EndTag {
                    self_closing: false,
                },
                c,
            ),
            c if c.is_whitespace() => step(State::TagClose, Effect::None, c),
            _ => step(State::TagClose, Effect::TagNameChar, c),
        },
        State::Comment { close } => {
            if rest.starts_with(close) {
                jump(State::Text, Effect::CommentEnd, close.len())
            } else {
                step(state, Effect::None, c)
            }
        }
        State::Script | State::Style => {
            if c == '<'
                && rest[1..].starts_with('/')
                && starts_with_ignore_case(&rest[2..], ctx.raw_tag)
            {
                step(State::TagOpen, Effect::EndRaw, c)
            } else {
                step(state, Effect::None, c)
            }
        }
    }
}

fn text(c: char, rest: &str, ctx: &Context) -> Transition {
    for &(open, close) in ctx.dialect.comments {
        if opens_block(rest, open) {
            return jump(State::Comment { close }, Effect::CommentStart, open.len());
        }
    }

    for &(open, close) in ctx.dialect.interpolations {
        if rest.starts_with(open) {
            return match rest[open.len()..].find(close) {
                Some(end) => jump(
                    State::Text,
                    Effect::Interpolation { open, close },
                    open.len() + end + close.len(),
                ),
                None => step(State::Text, Effect::TextChar, c),
            };
        }
    }

    if c == '<' {
        let next = rest[1..].chars().next();
        if matches!(next, Some(n) if n.is_alphabetic() || n == '/' || n == '!') {
            return step(State::TagOpen, Effect::TagStart, c);
        }
    }

    step(State::Text, Effect::TextChar, c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parsers::markup::{BLADE, VUE};
    use pretty_assertions::assert_eq;

    fn ctx<'a>(dialect: &'a Dialect, tag_name: &'a str) -> Context<'a> {
        Context {
            dialect,
            tag_name,
            closing_tag: false,
            raw_tag: "",
        }
    }

    #[test]
    fn test_text_enters_tag_only_before_a_name() {
        let c = ctx(&VUE, "");
        assert_eq!(transition(State::Text, '<', "<div>", &c).state, State::TagOpen);
        assert_eq!(transition(State::Text, '<', "< 3", &c).state, State::Text);
        assert_eq!(transition(State::Text, '<', "</p>", &c).state, State::TagOpen);
    }

    #[test]
    fn test_comment_is_consumed_as_a_block() {
        let c = ctx(&VUE, "");
        let t = transition(State::Text, '<', "<!-- note -->", &c);
        assert_eq!(t.state, State::Comment { close: "-->" });
        assert_eq!(t.consumed, 4);

        let t = transition(State::Comment { close: "-->" }, '-', "-->rest", &c);
        assert_eq!(t.state, State::Text);
        assert_eq!(t.consumed, 3);
    }

    #[test]
    fn test_interpolation_consumed_whole() {
        let c = ctx(&VUE, "");
        let t = transition(State::Text, '{', "{{ a < b }} tail", &c);
        assert_eq!(t.consumed, "{{ a < b }}".len());
        assert!(matches!(t.effect, Effect::Interpolation { .. }));

        let t = transition(State::Text, '{', "{{ unterminated", &c);
        assert_eq!(t.effect, Effect::TextChar);
    }

    #[test]
    fn test_blade_comment_wins_over_echo() {
        let c = ctx(&BLADE, "");
        let t = transition(State::Text, '{', "{{-- hidden --}}", &c);
        assert_eq!(t.state, State::Comment { close: "--}}" });

        let t = transition(State::Text, '@', "@php\n$x = 1;\n@endphp", &c);
        assert_eq!(t.state, State::Comment { close: "@endphp" });

        let t = transition(State::Text, '@', "@php($x = 1)", &c);
        assert_eq!(t.state, State::Text);
    }

    #[test]
    fn test_open_script_tag_enters_raw_state() {
        let c = ctx(&VUE, "script");
        let t = transition(State::TagSpace, '>', ">const a = 1", &c);
        assert_eq!(t.state, State::Script);

        let raw = Context {
            raw_tag: "script",
            ..c
        };
        let t = transition(State::Script, '<', "</SCRIPT>", &raw);
        assert_eq!(t.state, State::TagOpen);
        assert_eq!(t.effect, Effect::EndRaw);
        let t = transition(State::Script, '<', "<b>", &raw);
        assert_eq!(t.state, State::Script);
    }

    #[test]
    fn test_self_closing_tag() {
        let c = ctx(&VUE, "img");
        let t = transition(State::TagSpace, '/', "/>", &c);
        assert_eq!(t.effect, Effect::EndTag { self_closing: true });
        assert_eq!(t.consumed, 2);
    }

    #[test]
    fn test_quoted_value_ends_on_matching_quote() {
        let c = ctx(&VUE, "a");
        let state = State::AttrValue { quote: Some('"') };
        assert_eq!(transition(state, '\'', "'x\"", &c).effect, Effect::ValueChar);
        assert_eq!(transition(state, '"', "\"", &c).effect, Effect::EndAttrValue);
    }
}
