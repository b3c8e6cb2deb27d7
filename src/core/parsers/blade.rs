use crate::core::data::ParseResult;

use super::markup::{self, BLADE};
use super::{ExtractOptions, SyntaxParser};

/// Blade-like server templates. `{{ }}`/`{!! !!}` echoes are stripped,
/// `{{-- --}}` comments and `@php` blocks are skipped, and text containing
/// `@directive` tokens is dropped.
#[derive(Debug, Clone, Default)]
pub struct BladeParser {
    options: ExtractOptions,
}

impl BladeParser {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }
}

impl SyntaxParser for BladeParser {
    fn parse(&self, content: &str) -> ParseResult {
        markup::extract(content, &BLADE, &self.options)
    }
}
