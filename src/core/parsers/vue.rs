use crate::core::data::ParseResult;

use super::markup::{self, VUE};
use super::{ExtractOptions, SyntaxParser};

/// Vue single-file components: the markup machine over the whole file.
///
/// `<script>` and `<style>` contents are never extracted; script blocks are only
/// scanned for runtime calls.
#[derive(Debug, Clone, Default)]
pub struct VueParser {
    options: ExtractOptions,
}

impl VueParser {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }
}

impl SyntaxParser for VueParser {
    fn parse(&self, content: &str) -> ParseResult {
        markup::extract(content, &VUE, &self.options)
    }
}
