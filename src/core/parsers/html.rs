use crate::core::data::ParseResult;

use super::markup::{self, HTML};
use super::{ExtractOptions, SyntaxParser};

/// Plain HTML and mustache-style templates (Handlebars, Nunjucks, Twig).
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    options: ExtractOptions,
}

impl HtmlParser {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }
}

impl SyntaxParser for HtmlParser {
    fn parse(&self, content: &str) -> ParseResult {
        markup::extract(content, &HTML, &self.options)
    }
}
