use crate::core::keymap::KeyMap;
use crate::core::parsers::ExtractOptions;
use crate::core::parsers::markup::HTML;

use super::markup::{CallStyle, replace_markup};
use super::{ReplaceResult, SyntaxReplacer};

/// Plain HTML and mustache-style templates, rewritten to `{{ t('Key') }}`.
#[derive(Debug, Clone, Default)]
pub struct HtmlReplacer {
    options: ExtractOptions,
}

impl HtmlReplacer {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }
}

impl SyntaxReplacer for HtmlReplacer {
    fn replace(&self, content: &str, keymap: &KeyMap, namespace: &str) -> ReplaceResult {
        let output = replace_markup(
            content,
            &HTML,
            CallStyle::Generic,
            keymap,
            namespace,
            &self.options,
        );
        ReplaceResult::between(content, output)
    }
}
