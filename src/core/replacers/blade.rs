use crate::core::keymap::KeyMap;
use crate::core::parsers::ExtractOptions;
use crate::core::parsers::markup::BLADE;

use super::markup::{CallStyle, replace_markup};
use super::{ReplaceResult, SyntaxReplacer};

/// Blade-like templates: text becomes `{{ __('Key') }}`, attributes
/// `attr="{{ __('Key') }}"`. Script, style and `@php` blocks stay untouched.
#[derive(Debug, Clone, Default)]
pub struct BladeReplacer {
    options: ExtractOptions,
}

impl BladeReplacer {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }
}

impl SyntaxReplacer for BladeReplacer {
    fn replace(&self, content: &str, keymap: &KeyMap, namespace: &str) -> ReplaceResult {
        let output = replace_markup(
            content,
            &BLADE,
            CallStyle::Blade,
            keymap,
            namespace,
            &self.options,
        );
        ReplaceResult::between(content, output)
    }
}
