use std::ops::Range;

use crate::core::keymap::KeyMap;
use crate::core::parsers::markup::state::RawKind;
use crate::core::parsers::markup::{VUE, scan};
use crate::core::parsers::{ExtractOptions, script_dialect_for_lang};

use super::markup::{CallStyle, replace_markup};
use super::script::ScriptReplacer;
use super::{ReplaceResult, SyntaxReplacer};

/// Vue single-file components: the `<template>` region gets the markup passes,
/// each `<script>` block goes through the script replacer.
#[derive(Debug, Clone, Default)]
pub struct VueReplacer {
    options: ExtractOptions,
}

impl VueReplacer {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    fn replace_template(&self, content: &str, keymap: &KeyMap, namespace: &str) -> String {
        let Some(region) = template_region(content) else {
            return content.to_string();
        };
        let rewritten = replace_markup(
            &content[region.clone()],
            &VUE,
            CallStyle::Vue,
            keymap,
            namespace,
            &self.options,
        );
        let mut output = String::with_capacity(content.len() + rewritten.len() - region.len());
        output.push_str(&content[..region.start]);
        output.push_str(&rewritten);
        output.push_str(&content[region.end..]);
        output
    }

    fn replace_scripts(&self, content: &str, keymap: &KeyMap, namespace: &str) -> String {
        let doc = scan(content, &VUE);
        let mut output = content.to_string();

        // Back to front so earlier spans stay valid.
        for block in doc.raw_blocks.iter().rev() {
            if block.kind != RawKind::Script {
                continue;
            }
            let lang = doc
                .tags
                .iter()
                .find(|tag| tag.span.end == block.span.start)
                .and_then(|tag| tag.attributes.iter().find(|attr| attr.name == "lang"))
                .and_then(|attr| attr.value.as_ref())
                .map(|value| value.text.as_str());
            let replacer = ScriptReplacer::new(script_dialect_for_lang(lang), self.options.clone());
            if let Some(rewritten) =
                replacer.rewrite(&content[block.span.clone()], keymap, namespace)
            {
                output.replace_range(block.span.clone(), &rewritten);
            }
        }
        output
    }
}

/// From the first `<template` to the end of the last `</template>`.
fn template_region(content: &str) -> Option<Range<usize>> {
    let start = content.find("<template")?;
    let close = content.rfind("</template>")?;
    let end = close + "</template>".len();
    (close > start).then_some(start..end)
}

impl SyntaxReplacer for VueReplacer {
    fn replace(&self, content: &str, keymap: &KeyMap, namespace: &str) -> ReplaceResult {
        let templated = self.replace_template(content, keymap, namespace);
        let output = self.replace_scripts(&templated, keymap, namespace);
        ReplaceResult::between(content, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::replacers::test_support::keymap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_welcome_home() {
        let keymap = keymap(json!({ "App": { "heading": { "welcome_home": "Welcome Home" } } }));
        let replacer = VueReplacer::default();

        let once = replacer.replace("<template><h1>Welcome Home</h1></template>", &keymap, "App");
        assert_eq!(
            once.content,
            "<template><h1>{{ $t('App.heading.welcome_home') }}</h1></template>"
        );
        assert_eq!(once.change_count, 1);

        let twice = replacer.replace(&once.content, &keymap, "App");
        assert_eq!(twice.content, once.content);
        assert_eq!(twice.change_count, 0);
    }

    #[test]
    fn test_single_file_component() {
        let keymap = keymap(json!({
            "Billing": {
                "Invoice": {
                    "heading": { "invoice_overview": "Invoice Overview" },
                    "text": { "invoice_sent_to_customer": "Invoice sent to customer" }
                }
            }
        }));
        let input = r#"<template>
  <div>
    <h2>Invoice Overview</h2>
  </div>
</template>

<script setup lang="ts">
const sent = 'Invoice sent to customer';
</script>

<style scoped>
h2::before { content: "Invoice Overview"; }
</style>
"#;
        let result = VueReplacer::default().replace(input, &keymap, "Billing.Invoice");
        assert_eq!(
            result.content,
            r#"<template>
  <div>
    <h2>{{ $t('Billing.Invoice.heading.invoice_overview') }}</h2>
  </div>
</template>

<script setup lang="ts">
const sent = t('Billing.Invoice.text.invoice_sent_to_customer');
</script>

<style scoped>
h2::before { content: "Invoice Overview"; }
</style>
"#
        );
        assert_eq!(result.change_count, 2);
    }

    #[test]
    fn test_without_template_only_scripts_change() {
        let keymap = keymap(json!({ "App": { "text": { "hello_there_friend": "Hello there friend" } } }));
        let input = "<script>\nexport default { data: () => ({ msg: \"Hello there friend\" }) }\n</script>\n";
        let result = VueReplacer::default().replace(input, &keymap, "App");
        assert_eq!(
            result.content,
            "<script>\nexport default { data: () => ({ msg: t('App.text.hello_there_friend') }) }\n</script>\n"
        );
    }

    #[test]
    fn test_mixed_component_second_pass_is_a_no_op() {
        let keymap = keymap(json!({
            "Billing": {
                "heading": { "invoice_overview": "Invoice Overview" },
                "text": {
                    "welcome_back_name": "Welcome back, {name}!",
                    "your_invoices_are_ready": "Your invoices are ready",
                    "invoice_sent_to_customer": "Invoice sent to customer"
                },
                "placeholder": { "search_invoices": "Search invoices" },
                "title": { "open_the_invoice": "Open the invoice" },
                "label": { "billing_email_address": "Billing email address" }
            }
        }));
        let input = r#"<template>
  <section>
    <h2>Invoice Overview</h2>
    <p>Welcome back, {{ user.name }}!</p>
    <input placeholder="Search invoices" />
    <span>{{ 'Your invoices are ready' }}</span>
    <a :title="'Open the invoice'" href="/billing">#</a>
    <field v-model:label="'Billing email address'" />
  </section>
</template>

<script setup lang="ts">
const sent = 'Invoice sent to customer';
</script>
"#;
        let replacer = VueReplacer::default();

        let once = replacer.replace(input, &keymap, "Billing");
        for expected in [
            "{{ $t('Billing.heading.invoice_overview') }}",
            "{{ $t('Billing.text.welcome_back_name', { name: user.name }) }}",
            r#":placeholder="$t('Billing.placeholder.search_invoices')""#,
            "{{ $t('Billing.text.your_invoices_are_ready') }}",
            r#":title="$t('Billing.title.open_the_invoice')""#,
            r#":label="$t('Billing.label.billing_email_address')""#,
            "const sent = t('Billing.text.invoice_sent_to_customer');",
        ] {
            assert!(once.content.contains(expected), "missing {expected}");
        }
        assert_eq!(once.change_count, 7);

        let twice = replacer.replace(&once.content, &keymap, "Billing");
        assert_eq!(twice.content, once.content);
        assert_eq!(twice.change_count, 0);
    }
}
