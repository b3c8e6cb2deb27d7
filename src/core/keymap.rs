//! Flat lookup table from `(namespace, kind, text)` to full translation keys.
//!
//! Built once from the default locale tree before a replacement batch and shared
//! read-only between workers. Two maps are filled in a single pass: `primary`
//! holds exact and `text`-kind entries, `commons_alias` holds the `Commons`
//! index over the same keys.

use std::collections::HashMap;

use tracing::trace;

use super::locale_tree::LocaleTree;
use super::naming::{COMMONS, is_common_short_text};

const FALLBACK_KIND: &str = "text";

#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    primary: HashMap<String, String>,
    commons_alias: HashMap<String, String>,
}

fn entry_key(namespace: &str, kind: &str, text: &str) -> String {
    format!("{namespace}|{kind}|{text}")
}

impl KeyMap {
    /// Flatten a locale tree. Leaves shallower than three segments cannot be split
    /// into namespace, kind and slug and are skipped. The first registration of an
    /// entry wins.
    pub fn build(tree: &LocaleTree) -> Self {
        let mut map = KeyMap::default();
        for (path, text) in tree.leaves() {
            let segments: Vec<&str> = path.split('.').collect();
            if segments.len() < 3 {
                continue;
            }
            let namespace = segments[..segments.len() - 2].join(".");
            let kind = segments[segments.len() - 2];
            map.register(&namespace, kind, text, &path);
        }
        map
    }

    fn register(&mut self, namespace: &str, kind: &str, text: &str, full_key: &str) {
        self.primary
            .entry(entry_key(namespace, kind, text))
            .or_insert_with(|| full_key.to_string());
        self.primary
            .entry(entry_key(namespace, FALLBACK_KIND, text))
            .or_insert_with(|| full_key.to_string());
        if is_common_short_text(text) {
            self.commons_alias
                .entry(entry_key(COMMONS, kind, text))
                .or_insert_with(|| full_key.to_string());
        }
    }

    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Resolve the key for a piece of text. Never invents keys: a miss is `None`.
    ///
    /// Common short text is looked up in `Commons` first, then in `namespace`.
    pub fn lookup(&self, namespace: &str, kind: &str, text: &str) -> Option<&str> {
        let text = text.trim();
        let preferred = if is_common_short_text(text) {
            COMMONS
        } else {
            namespace
        };

        let found = self
            .probe(preferred, kind, text)
            .or_else(|| self.probe(preferred, FALLBACK_KIND, text))
            .or_else(|| {
                if preferred == COMMONS && namespace != COMMONS {
                    self.probe(namespace, kind, text)
                        .or_else(|| self.probe(namespace, FALLBACK_KIND, text))
                } else {
                    None
                }
            });

        if found.is_none() {
            trace!(namespace, kind, text, "no key for text");
        }
        found
    }

    fn probe(&self, namespace: &str, kind: &str, text: &str) -> Option<&str> {
        let key = entry_key(namespace, kind, text);
        self.primary
            .get(&key)
            .or_else(|| self.commons_alias.get(&key))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn keymap(value: serde_json::Value) -> KeyMap {
        KeyMap::build(&LocaleTree::from_value(value).unwrap())
    }

    #[test]
    fn test_exact_and_text_kind_lookup() {
        let map = keymap(json!({
            "Billing": { "heading": { "invoice_overview": "Invoice Overview" } }
        }));
        assert_eq!(
            map.lookup("Billing", "heading", "Invoice Overview"),
            Some("Billing.heading.invoice_overview")
        );
        assert_eq!(
            map.lookup("Billing", "text", "Invoice Overview"),
            Some("Billing.heading.invoice_overview")
        );
        // any kind falls back to the namespace's text alias
        assert_eq!(
            map.lookup("Billing", "button", "Invoice Overview"),
            Some("Billing.heading.invoice_overview")
        );
        assert_eq!(map.lookup("Billing", "heading", "Payment History"), None);
    }

    #[test]
    fn test_commons_alias() {
        let map = keymap(json!({ "Billing": { "button": { "save": "Save" } } }));
        assert_eq!(map.lookup("Commons", "button", "Save"), Some("Billing.button.save"));
        assert_eq!(map.lookup("Settings", "button", "Save"), Some("Billing.button.save"));
    }

    #[test]
    fn test_placeholder_text_gets_commons_alias() {
        let map = keymap(json!({ "Billing": { "text": { "count_items": "{count} items" } } }));
        assert_eq!(
            map.lookup("Commons", "text", "{count} items"),
            Some("Billing.text.count_items")
        );
    }

    #[test]
    fn test_commons_key_preferred_over_namespace() {
        let map = keymap(json!({
            "Commons": { "button": { "cancel": "Cancel" } },
            "Billing": { "button": { "cancel": "Cancel" } }
        }));
        assert_eq!(map.lookup("Billing", "button", "Cancel"), Some("Commons.button.cancel"));
    }

    #[test]
    fn test_nested_namespace_and_shallow_leaves() {
        let map = keymap(json!({
            "Billing": {
                "Invoice": { "text": { "due_soon": "Your invoice is due soon." } },
                "flat": "Ignored"
            },
            "top": "Ignored"
        }));
        assert_eq!(
            map.lookup("Billing.Invoice", "text", "Your invoice is due soon."),
            Some("Billing.Invoice.text.due_soon")
        );
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_first_registration_wins() {
        let map = keymap(json!({
            "App": { "text": { "hello": "Hello there, friend.", "hello_2": "Hello there, friend." } }
        }));
        assert_eq!(
            map.lookup("App", "text", "Hello there, friend."),
            Some("App.text.hello")
        );
    }

    #[test]
    fn test_miss_returns_none() {
        let map = KeyMap::default();
        assert!(map.is_empty());
        assert_eq!(map.lookup("App", "text", "Anything at all."), None);
    }
}
