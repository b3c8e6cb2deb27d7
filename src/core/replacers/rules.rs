//! Ordered regex substitution passes.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

/// One substitution pass. A match is rewritten only when `guard` accepts it and
/// `rewrite` produces a replacement; otherwise the matched text is kept.
pub struct Rule<C> {
    pub name: &'static str,
    pub pattern: &'static LazyLock<Regex>,
    pub guard: fn(&C, &Captures) -> bool,
    pub rewrite: fn(&C, &Captures) -> Option<String>,
}

/// Apply `rules` left to right. Each pass sees the output of the previous one,
/// with a fresh context built by `context` for that text.
pub fn apply_rules<C>(content: &str, rules: &[Rule<C>], context: impl Fn(&str) -> C) -> String {
    rules.iter().fold(content.to_string(), |current, rule| {
        let ctx = context(&current);
        let mut rewritten = 0usize;
        let next = rule.pattern.replace_all(&current, |caps: &Captures| {
            let replacement = if (rule.guard)(&ctx, caps) {
                (rule.rewrite)(&ctx, caps)
            } else {
                None
            };
            match replacement {
                Some(text) => {
                    rewritten += 1;
                    text
                }
                None => caps[0].to_string(),
            }
        });
        let next = next.into_owned();
        if rewritten > 0 {
            trace!(rule = rule.name, rewritten, "applied rule");
        }
        next
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]+").unwrap());
    static SHOUT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]+").unwrap());

    fn not_skipped(skip: &&str, caps: &Captures) -> bool {
        &caps[0] != *skip
    }

    fn upper(_: &&str, caps: &Captures) -> Option<String> {
        Some(caps[0].to_uppercase())
    }

    fn exclaim(_: &&str, caps: &Captures) -> Option<String> {
        Some(format!("{}!", &caps[0]))
    }

    #[test]
    fn test_rules_run_in_order_over_previous_output() {
        let rules = [
            Rule {
                name: "upper",
                pattern: &WORD,
                guard: not_skipped,
                rewrite: upper,
            },
            Rule {
                name: "exclaim",
                pattern: &SHOUT,
                guard: not_skipped,
                rewrite: exclaim,
            },
        ];
        let output = apply_rules("save the day", &rules, |_| "the");
        assert_eq!(output, "SAVE! the DAY!");
    }
}
