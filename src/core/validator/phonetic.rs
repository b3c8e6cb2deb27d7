//! Per-word English phonetic heuristic.

use super::tables::{
    ALLOWED_CLUSTERS, ALTERNATION_RATIO, BIGRAM_MIN_WORD_LEN, COMMON_BIGRAMS, MAX_PLAIN_RUN,
    SEMI_VOWEL, SHORT_WORDS, VOWELS,
};

fn is_vowel_at(chars: &[char], index: usize) -> bool {
    let c = chars[index];
    VOWELS.contains(&c) || (c == SEMI_VOWEL && index > 0)
}

/// Returns true if a single word reads like English.
///
/// `word` may contain punctuation; only its letters are considered. Words containing
/// non-ASCII letters always pass because the heuristic cannot judge other scripts.
pub fn has_english_phonetic_pattern(word: &str) -> bool {
    if word.chars().any(|c| c.is_alphabetic() && !c.is_ascii()) {
        return true;
    }

    let letters: String = word
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if letters.is_empty() {
        return false;
    }
    if letters.len() <= 2 {
        return SHORT_WORDS.contains(&letters.as_str());
    }

    let chars: Vec<char> = letters.chars().collect();

    let vowels: Vec<bool> = (0..chars.len()).map(|i| is_vowel_at(&chars, i)).collect();

    if !vowels.contains(&true) {
        return false;
    }

    if has_disallowed_run(&chars, &vowels) {
        return false;
    }

    let alternations = vowels.windows(2).filter(|pair| pair[0] != pair[1]).count();
    let ratio = alternations as f64 / (chars.len() - 1) as f64;
    if ratio < ALTERNATION_RATIO {
        return false;
    }

    if chars.len() > BIGRAM_MIN_WORD_LEN
        && !COMMON_BIGRAMS.iter().any(|bigram| letters.contains(bigram))
    {
        return false;
    }

    true
}

/// A run of `MAX_PLAIN_RUN` or more consonants (or vowels) is only allowed
/// when it contains one of the allow-listed clusters.
fn has_disallowed_run(chars: &[char], vowels: &[bool]) -> bool {
    let mut start = 0;
    while start < chars.len() {
        let vowel = vowels[start];
        let mut end = start + 1;
        while end < chars.len() && vowels[end] == vowel {
            end += 1;
        }
        if end - start >= MAX_PLAIN_RUN {
            let run: String = chars[start..end].iter().collect();
            if !ALLOWED_CLUSTERS.iter().any(|cluster| run.contains(cluster)) {
                return true;
            }
        }
        start = end;
    }
    false
}
