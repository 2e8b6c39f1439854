//! Text normalisation shared by training and inference.
//!
//! Lower-cases the input, extracts `\w+` word tokens, keeps the purely
//! alphanumeric ones and replaces each with its Porter stem. The output is the
//! stems joined by single spaces. Both the vectorizer fit and every prediction
//! go through [`normalize`], so the two paths cannot drift apart.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

/// Normalise raw message text into a space-joined sequence of stems.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|token| token.as_str())
        .filter(|token| is_retained(token))
        .map(stem)
        .filter(|stemmed| !stemmed.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalise a batch of texts, preserving order.
pub fn normalize_all<S: AsRef<str>>(texts: &[S]) -> Vec<String> {
    texts.iter().map(|text| normalize(text.as_ref())).collect()
}

fn is_retained(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}

/// Stem to a fixed point so that normalising already-normalised text is a no-op.
///
/// Long chains of derivational suffixes need one pass per suffix, so the
/// pass budget grows with the token instead of being a fixed constant.
fn stem(token: &str) -> String {
    let mut current = token.to_string();
    for _ in 0..=2 * token.chars().count() {
        let next = STEMMER.stem(&current).into_owned();
        if next == current {
            break;
        }
        current = next;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_keeps_digits() {
        let out = normalize("Hello, WORLD!!! 123");
        assert_eq!(out, "hello world 123");
    }

    #[test]
    fn stems_inflections() {
        assert_eq!(normalize("running dogs"), "run dog");
    }

    #[test]
    fn drops_underscored_tokens() {
        assert_eq!(normalize("snake_case word"), "word");
    }

    #[test]
    fn stacked_suffixes_reach_a_fixed_point() {
        let word = format!("relation{}", "alization".repeat(6));
        let once = normalize(&word);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn punctuation_only_is_empty() {
        assert_eq!(normalize("!!!???...,,,"), "");
        assert_eq!(normalize(""), "");
    }
}
