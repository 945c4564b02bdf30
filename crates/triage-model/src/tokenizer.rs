//! Tokenization and n-gram extraction for complaint text.
//!
//! Tokens are lowercase unicode words with punctuation stripped and a
//! minimum length of two characters. No stop-word list: complaints are
//! short and the IDF weighting already discounts ubiquitous words.

use unicode_segmentation::UnicodeSegmentation;

/// Minimum token length to consider (shorter tokens are filtered).
const MIN_TOKEN_LENGTH: usize = 2;

/// Tokenizes text into a list of normalized tokens.
///
/// Processing steps:
/// 1. Split on Unicode word boundaries
/// 2. Convert to lowercase
/// 3. Remove non-alphanumeric characters
/// 4. Filter by minimum length
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words()
        .map(normalize_token)
        .filter(|token| token.len() >= MIN_TOKEN_LENGTH)
        .collect()
}

/// Normalizes a single token by lowercasing and removing non-alphanumeric
/// characters.
fn normalize_token(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase()
}

/// Expands tokens into vocabulary terms: all n-grams from 1 up to
/// `max_n`, bigrams and above joined with a single space.
///
/// `ngram_terms(&["train", "late"], 2)` yields `["train", "late",
/// "train late"]`.
pub fn ngram_terms(tokens: &[String], max_n: usize) -> Vec<String> {
    let mut terms = Vec::new();
    for n in 1..=max_n.max(1) {
        if n > tokens.len() {
            break;
        }
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}
