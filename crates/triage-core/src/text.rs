//! Text normalization for raw complaint text.
//!
//! Complaints arrive as free text copied from social media or web forms:
//! URLs, @-mentions, punctuation and inconsistent whitespace. `clean_text`
//! reduces that to plain alphanumeric words for the vectorizer, and
//! `extract_pnr` pulls the booking reference out of the raw (uncleaned)
//! text before the digits get separated from their context.

use regex::Regex;
use std::sync::LazyLock;

static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").unwrap());
static MENTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\w+").unwrap());
static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9\s]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static PNR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{10}\b").unwrap());

/// Normalizes raw complaint text.
///
/// Removes URL-like runs (`http` up to the next whitespace) and `@mention`
/// tokens, replaces every character outside `[A-Za-z0-9\s]` with a space,
/// collapses whitespace runs to a single space, and trims. Never fails;
/// input that is all noise yields an empty string.
///
/// Idempotent: applying it twice gives the same result as once.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    let text = URL.replace_all(raw, "");
    let text = MENTION.replace_all(&text, "");
    let text = NON_ALNUM.replace_all(&text, " ");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}

/// Extracts the first standalone 10-digit run from raw complaint text.
///
/// This is a heuristic for a PNR, not a validation: duplicate or malformed
/// booking references pass through silently, and callers must not assume
/// uniqueness or correctness. Runs longer or shorter than exactly 10
/// digits do not match.
#[must_use]
pub fn extract_pnr(raw: &str) -> Option<String> {
    PNR.find(raw).map(|m| m.as_str().to_string())
}
