//! Internal helpers for text normalization and validation.
//!
//! These utilities are **not** part of the public API.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{EngineError, ResultEngine};

/// Folds text for matching: strips accents, lowercases, and collapses every
/// run of non-alphanumeric characters into a single space.
///
/// Returns an empty string when nothing alphanumeric remains.
pub(crate) fn normalize_text(input: &str) -> String {
    let mut out = String::new();
    let mut prev_space = false;
    for ch in input.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    out.trim_end().to_string()
}

/// Trims `input` and collapses inner whitespace; rejects blank values.
pub(crate) fn normalize_label(input: &str, what: &str) -> ResultEngine<String> {
    let label = input.split_whitespace().collect::<Vec<_>>().join(" ");
    if label.is_empty() {
        return Err(EngineError::InvalidName(format!("{what} must not be empty")));
    }
    Ok(label)
}
