use std::collections::HashMap;

use lazy_static::lazy_static;
use occam_domain::Intent;
use regex::{Regex, RegexBuilder};

lazy_static! {
    static ref DOUBLE_QUOTED: Regex = Regex::new(r#""([^"]*)""#).unwrap();
    static ref SINGLE_QUOTED: Regex = Regex::new(r"'([^']*)'").unwrap();
    static ref DECIMAL: Regex = Regex::new(r"\d+\.?\d*").unwrap();
    static ref KEYWORD_PATTERNS: HashMap<Intent, Vec<Regex>> = Intent::LADDER
        .into_iter()
        .map(|intent| {
            let patterns = intent
                .keywords()
                .iter()
                .map(|keyword| {
                    RegexBuilder::new(&regex::escape(keyword))
                        .case_insensitive(true)
                        .build()
                        .unwrap()
                })
                .collect();
            (intent, patterns)
        })
        .collect();
}

/// Returns the first double-quoted substring of `text`, falling back to the
/// first single-quoted one. Empty when nothing is quoted.
pub fn quoted_text(text: &str) -> &str {
    DOUBLE_QUOTED
        .captures(text)
        .or_else(|| SINGLE_QUOTED.captures(text))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .unwrap_or_default()
}

/// Returns the text following the first of the `intent`'s keywords found in
/// `text` (compared case-insensitively), trimmed and with surrounding quotes
/// removed. Empty when no keyword occurs.
pub fn text_after_keyword(text: &str, intent: Intent) -> String {
    KEYWORD_PATTERNS
        .get(&intent)
        .into_iter()
        .flatten()
        .find_map(|pattern| {
            let found = pattern.find(text)?;
            Some(
                text[found.end()..]
                    .trim()
                    .trim_matches('"')
                    .trim_matches('\'')
                    .to_string(),
            )
        })
        .unwrap_or_default()
}

/// The expected fragment of a criterion: quoted text when present, otherwise
/// whatever follows one of the `intent`'s keywords.
pub fn expected_fragment(criterion: &str, intent: Intent) -> String {
    match quoted_text(criterion) {
        "" => text_after_keyword(criterion, intent),
        quoted => quoted.to_string(),
    }
}

/// Parses the first unsigned decimal number in `text`.
pub fn first_number(text: &str) -> Option<f64> {
    DECIMAL
        .find(text)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// The first `limit` characters of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
