//! Keyword matching for the tone priority ladder. Grounded on the teacher's
//! `SignalDetector::detect`'s `add_matches` idiom
//! (`core/src/personalization/signals.rs`): a flat keyword list checked by
//! case-insensitive substring containment, no tokenizer involved.

/// Trade-specific keywords are merged *over* the global list (additive, not
/// a replacement) before detection, per spec §4.5.
pub fn merge_keywords<'a>(global: &'a [String], trade_extra: &'a [String]) -> Vec<&'a str> {
    global
        .iter()
        .chain(trade_extra.iter())
        .map(String::as_str)
        .collect()
}

/// True if any keyword occurs as a case-insensitive substring of `text`.
pub fn contains_any(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| !kw.is_empty() && text_lower.contains(&kw.to_lowercase()))
}
