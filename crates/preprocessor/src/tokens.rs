//! Stage 4 — tokenization and token expansion. Spec §4.1.4.

use receptionist_core::ContextPattern;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Split into words of alphanumeric + apostrophe characters, length > 2,
/// with filler words removed. Matches the invariant that
/// `original_tokens ⊆ expanded_tokens`.
pub fn tokenize(text: &str, fillers: &HashSet<String>) -> Vec<String> {
    text.unicode_words()
        .map(|w| w.to_string())
        .filter(|w| w.chars().all(|c| c.is_alphanumeric() || c == '\''))
        .filter(|w| w.chars().count() > 2)
        .filter(|w| !fillers.contains(&w.to_lowercase()))
        .collect()
}

/// Expand `original_tokens` with synonym-canonical forms and context-pattern
/// component tokens. Context patterns are tried in descending priority
/// order and fire when every word in `pattern.pattern` is present in the
/// token set accumulated so far. Returns the expanded token list (original
/// tokens first, in order, followed by additions) and a trace map from the
/// contributing source to the tokens it added.
pub fn expand_tokens(
    original_tokens: &[String],
    synonyms: &HashMap<String, Vec<String>>,
    context_patterns: &[ContextPattern],
) -> (Vec<String>, HashMap<String, Vec<String>>) {
    let mut expanded: Vec<String> = original_tokens.to_vec();
    let mut present: HashSet<String> = original_tokens.iter().map(|t| t.to_lowercase()).collect();
    let mut expansion_map: HashMap<String, Vec<String>> = HashMap::new();

    for (canonical, aliases) in synonyms {
        let Some(matched_alias) = aliases.iter().find(|a| present.contains(&a.to_lowercase())) else {
            continue;
        };
        if present.insert(canonical.to_lowercase()) {
            expanded.push(canonical.clone());
            expansion_map
                .entry(matched_alias.clone())
                .or_default()
                .push(canonical.clone());
        }
    }

    let mut patterns: Vec<&ContextPattern> = context_patterns.iter().collect();
    patterns.sort_by(|a, b| b.priority.cmp(&a.priority));

    for pattern in patterns {
        let all_present = pattern
            .pattern
            .iter()
            .all(|word| present.contains(&word.to_lowercase()));
        if !all_present {
            continue;
        }
        let mut added = Vec::new();
        if present.insert(pattern.component.to_lowercase()) {
            expanded.push(pattern.component.clone());
            added.push(pattern.component.clone());
        }
        for token in &pattern.context_tokens {
            if present.insert(token.to_lowercase()) {
                expanded.push(token.clone());
                added.push(token.clone());
            }
        }
        if !added.is_empty() {
            expansion_map.insert(pattern.component.clone(), added);
        }
    }

    (expanded, expansion_map)
}
