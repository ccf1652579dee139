//! Stage 1 — filler removal. Spec §4.1.1.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Words that are never removed even if they also appear in a filler list.
pub const PROTECTED_WORDS: &[&str] = &["no", "yes", "ok", "okay", "sure", "right", "wrong", "maybe"];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Remove the company name (whole-word), strip a single leading greeting,
/// then remove filler phrases. `fillers` is the already-merged union of
/// {default, template, company, category} fillers (spec §4.1: "the union
/// of ... de-duplicated, sorted by length descending").
pub fn remove_fillers(raw: &str, company_name: Option<&str>, fillers: &[String], greetings: &[String]) -> String {
    let mut text = raw.to_lowercase().trim().to_string();

    if let Some(name) = company_name {
        let name = name.to_lowercase();
        if !name.is_empty() {
            text = remove_whole_word(&text, &name);
        }
    }

    text = strip_leading_greeting(&text, greetings);

    let mut sorted_fillers: Vec<&String> = fillers.iter().collect();
    sorted_fillers.sort_by(|a, b| b.len().cmp(&a.len()));
    let mut seen = HashSet::new();
    for filler in sorted_fillers {
        let normalized = filler.to_lowercase();
        if !seen.insert(normalized.clone()) {
            continue;
        }
        if PROTECTED_WORDS.contains(&normalized.as_str()) {
            continue;
        }
        text = if normalized.contains(' ') {
            text.replace(&normalized, " ")
        } else {
            remove_whole_word(&text, &normalized)
        };
    }

    collapse_whitespace(&text)
}

fn strip_leading_greeting(text: &str, greetings: &[String]) -> String {
    let mut longest: Option<&str> = None;
    for greeting in greetings {
        let g = greeting.to_lowercase();
        if text.starts_with(&g) {
            let boundary_ok = text
                .as_bytes()
                .get(g.len())
                .map(|c| !(*c as char).is_alphanumeric())
                .unwrap_or(true);
            if boundary_ok && longest.map(|l| g.len() > l.len()).unwrap_or(true) {
                longest = Some(greeting.as_str());
            }
        }
    }
    match longest {
        Some(g) => text[g.len()..].trim_start_matches(|c: char| !c.is_alphanumeric() && c != '\'').to_string(),
        None => text.to_string(),
    }
}

fn remove_whole_word(text: &str, word: &str) -> String {
    let escaped = regex::escape(word);
    let pattern = format!(r"\b{escaped}\b");
    match Regex::new(&pattern) {
        Ok(re) => re.replace_all(text, " ").to_string(),
        Err(_) => text.to_string(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").to_string()
}
