//! Stage 3 — synonym normalization. Spec §4.1.3.

use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Merge the template's global synonym map with the per-category maps for
/// the given categories, appending (and de-duping) category aliases onto
/// the template's alias list for the same canonical term (spec §4.1:
/// "union of template + category synonym maps with category aliases
/// appended/deduped").
pub fn merge_synonym_maps(
    template_synonyms: &HashMap<String, Vec<String>>,
    category_synonyms: &HashMap<String, HashMap<String, Vec<String>>>,
    categories: &[String],
) -> HashMap<String, Vec<String>> {
    let mut merged = template_synonyms.clone();

    for category in categories {
        let Some(extra) = category_synonyms.get(category) else {
            continue;
        };
        for (canonical, aliases) in extra {
            let entry = merged.entry(canonical.clone()).or_default();
            let mut seen: HashSet<String> = entry.iter().map(|a| a.to_lowercase()).collect();
            for alias in aliases {
                if seen.insert(alias.to_lowercase()) {
                    entry.push(alias.clone());
                }
            }
        }
    }

    merged
}

/// Replace every alias occurrence (word boundary, case-insensitive) with
/// its canonical term. Longer aliases are tried first so multi-word
/// aliases aren't partially shadowed by shorter ones.
pub fn apply_synonyms(text: &str, synonyms: &HashMap<String, Vec<String>>) -> String {
    let mut pairs: Vec<(&str, &str)> = Vec::new();
    for (canonical, aliases) in synonyms {
        for alias in aliases {
            pairs.push((alias.as_str(), canonical.as_str()));
        }
    }
    pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = text.to_string();
    for (alias, canonical) in pairs {
        if alias.eq_ignore_ascii_case(canonical) {
            continue;
        }
        let escaped = regex::escape(alias);
        let pattern = format!(r"(?i)\b{escaped}\b");
        if let Ok(re) = Regex::new(&pattern) {
            out = re.replace_all(&out, canonical).to_string();
        }
    }
    out
}
