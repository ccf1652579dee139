//! Stage 2 — vocabulary corrections. Spec §4.1.2.

use receptionist_core::{Correction, MatchMode};
use regex::Regex;

/// Apply `corrections` in ascending priority order. EXACT corrections only
/// fire on a whole-word match; CONTAINS corrections fire on any substring.
/// The replacement's leading character inherits the matched text's
/// capitalization (spec §4.1: "preserve leading-char capitalization").
pub fn apply_corrections(text: &str, corrections: &[Correction]) -> String {
    let mut ordered: Vec<&Correction> = corrections.iter().collect();
    ordered.sort_by_key(|c| c.priority);

    let mut out = text.to_string();
    for correction in ordered {
        out = apply_one(&out, correction);
    }
    out
}

fn apply_one(text: &str, correction: &Correction) -> String {
    match correction.mode {
        MatchMode::Exact => {
            let escaped = regex::escape(&correction.from);
            let pattern = format!(r"(?i)\b{escaped}\b");
            replace_preserving_case(text, &pattern, &correction.to)
        }
        MatchMode::Contains => {
            let escaped = regex::escape(&correction.from);
            let pattern = format!(r"(?i){escaped}");
            replace_preserving_case(text, &pattern, &correction.to)
        }
    }
}

fn replace_preserving_case(text: &str, pattern: &str, to: &str) -> String {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(_) => return text.to_string(),
    };
    re.replace_all(text, |caps: &regex::Captures| {
        let matched = &caps[0];
        let starts_upper = matched.chars().next().map(|c| c.is_uppercase()).unwrap_or(false);
        if starts_upper {
            let mut chars = to.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => to.to_string(),
            }
        } else {
            to.to_string()
        }
    })
    .to_string()
}
