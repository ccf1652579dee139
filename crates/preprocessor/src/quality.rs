//! Quality gate — advisory-only confidence signal on the normalized
//! utterance. Spec §4.1: "wordCount<2 fails, validWordRatio<0.5 fails,
//! common noise utterances pass with low confidence; failure sets
//! shouldReprompt but never blocks the pipeline."

use receptionist_core::QualityVerdict;

const COMMON_NOISE: &[&str] = &["thank you", "goodbye", "bye", "thanks"];

pub fn assess_quality(normalized: &str) -> QualityVerdict {
    let trimmed = normalized.trim().to_lowercase();
    if COMMON_NOISE.contains(&trimmed.as_str()) {
        return QualityVerdict::ok(0.3);
    }

    let words: Vec<&str> = normalized.split_whitespace().collect();
    if words.len() < 2 {
        return QualityVerdict::failed("too_few_words");
    }

    let valid = words
        .iter()
        .filter(|w| w.chars().count() > 1 && w.chars().all(|c| c.is_ascii_lowercase()))
        .count();
    let ratio = valid as f64 / words.len() as f64;
    if ratio < 0.5 {
        return QualityVerdict::failed("low_valid_word_ratio");
    }

    QualityVerdict::ok(1.0)
}
