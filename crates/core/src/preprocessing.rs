//! PreprocessorResult — the immutable output of C1. See spec §3
//! ("PreprocessorResult") and §4.1.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessorResult {
    /// Untouched input. Invariant: never mutated (spec §3, §8).
    pub raw_text: String,
    pub after_fillers: String,
    pub after_vocabulary: String,
    pub after_synonyms: String,
    /// Final normalized text after all five stages.
    pub normalized: String,
    /// Ordered content tokens from the normalized text.
    pub original_tokens: Vec<String>,
    /// Superset of `original_tokens` plus synonym/context-pattern
    /// expansions, de-duplicated. Invariant: `original_tokens ⊆ expanded_tokens`.
    pub expanded_tokens: Vec<String>,
    /// source token -> tokens added because of it.
    pub expansion_map: HashMap<String, Vec<String>>,
    pub entities: Entities,
    pub stage_timings: Vec<StageTiming>,
    pub quality: QualityVerdict,
}

impl PreprocessorResult {
    /// Invariant check used by property tests (spec §8: token monotonicity).
    pub fn tokens_monotone(&self) -> bool {
        self.original_tokens
            .iter()
            .all(|t| self.expanded_tokens.contains(t))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entities {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Whether the name classification was validated by a NameDictionary
    /// collaborator (spec §4.1 stage 5) rather than guessed.
    pub name_validated: bool,
    pub custom: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageTiming {
    pub stage: String,
    pub micros: u64,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityVerdict {
    pub passed: bool,
    pub reason: String,
    pub confidence: f64,
    /// Advisory only: the router consults this to bias handling but never
    /// short-circuits on it (spec §4.1, §9).
    pub should_reprompt: bool,
}

impl QualityVerdict {
    pub fn ok(confidence: f64) -> Self {
        Self {
            passed: true,
            reason: "ok".to_string(),
            confidence,
            should_reprompt: false,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            passed: false,
            reason: reason.into(),
            confidence: 0.0,
            should_reprompt: true,
        }
    }
}
