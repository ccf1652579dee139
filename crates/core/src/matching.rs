//! MatchCandidate — a scored scenario. See spec §3 ("MatchCandidate") and
//! §4.2.

use crate::template::Scenario;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    pub scenario: Scenario,
    pub subscores: Subscores,
    /// Weighted sum of subscores plus intent/urgency bonuses and any
    /// dual-intent resolver multiplier, clamped to [0,1].
    pub score: f64,
    /// Equal to `score` unless the exact-match bypass fired, in which case
    /// both are pinned to 1.0.
    pub confidence: f64,
    pub blocked: bool,
    pub needs_clarifier: bool,
    pub clarifier_prompt: Option<String>,
    /// Set only by the exact-match bypass (spec §4.2); lets the router
    /// distinguish it from an ordinary Tier-1 accept that happens to score 1.0.
    pub is_exact_match: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Subscores {
    pub bm25: f64,
    pub semantic: f64,
    pub regex: f64,
    pub context: f64,
    pub intent_bonus: f64,
    pub urgency_bonus: f64,
}

/// NaN/∞ are always replaced by 0 before comparison (spec invariant).
pub fn sanitize_score(x: f64) -> f64 {
    if x.is_finite() {
        x.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
