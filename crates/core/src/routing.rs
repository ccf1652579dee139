//! RoutedTurn — the exposed result of `Router::route`. See spec §3
//! ("RoutedTurn") and §4.3.

use crate::pattern::Pattern;
use crate::template::Scenario;
use crate::trace::TraceEnvelope;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    /// Exact-match bypass or an otherwise-unscored short circuit.
    Bypass,
    Tier1,
    Tier2,
    Tier3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutedTurn {
    pub tier: Tier,
    pub matched: bool,
    pub scenario: Option<Scenario>,
    pub confidence: f64,
    pub reply: Option<String>,
    pub patterns_learned: Vec<Pattern>,
    pub cost: CostBreakdown,
    pub stage_timings_micros: HashMap<String, u64>,
    pub trace: TraceEnvelope,
    pub selection_reason: SelectionReason,
    pub error: Option<ErrorKind>,
}

impl RoutedTurn {
    pub fn no_match(trace: TraceEnvelope, reason: SelectionReason) -> Self {
        Self {
            tier: Tier::Bypass,
            matched: false,
            scenario: None,
            confidence: 0.0,
            reply: None,
            patterns_learned: Vec::new(),
            cost: CostBreakdown::default(),
            stage_timings_micros: HashMap::new(),
            trace,
            selection_reason: reason,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub llm_calls: u32,
    pub llm_tokens: u64,
    pub llm_cost: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SelectionReason {
    ExactMatchBypass,
    Tier1Accepted,
    Tier2Accepted,
    Tier2ForcedByOptimizer,
    Tier2CachedByOptimizer,
    Tier3Accepted,
    NoEligibleScenarios,
    AllTiersMissed,
    PreconditionFailed(String),
    BudgetExhausted,
    Other(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ErrorKind {
    InputInvalid,
    LlmUnavailable,
    BudgetExhausted,
    NoAcceptableScenario,
    PreconditionFailed,
    WritebackConflict,
    Fatal,
}
