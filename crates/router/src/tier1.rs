//! Tier 1 — rule-based acceptance. Spec §4.3.

use receptionist_core::{ConversationContext, MatchCandidate, PreprocessorResult, Template};
use receptionist_matcher::{match_candidates, meets_min_confidence, preconditions_hold};

pub struct Tier1Outcome {
    pub candidates: Vec<MatchCandidate>,
    pub accepted: Option<MatchCandidate>,
}

pub fn run(
    result: &PreprocessorResult,
    template: &Template,
    context: &ConversationContext,
    language: &str,
    channel: receptionist_core::Channel,
) -> Tier1Outcome {
    let candidates = match_candidates(result, template, context, language, channel);

    let accepted = candidates
        .iter()
        .find(|c| {
            !c.blocked
                && !c.needs_clarifier
                && meets_min_confidence(&c.scenario, c.confidence, template.thresholds.tier1)
                && preconditions_hold(&c.scenario, context)
        })
        .cloned();

    Tier1Outcome { candidates, accepted }
}
