//! Tier 2 — semantic-boosted re-scoring of the top Tier-1 candidate.
//! Spec §4.3.

use receptionist_core::{sanitize_score, ConversationContext, MatchCandidate, Template};
use receptionist_matcher::{meets_min_confidence, preconditions_hold};

const CONTEXT_BOOST: f64 = 1.10;
const PREVIOUS_SCENARIO_BOOST: f64 = 1.05;
const CAP: f64 = 0.95;

/// Re-scores `candidate` with the context boost, capped at 0.95. Always
/// returns a value — callers needing the accept/reject gate should follow
/// up with `accepts`.
pub fn boost(candidate: &MatchCandidate, context: &ConversationContext) -> MatchCandidate {
    let mut boosted = candidate.clone();
    let mut multiplier = CONTEXT_BOOST;
    if context.last_scenario_id.is_some() {
        multiplier *= PREVIOUS_SCENARIO_BOOST;
    }
    boosted.score = sanitize_score((boosted.score * multiplier).min(CAP));
    boosted.confidence = boosted.score;
    boosted
}

pub fn accepts(boosted: &MatchCandidate, template: &Template, context: &ConversationContext) -> bool {
    !boosted.blocked
        && meets_min_confidence(&boosted.scenario, boosted.confidence, template.thresholds.tier2)
        && preconditions_hold(&boosted.scenario, context)
}

/// Boosts `candidate` and returns it only if it now meets the Tier-2
/// threshold and precondition gate.
pub fn run(
    candidate: &MatchCandidate,
    template: &Template,
    context: &ConversationContext,
) -> Option<MatchCandidate> {
    let boosted = boost(candidate, context);
    if accepts(&boosted, template, context) {
        Some(boosted)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use receptionist_core::{Channel, Scenario, ScenarioStatus, Subscores, ThresholdsConfig};
    use std::collections::HashMap;

    fn candidate(score: f64) -> MatchCandidate {
        MatchCandidate {
            scenario: Scenario {
                id: "a".to_string(),
                name: "a".to_string(),
                positive_triggers: vec![],
                negative_triggers: vec![],
                regex_triggers: vec![],
                priority: 0,
                min_confidence: None,
                categories: vec![],
                status: ScenarioStatus::Live,
                languages: vec![],
                channels: vec![Channel::Voice],
                cooldown_secs: 0,
                quick_replies: vec!["ok".to_string()],
                full_replies: vec![],
                preconditions: vec![],
            },
            subscores: Subscores::default(),
            score,
            confidence: score,
            blocked: false,
            needs_clarifier: false,
            clarifier_prompt: None,
            is_exact_match: false,
        }
    }

    fn template() -> Template {
        Template {
            id: "t".to_string(),
            version: 1,
            scenarios: vec![],
            fillers: Default::default(),
            urgency_keywords: HashMap::new(),
            synonyms: HashMap::new(),
            intent_keywords: HashMap::new(),
            thresholds: ThresholdsConfig::default(),
            category_fillers: HashMap::new(),
            category_synonyms: HashMap::new(),
            context_patterns: vec![],
            greetings: vec![],
            custom_entity_patterns: vec![],
            corrections: vec![],
        }
    }

    #[test]
    fn boosts_and_accepts_a_near_miss_candidate() {
        let c = candidate(0.82);
        let result = run(&c, &template(), &ConversationContext::default());
        assert!(result.is_some());
        assert!((result.unwrap().confidence - 0.902).abs() < 1e-9);
    }

    #[test]
    fn caps_the_boosted_score_at_0_95() {
        let c = candidate(0.99);
        let result = run(&c, &template(), &ConversationContext::default()).unwrap();
        assert_eq!(result.confidence, CAP);
    }

    #[test]
    fn applies_the_extra_boost_when_a_previous_scenario_is_known() {
        let c = candidate(0.70);
        let mut ctx = ConversationContext::default();
        ctx.last_scenario_id = Some("a".to_string());
        let result = run(&c, &template(), &ctx).unwrap();
        assert!((result.confidence - (0.70 * 1.10 * 1.05)).abs() < 1e-9);
    }

    #[test]
    fn rejects_when_still_below_tier2_threshold() {
        let c = candidate(0.10);
        let result = run(&c, &template(), &ConversationContext::default());
        assert!(result.is_none());
    }
}
