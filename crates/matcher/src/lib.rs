//! C2 — scores eligible scenarios against a `PreprocessorResult` and
//! returns ranked `MatchCandidate`s. See spec §4.2.

pub mod dual_intent;
pub mod error;
pub mod intent;
pub mod scoring;

pub use error::{MatchError, Result};

use receptionist_core::{
    Channel, ConversationContext, MatchCandidate, PreprocessorResult, Scenario, Subscores, Template,
};

/// Scores every `Live` scenario eligible for `language`/`channel` against
/// `result`, applies the exact-match bypass, negative-trigger blocking,
/// intent/urgency bonuses, and the dual-intent resolver, then returns
/// candidates sorted by score desc, then priority desc.
pub fn match_candidates(
    result: &PreprocessorResult,
    template: &Template,
    context: &ConversationContext,
    language: &str,
    channel: Channel,
) -> Vec<MatchCandidate> {
    let eligible: Vec<&Scenario> = template
        .scenarios
        .iter()
        .filter(|s| s.eligible_for(language, channel))
        .collect();

    if let Some(exact) = eligible.iter().find(|s| scoring::is_exact_match(s, &result.normalized)) {
        return vec![MatchCandidate {
            scenario: (*exact).clone(),
            subscores: Subscores::default(),
            score: 1.0,
            confidence: 1.0,
            blocked: false,
            needs_clarifier: false,
            clarifier_prompt: None,
            is_exact_match: true,
        }];
    }

    let mut candidates: Vec<MatchCandidate> = eligible
        .into_iter()
        .map(|scenario| score_one(scenario, result, template, context))
        .collect();

    let scores = dual_intent::compute_scores(&result.expanded_tokens, template, &candidates);
    candidates = dual_intent::apply(candidates, scores);

    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.scenario.priority.cmp(&a.scenario.priority))
    });

    candidates
}

fn score_one(
    scenario: &Scenario,
    result: &PreprocessorResult,
    template: &Template,
    context: &ConversationContext,
) -> MatchCandidate {
    if scoring::is_blocked_by_negative_trigger(scenario, &result.normalized) {
        return MatchCandidate {
            scenario: scenario.clone(),
            subscores: Subscores::default(),
            score: 0.0,
            confidence: 0.0,
            blocked: true,
            needs_clarifier: false,
            clarifier_prompt: None,
            is_exact_match: false,
        };
    }

    let bm25 = scoring::overlap_score(scenario, &result.normalized);
    let semantic = 0.0;
    let regex = scoring::regex_score(scenario, &result.normalized);
    let ctx = scoring::context_score(scenario, context);

    let base = scoring::weighted_sum(template, bm25, semantic, regex, ctx);

    let intent_bonus = intent::intent_bonus(scenario, &result.expanded_tokens, &template.intent_keywords);
    let urgency_bonus = if scenario.is_emergency() {
        scoring::urgency_bonus(template, &result.expanded_tokens)
    } else {
        0.0
    };

    let score = receptionist_core::sanitize_score(base + intent_bonus + urgency_bonus);

    MatchCandidate {
        scenario: scenario.clone(),
        subscores: Subscores {
            bm25,
            semantic,
            regex,
            context: ctx,
            intent_bonus,
            urgency_bonus,
        },
        score,
        confidence: score,
        blocked: false,
        needs_clarifier: false,
        clarifier_prompt: None,
        is_exact_match: false,
    }
}

/// `confidence ≥ max(tier_threshold, scenario.min_confidence ?? 0)` (spec
/// §4.2 acceptance gate).
pub fn meets_min_confidence(scenario: &Scenario, confidence: f64, tier_threshold: f64) -> bool {
    let floor = tier_threshold.max(scenario.effective_min_confidence().unwrap_or(0.0));
    confidence >= floor
}

/// All of a scenario's `key=value` preconditions hold over `state`.
pub fn preconditions_hold(scenario: &Scenario, context: &ConversationContext) -> bool {
    scenario.preconditions.iter().all(|p| p.holds(&context.state))
}
