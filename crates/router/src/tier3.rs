//! Tier 3 — LLM fallback, including pre-warm adoption. Spec §4.3.

use crate::error::{Result, RouterError};
use receptionist_core::{
    sanitize_score, LlmFallback, LlmPrewarm, LlmRequest, MatchCandidate, Pattern, PrewarmHandle, Subscores, Template,
};

const PREWARM_ADOPTED_CONFIDENCE: f64 = 0.90;

pub struct Tier3Outcome {
    pub candidate: Option<MatchCandidate>,
    pub patterns: Vec<Pattern>,
    pub tokens: u64,
    pub cost: f64,
}

/// Adopts a ready pre-warm result at a fixed confidence of 0.90, or issues a
/// fresh LLM call otherwise. Resolves the returned scenario id against the
/// current template — the LLM only ever names a scenario, never the
/// triggers/replies payload.
pub async fn run(
    llm: &dyn LlmFallback,
    prewarm: Option<(&dyn LlmPrewarm, PrewarmHandle)>,
    request: LlmRequest,
    template: &Template,
    tier_threshold: f64,
) -> Result<Tier3Outcome> {
    let (analysis, confidence_override) = match prewarm {
        Some((prewarm, handle)) => match prewarm.poll(handle).await {
            Ok(Some(ready)) => (ready, Some(PREWARM_ADOPTED_CONFIDENCE)),
            _ => (llm.analyze(request).await?, None),
        },
        None => (llm.analyze(request).await?, None),
    };

    if !analysis.success || !analysis.matched {
        return Ok(Tier3Outcome {
            candidate: None,
            patterns: analysis.patterns,
            tokens: analysis.tokens,
            cost: analysis.cost,
        });
    }

    let Some(scenario_id) = &analysis.scenario_id else {
        return Ok(Tier3Outcome {
            candidate: None,
            patterns: analysis.patterns,
            tokens: analysis.tokens,
            cost: analysis.cost,
        });
    };

    let Some(scenario) = template.find_scenario(scenario_id) else {
        return Err(RouterError::NoAcceptableScenario);
    };

    let confidence = sanitize_score(confidence_override.unwrap_or(analysis.confidence));
    let candidate = if receptionist_matcher::meets_min_confidence(scenario, confidence, tier_threshold) {
        Some(MatchCandidate {
            scenario: scenario.clone(),
            subscores: Subscores::default(),
            score: confidence,
            confidence,
            blocked: false,
            needs_clarifier: false,
            clarifier_prompt: None,
            is_exact_match: false,
        })
    } else {
        None
    };

    Ok(Tier3Outcome {
        candidate,
        patterns: analysis.patterns,
        tokens: analysis.tokens,
        cost: analysis.cost,
    })
}
