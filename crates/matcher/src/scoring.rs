//! Per-signal scoring: overlap ("BM25-like"), regex, context, intent and
//! urgency bonuses. Spec §4.2.

use receptionist_core::{sanitize_score, Channel, ConversationContext, Scenario, Template};
use regex::Regex;
use std::collections::HashSet;
use tracing::warn;

fn token_set(phrase: &str) -> HashSet<String> {
    phrase
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
        .collect()
}

/// `0.7·forward + 0.3·reverse`, forward = |T∩P|/|T|, reverse = |T∩P|/|P|,
/// maximized over the scenario's triggers.
pub fn overlap_score(scenario: &Scenario, normalized_text: &str) -> f64 {
    let phrase_tokens = token_set(normalized_text);
    if phrase_tokens.is_empty() {
        return 0.0;
    }
    let mut best = 0.0_f64;
    for trigger in &scenario.positive_triggers {
        let trigger_tokens = token_set(trigger);
        if trigger_tokens.is_empty() {
            continue;
        }
        let intersection = trigger_tokens.intersection(&phrase_tokens).count() as f64;
        let forward = intersection / trigger_tokens.len() as f64;
        let reverse = intersection / phrase_tokens.len() as f64;
        let score = 0.7 * forward + 0.3 * reverse;
        if score > best {
            best = score;
        }
    }
    sanitize_score(best)
}

/// 1.0 if any of the scenario's regex triggers match, case-insensitively.
/// Invalid patterns are logged and skipped rather than failing the match.
pub fn regex_score(scenario: &Scenario, normalized_text: &str) -> f64 {
    for pattern in &scenario.regex_triggers {
        let wrapped = if pattern.starts_with("(?i)") {
            pattern.clone()
        } else {
            format!("(?i){pattern}")
        };
        match Regex::new(&wrapped) {
            Ok(re) => {
                if re.is_match(normalized_text) {
                    return 1.0;
                }
            }
            Err(e) => warn!(scenario = %scenario.id, pattern, error = %e, "invalid regex trigger, skipping"),
        }
    }
    0.0
}

/// Bounded boosts from conversation context, clamped to [0,1].
pub fn context_score(scenario: &Scenario, context: &ConversationContext) -> f64 {
    let mut score = 0.0_f64;
    if let Some(last_intent) = &context.last_intent {
        if scenario
            .categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(last_intent))
        {
            score += 0.3;
        }
    }
    if context.preferred_scenarios.iter().any(|id| id == &scenario.id) {
        score += 0.2;
    }
    if !context.state.is_empty() && scenario.preconditions.iter().any(|p| p.holds(&context.state)) {
        score += 0.1;
    }
    sanitize_score(score)
}

/// Negative-trigger dominance: any substring match blocks the candidate
/// regardless of every other signal.
pub fn is_blocked_by_negative_trigger(scenario: &Scenario, normalized_text: &str) -> bool {
    scenario
        .negative_triggers
        .iter()
        .any(|neg| !neg.is_empty() && normalized_text.contains(&neg.to_lowercase()))
}

/// Exact-match bypass: the normalized text equals a normalized positive
/// trigger, verbatim.
pub fn is_exact_match(scenario: &Scenario, normalized_text: &str) -> bool {
    let normalized = normalized_text.trim().to_lowercase();
    scenario
        .positive_triggers
        .iter()
        .any(|t| t.trim().to_lowercase() == normalized)
}

/// Sum of `weight` over urgency keywords present (word boundary) in the
/// token list, capped at 0.50. Only meaningful for emergency scenarios —
/// callers should gate on `scenario.is_emergency()` first.
pub fn urgency_bonus(template: &Template, tokens: &[String]) -> f64 {
    let token_set: HashSet<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
    let mut sum = 0.0_f64;
    for (word, urgency) in &template.urgency_keywords {
        if token_set.contains(&word.to_lowercase()) {
            sum += urgency.weight;
        }
    }
    sum.min(0.50)
}

/// Weighted sum of the four base signals per `template.thresholds`.
pub fn weighted_sum(
    template: &Template,
    bm25: f64,
    semantic: f64,
    regex: f64,
    context: f64,
) -> f64 {
    let t = &template.thresholds;
    sanitize_score(t.bm25_weight * bm25 + t.semantic_weight * semantic + t.regex_weight * regex + t.context_weight * context)
}

pub fn eligible(scenario: &Scenario, language: &str, channel: Channel) -> bool {
    scenario.eligible_for(language, channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use receptionist_core::{Precondition, Scenario, ScenarioStatus, UrgencyCategory, UrgencyKeyword};
    use std::collections::HashMap;

    fn scenario() -> Scenario {
        Scenario {
            id: "book-visit".to_string(),
            name: "Book a visit".to_string(),
            positive_triggers: vec!["book an appointment".to_string(), "schedule a visit".to_string()],
            negative_triggers: vec!["cancel".to_string()],
            regex_triggers: vec![r"\bbook\b.*\bvisit\b".to_string()],
            priority: 10,
            min_confidence: None,
            categories: vec!["booking".to_string()],
            status: ScenarioStatus::Live,
            languages: vec!["en".to_string()],
            channels: vec![Channel::Voice],
            cooldown_secs: 0,
            quick_replies: vec!["Sure, let's get that booked.".to_string()],
            full_replies: vec![],
            preconditions: vec![],
        }
    }

    #[test]
    fn overlap_score_rewards_full_token_coverage() {
        let s = scenario();
        let score = overlap_score(&s, "i want to book an appointment please");
        assert!(score > 0.5, "expected high overlap, got {score}");
    }

    #[test]
    fn overlap_score_is_zero_for_unrelated_text() {
        let s = scenario();
        let score = overlap_score(&s, "what are your hours today");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn negative_trigger_blocks_regardless_of_overlap() {
        let s = scenario();
        assert!(is_blocked_by_negative_trigger(&s, "i want to cancel my booking"));
    }

    #[test]
    fn exact_match_requires_full_equality() {
        let s = scenario();
        assert!(is_exact_match(&s, "book an appointment"));
        assert!(!is_exact_match(&s, "i want to book an appointment"));
    }

    #[test]
    fn regex_score_is_case_insensitive() {
        let s = scenario();
        assert_eq!(regex_score(&s, "please BOOK me a VISIT"), 1.0);
    }

    #[test]
    fn invalid_regex_triggers_are_skipped_not_fatal() {
        let mut s = scenario();
        s.regex_triggers = vec!["[unclosed".to_string()];
        assert_eq!(regex_score(&s, "book an appointment"), 0.0);
    }

    #[test]
    fn context_score_sums_bounded_boosts_and_clamps() {
        let s = scenario();
        let mut ctx = ConversationContext::default();
        ctx.last_intent = Some("booking".to_string());
        ctx.preferred_scenarios = vec!["book-visit".to_string()];
        ctx.state.insert("k".to_string(), "v".to_string());
        let mut scored = s.clone();
        scored.preconditions = vec![Precondition { key: "k".to_string(), value: "v".to_string() }];
        assert_eq!(context_score(&scored, &ctx), 0.6);
    }

    #[test]
    fn urgency_bonus_is_capped_at_half() {
        let mut template_urgency = HashMap::new();
        template_urgency.insert(
            "fire".to_string(),
            UrgencyKeyword { weight: 0.4, category: UrgencyCategory::Emergency },
        );
        template_urgency.insert(
            "smoke".to_string(),
            UrgencyKeyword { weight: 0.4, category: UrgencyCategory::Emergency },
        );
        let template = receptionist_core::Template {
            id: "t".to_string(),
            version: 1,
            scenarios: vec![],
            fillers: Default::default(),
            urgency_keywords: template_urgency,
            synonyms: HashMap::new(),
            intent_keywords: HashMap::new(),
            thresholds: receptionist_core::ThresholdsConfig::default(),
            category_fillers: HashMap::new(),
            category_synonyms: HashMap::new(),
            context_patterns: vec![],
            greetings: vec![],
            custom_entity_patterns: vec![],
            corrections: vec![],
        };
        let tokens = vec!["fire".to_string(), "smoke".to_string()];
        assert_eq!(urgency_bonus(&template, &tokens), 0.50);
    }
}
