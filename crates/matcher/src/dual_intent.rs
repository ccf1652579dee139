//! Dual-intent resolver: disambiguates "report a problem" vs "take an
//! action" when both read plausibly from the same utterance. Spec §4.2.

use crate::intent::is_booking_category;
use receptionist_core::{sanitize_score, MatchCandidate, Template, UrgencyCategory};
use std::collections::{HashMap, HashSet};

const TH: f64 = 0.45;
const EM_HARD: f64 = 0.70;
const DELTA: f64 = 0.15;

#[derive(Debug, Clone, Copy, Default)]
pub struct DualIntentScores {
    pub problem_score: f64,
    pub action_score: f64,
}

fn keyword_hits(tokens: &HashSet<String>, keywords: Option<&Vec<String>>) -> usize {
    keywords
        .map(|kws| kws.iter().filter(|kw| tokens.contains(&kw.to_lowercase())).count())
        .unwrap_or(0)
}

/// `problemScore` weights emergency keyword hits double, plus the best
/// emergency-scenario score already computed; `actionScore` mirrors this
/// for booking + reschedule. Both are bounded to [0,1].
pub fn compute_scores(
    tokens: &[String],
    template: &Template,
    candidates: &[MatchCandidate],
) -> DualIntentScores {
    let token_set: HashSet<String> = tokens.iter().map(|t| t.to_lowercase()).collect();

    let emergency_hits = keyword_hits(&token_set, template.intent_keywords.get("EMERGENCY"));
    let problem_keyword_hits = template
        .urgency_keywords
        .iter()
        .filter(|(word, kw)| kw.category == UrgencyCategory::Emergency && token_set.contains(&word.to_lowercase()))
        .count();
    let problem_keyword_score = ((emergency_hits * 2 + problem_keyword_hits) as f64 / 10.0).min(1.0);

    let book_hits = keyword_hits(&token_set, template.intent_keywords.get("BOOK"));
    let reschedule_hits = keyword_hits(&token_set, template.intent_keywords.get("RESCHEDULE"));
    let action_keyword_score = ((book_hits + reschedule_hits) as f64 / 10.0).min(1.0);

    let best_emergency_scenario = candidates
        .iter()
        .filter(|c| !c.blocked && c.scenario.is_emergency())
        .map(|c| c.score)
        .fold(0.0_f64, f64::max);
    let best_booking_scenario = candidates
        .iter()
        .filter(|c| !c.blocked && is_booking_category(&c.scenario.categories))
        .map(|c| c.score)
        .fold(0.0_f64, f64::max);

    DualIntentScores {
        problem_score: sanitize_score(0.6 * problem_keyword_score + 0.4 * best_emergency_scenario),
        action_score: sanitize_score(0.6 * action_keyword_score + 0.4 * best_booking_scenario),
    }
}

/// Applies the score adjustment (or clarifier flag) described by the four
/// branches in spec §4.2, mutating candidate scores/confidence in place.
pub fn apply(mut candidates: Vec<MatchCandidate>, scores: DualIntentScores) -> Vec<MatchCandidate> {
    let diff = scores.problem_score - scores.action_score;

    if scores.problem_score >= EM_HARD && diff >= DELTA {
        for c in candidates.iter_mut().filter(|c| c.scenario.is_emergency()) {
            c.score = sanitize_score(c.score * 1.5);
            c.confidence = c.score;
        }
    } else if scores.problem_score >= TH && scores.action_score >= TH && diff.abs() < DELTA {
        if let Some(top) = candidates
            .iter_mut()
            .filter(|c| !c.blocked)
            .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
        {
            top.needs_clarifier = true;
            top.clarifier_prompt =
                Some("Just to make sure I help with the right thing — are you reporting an issue, or would you like to book something?".to_string());
        }
    } else if scores.problem_score >= TH && scores.action_score >= TH {
        let emergency_wins = scores.problem_score > scores.action_score;
        for c in candidates.iter_mut() {
            let matches_winner = if emergency_wins {
                c.scenario.is_emergency()
            } else {
                is_booking_category(&c.scenario.categories)
            };
            if matches_winner {
                c.score = sanitize_score(c.score * 1.3);
                c.confidence = c.score;
            }
        }
    }

    candidates
}
