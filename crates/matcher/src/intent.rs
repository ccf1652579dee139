//! Caller-intent detection and the intent-bonus applied to scenario
//! candidates. Spec §4.2.

use receptionist_core::Scenario;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Emergency,
    Book,
    Reschedule,
    Status,
    Question,
    Smalltalk,
}

impl Intent {
    pub const ALL_BY_PRIORITY: [Intent; 6] = [
        Intent::Emergency,
        Intent::Book,
        Intent::Reschedule,
        Intent::Status,
        Intent::Question,
        Intent::Smalltalk,
    ];

    pub fn priority(self) -> i32 {
        match self {
            Intent::Emergency => 100,
            Intent::Book => 80,
            Intent::Reschedule => 60,
            Intent::Status => 40,
            Intent::Question => 20,
            Intent::Smalltalk => 10,
        }
    }

    pub fn bonus(self) -> f64 {
        match self {
            Intent::Emergency => 0.50,
            Intent::Book => 0.40,
            Intent::Reschedule => 0.25,
            Intent::Status => 0.15,
            Intent::Question => 0.0,
            Intent::Smalltalk => -0.10,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Intent::Emergency => "EMERGENCY",
            Intent::Book => "BOOK",
            Intent::Reschedule => "RESCHEDULE",
            Intent::Status => "STATUS",
            Intent::Question => "QUESTION",
            Intent::Smalltalk => "SMALLTALK",
        }
    }
}

/// Returns the highest-priority intent whose keyword set has at least one
/// token hit, or `None` if nothing matched.
pub fn detect_intent(tokens: &[String], intent_keywords: &HashMap<String, Vec<String>>) -> Option<Intent> {
    let token_set: std::collections::HashSet<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
    Intent::ALL_BY_PRIORITY.into_iter().find(|intent| {
        intent_keywords
            .get(intent.key())
            .map(|kws| kws.iter().any(|kw| token_set.contains(&kw.to_lowercase())))
            .unwrap_or(false)
    })
}

/// Whether `scenario` is considered "about" `intent`, via its categories or
/// name matching the intent's own keyword mapping.
pub fn scenario_matches_intent(scenario: &Scenario, intent: Intent, intent_keywords: &HashMap<String, Vec<String>>) -> bool {
    let name = scenario.name.to_lowercase();
    if scenario.categories.iter().any(|c| c.eq_ignore_ascii_case(intent.key())) {
        return true;
    }
    if let Some(keywords) = intent_keywords.get(intent.key()) {
        return keywords.iter().any(|kw| {
            let kw = kw.to_lowercase();
            name.contains(&kw) || scenario.categories.iter().any(|c| c.eq_ignore_ascii_case(&kw))
        });
    }
    false
}

/// Additive bonus for the highest-priority detected intent, 0 if none
/// matched or detected.
pub fn intent_bonus(scenario: &Scenario, tokens: &[String], intent_keywords: &HashMap<String, Vec<String>>) -> f64 {
    match detect_intent(tokens, intent_keywords) {
        Some(intent) if scenario_matches_intent(scenario, intent, intent_keywords) => intent.bonus(),
        _ => 0.0,
    }
}

/// Whether a scenario's categories place it on the "take an action" side
/// of the dual-intent resolver (booking or rescheduling).
pub fn is_booking_category(categories: &[String]) -> bool {
    categories
        .iter()
        .any(|c| c.eq_ignore_ascii_case("BOOK") || c.eq_ignore_ascii_case("RESCHEDULE") || c.eq_ignore_ascii_case("booking"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use receptionist_core::{Channel, ScenarioStatus};

    fn scenario(name: &str, categories: Vec<&str>) -> Scenario {
        Scenario {
            id: name.to_string(),
            name: name.to_string(),
            positive_triggers: vec![],
            negative_triggers: vec![],
            regex_triggers: vec![],
            priority: 0,
            min_confidence: None,
            categories: categories.into_iter().map(|c| c.to_string()).collect(),
            status: ScenarioStatus::Live,
            languages: vec![],
            channels: vec![Channel::Voice],
            cooldown_secs: 0,
            quick_replies: vec!["ok".to_string()],
            full_replies: vec![],
            preconditions: vec![],
        }
    }

    fn keywords() -> HashMap<String, Vec<String>> {
        let mut map = HashMap::new();
        map.insert("EMERGENCY".to_string(), vec!["fire".to_string(), "flood".to_string()]);
        map.insert("BOOK".to_string(), vec!["appointment".to_string()]);
        map
    }

    #[test]
    fn detects_the_highest_priority_matching_intent() {
        let tokens = vec!["fire".to_string(), "appointment".to_string()];
        assert_eq!(detect_intent(&tokens, &keywords()), Some(Intent::Emergency));
    }

    #[test]
    fn returns_none_when_nothing_matches() {
        let tokens = vec!["weather".to_string()];
        assert_eq!(detect_intent(&tokens, &keywords()), None);
    }

    #[test]
    fn intent_bonus_applies_only_when_scenario_matches_the_detected_intent() {
        let s = scenario("emergency-dispatch", vec!["EMERGENCY"]);
        let tokens = vec!["fire".to_string()];
        assert_eq!(intent_bonus(&s, &tokens, &keywords()), 0.50);
    }

    #[test]
    fn intent_bonus_is_zero_for_a_non_matching_scenario() {
        let s = scenario("book-visit", vec!["BOOK"]);
        let tokens = vec!["fire".to_string()];
        assert_eq!(intent_bonus(&s, &tokens, &keywords()), 0.0);
    }
}
