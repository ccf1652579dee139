//! Feeds a real `Preprocessor` output into `match_candidates` (spec §4.1
//! into §4.2), rather than the hand-built `PreprocessorResult`s used by
//! `scoring.rs`'s unit tests.

use receptionist_core::{
    BehaviorProfile, Channel, CompanyProfile, ConversationContext, Scenario, ScenarioStatus, Template,
    ThresholdsConfig, Turn, VoiceSettings,
};
use receptionist_matcher::match_candidates;
use receptionist_preprocessor::Preprocessor;
use std::collections::HashMap;

fn scenario(id: &str, triggers: Vec<&str>) -> Scenario {
    Scenario {
        id: id.to_string(),
        name: id.to_string(),
        positive_triggers: triggers.into_iter().map(|s| s.to_string()).collect(),
        negative_triggers: vec![],
        regex_triggers: vec![],
        priority: 0,
        min_confidence: None,
        categories: vec!["repair".to_string()],
        status: ScenarioStatus::Live,
        languages: vec!["en".to_string()],
        channels: vec![Channel::Voice],
        cooldown_secs: 0,
        quick_replies: vec!["Let's get that fixed.".to_string()],
        full_replies: vec![],
        preconditions: vec![],
    }
}

fn template() -> Template {
    Template {
        id: "t1".to_string(),
        version: 1,
        scenarios: vec![scenario("heater-repair", vec!["my heater stopped working", "furnace broken"])],
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

fn company() -> CompanyProfile {
    CompanyProfile {
        id: "acme".to_string(),
        name: "Acme".to_string(),
        custom_fillers: vec![],
        variables: HashMap::new(),
        voice: VoiceSettings::default(),
        behavior: BehaviorProfile::default(),
        conversation_style: "balanced".to_string(),
        acknowledgment_overrides: HashMap::new(),
    }
}

#[tokio::test]
async fn preprocessed_utterance_scores_an_exact_trigger_match() {
    let template = template();
    let turn = Turn::new("my heater stopped working", "call-1", 0).with_template("t1").with_company("acme");
    let preprocessed = Preprocessor::new().process(&turn, &template, &company(), None).await;

    let candidates = match_candidates(&preprocessed, &template, &ConversationContext::default(), "en", Channel::Voice);

    assert_eq!(candidates.len(), 1);
    assert!(candidates[0].is_exact_match);
    assert_eq!(candidates[0].scenario.id, "heater-repair");
}

#[tokio::test]
async fn ineligible_channel_yields_no_candidates() {
    let template = template();
    let turn = Turn::new("my heater stopped working", "call-2", 0).with_template("t1").with_company("acme");
    let preprocessed = Preprocessor::new().process(&turn, &template, &company(), None).await;

    let candidates = match_candidates(&preprocessed, &template, &ConversationContext::default(), "en", Channel::Sms);
    assert!(candidates.is_empty());
}
