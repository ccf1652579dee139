//! End-to-end stage cascade (spec §4.1), as opposed to `pipeline.rs`'s
//! per-stage unit tests.

use receptionist_core::{BehaviorProfile, Channel, CompanyProfile, Correction, MatchMode, Template, ThresholdsConfig, Turn, VoiceSettings};
use receptionist_preprocessor::Preprocessor;
use std::collections::{HashMap, HashSet};

fn template() -> Template {
    let mut fillers = HashSet::new();
    fillers.insert("um".to_string());
    fillers.insert("like".to_string());

    let mut synonyms = HashMap::new();
    synonyms.insert("heater".to_string(), vec!["furnace".to_string(), "boiler".to_string()]);

    Template {
        id: "t1".to_string(),
        version: 1,
        scenarios: vec![],
        fillers,
        urgency_keywords: HashMap::new(),
        synonyms,
        intent_keywords: HashMap::new(),
        thresholds: ThresholdsConfig::default(),
        category_fillers: HashMap::new(),
        category_synonyms: HashMap::new(),
        context_patterns: vec![],
        greetings: vec!["hi".to_string()],
        custom_entity_patterns: vec![],
        corrections: vec![Correction { from: "furnase".to_string(), to: "furnace".to_string(), mode: MatchMode::Contains, priority: 0 }],
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
async fn strips_greeting_filler_and_corrects_vocabulary_before_normalizing() {
    let turn = Turn::new("hi, um, my furnase stopped working", "call-1", 0)
        .with_template("t1")
        .with_company("acme")
        .with_channel(Channel::Voice);

    let preprocessor = Preprocessor::new();
    let result = preprocessor.process(&turn, &template(), &company(), None).await;

    assert_eq!(result.raw_text, "hi, um, my furnase stopped working");
    assert!(!result.normalized.contains("um"));
    assert!(result.normalized.contains("furnace"));
    assert!(result.quality.passed);
}

#[tokio::test]
async fn synonym_expansion_keeps_original_tokens_a_subset_of_expanded() {
    let turn = Turn::new("my heater is broken", "call-2", 0).with_template("t1").with_company("acme");
    let preprocessor = Preprocessor::new();
    let result = preprocessor.process(&turn, &template(), &company(), None).await;

    assert!(result.tokens_monotone());
    assert!(result.expanded_tokens.iter().any(|t| t == "furnace" || t == "boiler"));
}
