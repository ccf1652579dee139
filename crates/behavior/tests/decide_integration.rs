//! Drives `decide` from a realistic `CompanyProfile`, as a caller utterance
//! would reach it via a `Turn` and its company's configured behavior
//! profile, rather than the hand-assembled `BehaviorProfile` literals used
//! by `lib.rs`'s unit tests.

use receptionist_behavior::decide;
use receptionist_behavior::tone::Tone;
use receptionist_core::company::TradeOverride;
use receptionist_core::{BehaviorMode, BehaviorProfile, CompanyProfile, VoiceSettings};
use std::collections::HashMap;

fn hvac_company() -> CompanyProfile {
    let mut trade_overrides = HashMap::new();
    trade_overrides.insert(
        "hvac".to_string(),
        TradeOverride {
            emergency_keywords: vec!["no heat".to_string(), "carbon monoxide".to_string()],
            billing_conflict_keywords: vec!["double charged".to_string()],
            joke_keywords: vec![],
        },
    );

    CompanyProfile {
        id: "acme-hvac".to_string(),
        name: "Acme HVAC".to_string(),
        custom_fillers: vec![],
        variables: HashMap::new(),
        voice: VoiceSettings::default(),
        behavior: BehaviorProfile {
            mode: BehaviorMode::Hybrid,
            humor_level: 0.4,
            empathy_level: 0.7,
            directness_level: 0.5,
            emergency_keywords: vec!["gas leak".to_string()],
            billing_conflict_keywords: vec!["overcharged".to_string()],
            joke_keywords: vec!["knock knock".to_string()],
            trade_overrides,
            safety_strictness: 0.8,
        },
        conversation_style: "balanced".to_string(),
        acknowledgment_overrides: HashMap::new(),
    }
}

#[test]
fn trade_specific_emergency_keyword_outranks_a_repair_category_match() {
    let company = hvac_company();
    let instructions = decide(
        "we have no heat and it's freezing in here",
        &["REPAIR".to_string()],
        &company.behavior,
        Some("hvac"),
    );
    assert_eq!(instructions.tone, Tone::EmergencySerious);
    assert!(instructions.rules[0].to_lowercase().contains("urgent"));
}

#[test]
fn trade_specific_billing_keyword_beats_scheduling_category_but_not_global_emergency() {
    let company = hvac_company();
    let instructions = decide(
        "I think I was double charged for last week's visit",
        &["SCHEDULING".to_string()],
        &company.behavior,
        Some("hvac"),
    );
    assert_eq!(instructions.tone, Tone::ConflictSerious);

    let instructions = decide(
        "there's a gas leak and I was double charged",
        &["SCHEDULING".to_string()],
        &company.behavior,
        Some("hvac"),
    );
    assert_eq!(instructions.tone, Tone::EmergencySerious);
}

#[test]
fn trade_override_from_a_different_trade_does_not_leak_in() {
    let company = hvac_company();
    let instructions = decide(
        "we have no heat",
        &["GENERAL".to_string()],
        &company.behavior,
        Some("plumbing"),
    );
    // "no heat" is an hvac-only override; under "plumbing" it's not recognized,
    // so this falls through to the GENERAL category mapping.
    assert_eq!(instructions.tone, Tone::FriendlyCasual);
}

#[test]
fn every_selected_tone_keeps_the_global_constraint_floor() {
    let company = hvac_company();
    for (utterance, categories, trade) in [
        ("we have no heat", vec!["REPAIR".to_string()], Some("hvac")),
        ("when's a good time to stop by", vec!["MAINTENANCE".to_string()], None),
        ("knock knock", vec![], None),
    ] {
        let instructions = decide(utterance, &categories, &company.behavior, trade);
        assert!(instructions.constraints.iter().any(|c| c.contains("diagnose")));
        assert!(instructions.constraints.iter().any(|c| c.contains("escalation")));
    }
}
