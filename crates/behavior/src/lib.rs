//! C5: BehaviorEngine — decides **how** the agent should speak, independent
//! of **what** it says (spec §4.5). A pure function over the caller's
//! utterance, the accepted scenario's categories, and the company's
//! `BehaviorProfile`; no collaborator calls, no state.
//!
//! Grounded on the teacher's `core/src/personalization/signals.rs`
//! (keyword-driven signal detection) and
//! `core/src/traits/persona_provider.rs` (`ToneConfig`/`PersonaConfig`: a
//! tone carries instructions, not just a label).

pub mod signals;
pub mod tone;

use receptionist_core::BehaviorProfile;
use signals::{contains_any, merge_keywords};
use tone::{constraint_floor, StyleInstructions, Tone};

/// Tone priority ladder (spec §4.5, first match wins):
/// emergency keywords -> billing-conflict keywords -> joke patterns (only
/// if `humor_level > 0.3`) -> intent-based mapping over the scenario's
/// categories -> `Neutral`. Trade-specific keyword overrides are merged
/// over the global lists before detection.
pub fn decide(utterance: &str, scenario_categories: &[String], behavior: &BehaviorProfile, trade: Option<&str>) -> StyleInstructions {
    let lower = utterance.to_lowercase();
    let trade_override = trade.and_then(|t| behavior.trade_overrides.get(t));

    let emergency_keywords = merge_keywords(
        &behavior.emergency_keywords,
        trade_override.map(|o| o.emergency_keywords.as_slice()).unwrap_or(&[]),
    );
    let billing_keywords = merge_keywords(
        &behavior.billing_conflict_keywords,
        trade_override.map(|o| o.billing_conflict_keywords.as_slice()).unwrap_or(&[]),
    );
    let joke_keywords = merge_keywords(
        &behavior.joke_keywords,
        trade_override.map(|o| o.joke_keywords.as_slice()).unwrap_or(&[]),
    );

    let tone = if contains_any(&lower, &emergency_keywords) {
        Tone::EmergencySerious
    } else if contains_any(&lower, &billing_keywords) {
        Tone::ConflictSerious
    } else if behavior.humor_level > 0.3 && contains_any(&lower, &joke_keywords) {
        Tone::LightPlayful
    } else {
        tone_for_categories(scenario_categories)
    };

    build_instructions(tone, behavior)
}

/// Intent-based fallback mapping (spec §4.5). The first recognized
/// category in scenario order wins; an unrecognized or empty category list
/// yields `Neutral`.
fn tone_for_categories(categories: &[String]) -> Tone {
    for category in categories {
        let tone = match category.to_ascii_uppercase().as_str() {
            "REPAIR" => Some(Tone::FriendlyDirect),
            "MAINTENANCE" => Some(Tone::FriendlyCasual),
            "NEW_SALES" | "INSTALL" => Some(Tone::Consultative),
            "EMERGENCY" => Some(Tone::EmergencySerious),
            "BILLING" => Some(Tone::ConflictSerious),
            "SCHEDULING" | "FOLLOWUP" => Some(Tone::FriendlyDirect),
            "GENERAL" => Some(Tone::FriendlyCasual),
            _ => None,
        };
        if let Some(tone) = tone {
            return tone;
        }
    }
    Tone::Neutral
}

fn build_instructions(tone: Tone, behavior: &BehaviorProfile) -> StyleInstructions {
    StyleInstructions {
        tone,
        humor_level: behavior.humor_level,
        empathy_level: behavior.empathy_level,
        directness_level: behavior.directness_level,
        rules: vec![tone.instruction().to_string()],
        constraints: constraint_floor(),
    }
}
