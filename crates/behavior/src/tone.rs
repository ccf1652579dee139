//! Tone vocabulary and the hard constraint floor every tone carries
//! (spec §4.5). Grounded on the teacher's `ToneConfig`
//! (`core/src/traits/persona_provider.rs`): a tone is a named bundle of
//! instructions rather than a single adjective.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    EmergencySerious,
    ConflictSerious,
    LightPlayful,
    FriendlyDirect,
    FriendlyCasual,
    Consultative,
    Neutral,
}

impl Tone {
    /// One-line instruction capturing the tone's register, independent of
    /// the per-level humor/empathy/directness knobs.
    pub fn instruction(&self) -> &'static str {
        match self {
            Tone::EmergencySerious => "Speak plainly and urgently; prioritize safety over rapport.",
            Tone::ConflictSerious => "Stay calm and factual; do not concede or argue about charges.",
            Tone::LightPlayful => "A light touch of humor is welcome, but stay on task.",
            Tone::FriendlyDirect => "Be warm but get to the point quickly.",
            Tone::FriendlyCasual => "Relaxed, conversational, unhurried.",
            Tone::Consultative => "Ask questions, present options, let the caller lead the pace.",
            Tone::Neutral => "Plain and even-keeled.",
        }
    }
}

/// The per-turn output of `BehaviorEngine::decide` (spec §4.5): a tone plus
/// the humor/empathy/directness levels and rules it carries, and the
/// constraint floor that applies no matter which tone was selected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleInstructions {
    pub tone: Tone,
    pub humor_level: f64,
    pub empathy_level: f64,
    pub directness_level: f64,
    /// Tone-specific guidance, e.g. "stay calm and factual".
    pub rules: Vec<String>,
    /// Hard constraints that apply to every tone (spec §4.5).
    pub constraints: Vec<String>,
}

/// Applies to every tone, regardless of how it was selected.
pub fn constraint_floor() -> Vec<String> {
    vec![
        "Never invent policies, prices, or offers not present in configuration.".to_string(),
        "Never diagnose the caller's problem.".to_string(),
        "Never make promises about outcomes, timing, or cost.".to_string(),
        "If the caller needs something beyond this agent's scope, use the configured escalation fallback phrase.".to_string(),
    ]
}
