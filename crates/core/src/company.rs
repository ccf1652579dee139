//! CompanyProfile — per-tenant overrides layered on top of a Template.
//! See spec §3 ("Company profile").

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: String,
    pub name: String,
    pub custom_fillers: Vec<String>,
    /// variable name -> value, substituted into reply templates by the
    /// style renderer.
    pub variables: HashMap<String, String>,
    pub voice: VoiceSettings,
    pub behavior: BehaviorProfile,
    /// conversation_style: "confident" | "balanced" | "polite" (spec §4.6).
    pub conversation_style: String,
    /// UI-configured acknowledgment variant overrides, keyed by slot name
    /// ("name", "phone", "address", "time") or conversation style; replaces
    /// the style renderer's built-in variant array for that key when
    /// present (spec §4.6).
    pub acknowledgment_overrides: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub voice_id: Option<String>,
    pub twilio_endpoint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorProfile {
    pub mode: BehaviorMode,
    pub humor_level: f64,
    pub empathy_level: f64,
    pub directness_level: f64,
    pub emergency_keywords: Vec<String>,
    pub billing_conflict_keywords: Vec<String>,
    pub joke_keywords: Vec<String>,
    /// trade ("plumbing", "hvac", ...) -> keyword overrides merged over the
    /// global lists before detection (spec §4.5).
    pub trade_overrides: HashMap<String, TradeOverride>,
    pub safety_strictness: f64,
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        Self {
            mode: BehaviorMode::Hybrid,
            humor_level: 0.2,
            empathy_level: 0.6,
            directness_level: 0.5,
            emergency_keywords: Vec::new(),
            billing_conflict_keywords: Vec::new(),
            joke_keywords: Vec::new(),
            trade_overrides: HashMap::new(),
            safety_strictness: 0.7,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorMode {
    Hybrid,
    Strict,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TradeOverride {
    pub emergency_keywords: Vec<String>,
    pub billing_conflict_keywords: Vec<String>,
    pub joke_keywords: Vec<String>,
}
