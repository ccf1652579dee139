//! Template/Scenario — the versioned, per-tenant bundle of response units
//! the matcher and router score against. See spec §3 ("Template",
//! "Scenario") and §6 (tier thresholds / weights configuration).

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A versioned bundle of scenarios and language assets for a tenant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub version: u32,
    pub scenarios: Vec<Scenario>,
    /// Default filler-word set (company/category fillers are merged in per
    /// spec §4.1 stage 1).
    pub fillers: HashSet<String>,
    /// word -> (weight, category), spec §3.
    pub urgency_keywords: HashMap<String, UrgencyKeyword>,
    /// canonical term -> aliases, spec §3.
    pub synonyms: HashMap<String, Vec<String>>,
    /// intent name -> keyword set, spec §4.2.
    pub intent_keywords: HashMap<String, Vec<String>>,
    pub thresholds: ThresholdsConfig,
    /// category -> additional filler phrases for that category, merged into
    /// stage 1's filler union (spec §4.1).
    #[serde(default)]
    pub category_fillers: HashMap<String, Vec<String>>,
    /// category -> canonical term -> aliases, appended to `synonyms` for
    /// scenarios in that category (spec §4.1 stage 3).
    #[serde(default)]
    pub category_synonyms: HashMap<String, HashMap<String, Vec<String>>>,
    /// Multi-word context patterns that expand into component tokens when
    /// all pattern words are present (spec §4.1 stage 4).
    #[serde(default)]
    pub context_patterns: Vec<ContextPattern>,
    /// Greetings stripped (at most one, leading) during stage 1.
    #[serde(default = "default_greetings")]
    pub greetings: Vec<String>,
    /// Custom named-entity regex patterns from template config (spec §4.1
    /// stage 5: "Custom regex patterns from template config may add further
    /// named entities").
    #[serde(default)]
    pub custom_entity_patterns: Vec<CustomEntityPattern>,
    /// Ordered vocabulary corrections applied in stage 2.
    #[serde(default)]
    pub corrections: Vec<Correction>,
}

fn default_greetings() -> Vec<String> {
    vec![
        "hi".to_string(),
        "hello".to_string(),
        "hey".to_string(),
        "good morning".to_string(),
        "good afternoon".to_string(),
        "good evening".to_string(),
    ]
}

impl Template {
    pub fn find_scenario(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }
}

/// A component-token expansion pattern, spec §4.1 stage 4: "Context
/// patterns have the form `{pattern: [word…], component, contextTokens,
/// priority, confidence}`; they fire when all pattern words are present;
/// higher priority first."
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextPattern {
    pub pattern: Vec<String>,
    pub component: String,
    pub context_tokens: Vec<String>,
    pub priority: i32,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomEntityPattern {
    pub name: String,
    pub regex: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchMode {
    Exact,
    Contains,
}

/// A single `from -> to` vocabulary correction (spec §4.1 stage 2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correction {
    pub from: String,
    pub to: String,
    pub mode: MatchMode,
    /// Lower runs first.
    pub priority: i32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UrgencyKeyword {
    pub weight: f64,
    pub category: UrgencyCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrgencyCategory {
    Emergency,
    General,
}

/// tier1/tier2 thresholds plus weight/budget/timeout knobs from spec §6.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    pub tier1: f64,
    pub tier2: f64,
    pub min_confidence_default: f64,
    pub bm25_weight: f64,
    pub semantic_weight: f64,
    pub regex_weight: f64,
    pub context_weight: f64,
    /// reserved for a future true-BM25 upgrade; unused by the overlap
    /// formula (spec §9).
    pub bm25_k1: f64,
    pub bm25_b: f64,
    pub max_scenarios: usize,
    pub stage_timeout_ms: u64,
    pub total_timeout_ms: u64,
    pub monthly_budget_limit: f64,
    pub learning_confidence_floor: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            tier1: 0.80,
            tier2: 0.60,
            min_confidence_default: 0.45,
            bm25_weight: 0.40,
            semantic_weight: 0.30,
            regex_weight: 0.20,
            context_weight: 0.10,
            bm25_k1: 1.5,
            bm25_b: 0.75,
            max_scenarios: 1000,
            stage_timeout_ms: 50,
            total_timeout_ms: 5000,
            monthly_budget_limit: 500.0,
            learning_confidence_floor: 0.75,
        }
    }
}

/// An identified response unit: triggers, replies, and acceptance gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub positive_triggers: Vec<String>,
    pub negative_triggers: Vec<String>,
    pub regex_triggers: Vec<String>,
    pub priority: i32,
    /// Per-scenario floor in (0,1]; `None` means "no stricter gate than the
    /// tier/template threshold" (spec invariant: "when set and valid").
    pub min_confidence: Option<f64>,
    pub categories: Vec<String>,
    pub status: ScenarioStatus,
    pub languages: Vec<String>,
    pub channels: Vec<Channel>,
    pub cooldown_secs: u64,
    pub quick_replies: Vec<String>,
    pub full_replies: Vec<String>,
    pub preconditions: Vec<Precondition>,
}

impl Scenario {
    /// `min_confidence` is only honored when it is set and lies in (0,1];
    /// anything else falls back to "no extra floor" (spec invariant).
    pub fn effective_min_confidence(&self) -> Option<f64> {
        self.min_confidence
            .filter(|&c| c > 0.0 && c <= 1.0)
    }

    pub fn is_emergency(&self) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case("emergency") || c.eq_ignore_ascii_case("urgent"))
    }

    pub fn eligible_for(&self, language: &str, channel: Channel) -> bool {
        self.status == ScenarioStatus::Live
            && (self.languages.is_empty() || self.languages.iter().any(|l| l == language))
            && (self.channels.is_empty() || self.channels.contains(&channel))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Live,
    Draft,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Voice,
    Sms,
    Chat,
}

/// A `key=value` requirement evaluated over `ConversationContext.state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Precondition {
    pub key: String,
    pub value: String,
}

impl Precondition {
    pub fn holds(&self, state: &HashMap<String, String>) -> bool {
        state.get(&self.key).map(|v| v == &self.value).unwrap_or(false)
    }
}
