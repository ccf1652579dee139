//! Turn — a single utterance processed, and the prior-turn context carried
//! alongside it. See spec §3 ("Turn").

use crate::template::Channel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single caller utterance to be routed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Raw speech-to-text string. Never mutated downstream (spec invariant).
    pub raw_text: String,
    /// Stable identifier for the call this turn belongs to.
    pub call_id: String,
    /// 0-based index of this turn within the call.
    pub turn_index: u32,
    pub timestamp: DateTime<Utc>,
    pub company_id: Option<String>,
    pub template_id: Option<String>,
    pub channel: Channel,
    pub language: String,
    pub context: Option<ConversationContext>,
}

impl Turn {
    pub fn new(raw_text: impl Into<String>, call_id: impl Into<String>, turn_index: u32) -> Self {
        Self {
            raw_text: raw_text.into(),
            call_id: call_id.into(),
            turn_index,
            timestamp: Utc::now(),
            company_id: None,
            template_id: None,
            channel: Channel::Voice,
            language: "en".to_string(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: ConversationContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    pub fn with_company(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }

    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Prior-turn state carried into scoring: last intent/scenario, captured
/// slots, and per-scenario cooldown timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationContext {
    pub last_intent: Option<String>,
    pub last_scenario_id: Option<String>,
    /// Slots captured across the call so far (name, phone, address, time, ...).
    pub captured_slots: HashMap<String, String>,
    /// scenario_id -> last-served timestamp, used for cooldown enforcement.
    pub cooldowns: HashMap<String, DateTime<Utc>>,
    /// Scenario ids the caller's profile prefers (context score §4.2).
    pub preferred_scenarios: Vec<String>,
    /// Arbitrary precondition facts evaluated as key=value (spec §3 Scenario.preconditions).
    pub state: HashMap<String, String>,
    /// Forced scenario id an optimization policy wants used without LLM involvement (§4.3).
    pub forced_scenario_id: Option<String>,
}

impl ConversationContext {
    /// Whether `scenario_id`'s cooldown (in seconds) has elapsed as of `now`.
    pub fn cooldown_elapsed(&self, scenario_id: &str, cooldown_secs: u64, now: DateTime<Utc>) -> bool {
        match self.cooldowns.get(scenario_id) {
            Some(last) => {
                let elapsed = now.signed_duration_since(*last).num_seconds();
                elapsed >= cooldown_secs as i64
            }
            None => true,
        }
    }
}
