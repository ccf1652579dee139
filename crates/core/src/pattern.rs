//! Pattern — a unit of learning promoted from Tier 3 into the template
//! (C4). See spec §3, §4.4.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PatternKind {
    Synonym {
        canonical: String,
        aliases: Vec<String>,
    },
    Filler {
        word: String,
    },
    Urgency {
        word: String,
        weight: f64,
        category: String,
    },
    TriggerExpansion {
        scenario_id: String,
        triggers: Vec<String>,
    },
    NegativeTrigger {
        scenario_id: String,
        phrases: Vec<String>,
    },
}
