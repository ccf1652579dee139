//! TraceEnvelope/TraceEvent — the append-only per-Turn diagnostic record
//! (C8). See spec §4.8.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How long a clipped trace value may be before truncation (spec §4.8:
/// "large strings clipped to a configured prefix").
const MAX_TRACE_VALUE_LEN: usize = 512;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceEnvelope {
    pub events: Vec<TraceEvent>,
}

impl TraceEnvelope {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn emit(
        &mut self,
        stage: impl Into<String>,
        event_type: impl Into<String>,
        status: TraceStatus,
        data: impl Into<String>,
    ) {
        self.push(TraceEvent::new(stage, event_type, status, data));
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    pub event_type: String,
    pub stage: String,
    pub status: TraceStatus,
    pub data: String,
    pub timestamp: DateTime<Utc>,
}

impl TraceEvent {
    pub fn new(
        stage: impl Into<String>,
        event_type: impl Into<String>,
        status: TraceStatus,
        data: impl Into<String>,
    ) -> Self {
        let mut data = data.into();
        if data.len() > MAX_TRACE_VALUE_LEN {
            data.truncate(MAX_TRACE_VALUE_LEN);
            data.push_str("...<clipped>");
        }
        Self {
            event_type: event_type.into(),
            stage: stage.into(),
            status,
            data,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStatus {
    Ok,
    Degraded,
    Error,
}
