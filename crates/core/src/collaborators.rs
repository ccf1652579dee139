//! Collaborator contracts (spec §6). These are the interfaces the core
//! *consumes*; concrete implementations (a real template DB, a vendor LLM
//! client, a telephony-side cost ledger) live outside this workspace except
//! for the in-memory reference implementations in `crates/server` used for
//! demos and integration tests.
//!
//! Grounded on `core/src/traits/mod.rs`'s convention of one narrow
//! `#[async_trait]` trait per external capability.

use crate::company::CompanyProfile;
use crate::error::Result;
use crate::pattern::Pattern;
use crate::template::Template;
use crate::trace::TraceEnvelope;
use crate::turn::ConversationContext;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn load_template(&self, template_id: &str) -> Result<Template>;
    async fn apply_patterns(
        &self,
        template_id: &str,
        patterns: &[Pattern],
        expected_version: u32,
    ) -> Result<TemplateApplyOutcome>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateApplyOutcome {
    pub applied: Vec<Pattern>,
    pub rejected: Vec<Pattern>,
}

#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn load_company(&self, company_id: &str) -> Result<CompanyProfile>;
}

#[async_trait]
pub trait NameDictionary: Send + Sync {
    async fn is_first_name(&self, s: &str) -> bool;
    async fn is_last_name(&self, s: &str) -> bool;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub utterance: String,
    /// Candidate scenario ids the LLM may choose among.
    pub scenario_ids: Vec<String>,
    pub context: ConversationContext,
    pub system_prompt: String,
    pub deadline_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmAnalysis {
    pub success: bool,
    pub matched: bool,
    pub scenario_id: Option<String>,
    pub confidence: f64,
    pub rationale: String,
    pub patterns: Vec<Pattern>,
    pub tokens: u64,
    pub cost: f64,
    pub latency_ms: u64,
}

#[async_trait]
pub trait LlmFallback: Send + Sync {
    async fn analyze(&self, request: LlmRequest) -> Result<LlmAnalysis>;
}

/// Opaque handle to a speculative pre-warm request (spec §4.3, §5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrewarmHandle(pub u64);

#[async_trait]
pub trait LlmPrewarm: Send + Sync {
    async fn start(&self, key: &str, request: LlmRequest) -> Result<PrewarmHandle>;
    /// Returns `Ok(None)` if the pre-warm isn't ready yet or was cancelled.
    /// A late result after cancellation must be discarded, not returned
    /// (spec §5: "a late result is discarded, not consumed").
    async fn poll(&self, handle: PrewarmHandle) -> Result<Option<LlmAnalysis>>;
    async fn cancel(&self, handle: PrewarmHandle);
}

#[async_trait]
pub trait CostAggregator: Send + Sync {
    async fn current_spend(&self, template_id: &str, month: &str) -> Result<f64>;
    async fn record_call(&self, template_id: &str, month: &str, cost: f64) -> Result<()>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptimizationDecision {
    pub use_llm: bool,
    pub reason: String,
    pub forced_scenario_id: Option<String>,
    pub cached_response: Option<String>,
}

#[async_trait]
pub trait OptimizationPolicy: Send + Sync {
    async fn should_use_llm(
        &self,
        utterance: &str,
        context: &ConversationContext,
    ) -> Result<OptimizationDecision>;
}

#[async_trait]
pub trait PatternLearningLog: Send + Sync {
    async fn enqueue(&self, template_id: &str, patterns: Vec<Pattern>) -> Result<()>;
}

#[async_trait]
pub trait TraceSink: Send + Sync {
    async fn emit(&self, envelope: &TraceEnvelope);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub code: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub details: Option<String>,
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn alert(&self, alert: Alert);
}
