//! In-memory reference implementations of the spec §6 collaborator traits
//! (SPEC_FULL §3). Enough to drive `Router::route` end to end for local
//! demos and integration tests; none of these are production collaborators
//! — a real template database, vendor LLM client, and billing ledger live
//! outside this workspace. Grounded on the teacher's
//! `session::InMemorySessionStore` living alongside `ScyllaSessionStore`:
//! a throwaway implementation next to the trait it proves out.

use async_trait::async_trait;
use dashmap::DashMap;
use receptionist_core::{
    Alert, CompanyProfile, CompanyStore, CostAggregator, Error, LlmAnalysis, LlmFallback, LlmRequest, NameDictionary,
    NotificationSink, Pattern, PatternLearningLog, Result, Template, TemplateApplyOutcome, TemplateStore,
    TraceEnvelope, TraceSink,
};
use tracing::info;

/// Holds `Template`s by id; `apply_patterns` rejects the whole batch on an
/// optimistic-concurrency mismatch rather than partially applying it.
#[derive(Default)]
pub struct InMemoryTemplateStore {
    templates: DashMap<String, Template>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, template: Template) {
        self.templates.insert(template.id.clone(), template);
    }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn load_template(&self, template_id: &str) -> Result<Template> {
        self.templates
            .get(template_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::TemplateNotFound(template_id.to_string()))
    }

    async fn apply_patterns(
        &self,
        template_id: &str,
        patterns: &[Pattern],
        expected_version: u32,
    ) -> Result<TemplateApplyOutcome> {
        let mut entry = self
            .templates
            .get_mut(template_id)
            .ok_or_else(|| Error::TemplateNotFound(template_id.to_string()))?;

        if entry.version != expected_version {
            return Ok(TemplateApplyOutcome { applied: Vec::new(), rejected: patterns.to_vec() });
        }

        entry.version += 1;
        Ok(TemplateApplyOutcome { applied: patterns.to_vec(), rejected: Vec::new() })
    }
}

#[derive(Default)]
pub struct InMemoryCompanyStore {
    companies: DashMap<String, CompanyProfile>,
}

impl InMemoryCompanyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, company: CompanyProfile) {
        self.companies.insert(company.id.clone(), company);
    }
}

#[async_trait]
impl CompanyStore for InMemoryCompanyStore {
    async fn load_company(&self, company_id: &str) -> Result<CompanyProfile> {
        self.companies
            .get(company_id)
            .map(|entry| entry.clone())
            .ok_or_else(|| Error::CompanyNotFound(company_id.to_string()))
    }
}

/// Never recognizes anything. A real deployment wires a vendor name
/// dictionary (census/phonebook-backed); this is the null object that
/// makes the preprocessor's name-extraction stage degrade gracefully
/// without one configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNameDictionary;

#[async_trait]
impl NameDictionary for NullNameDictionary {
    async fn is_first_name(&self, _s: &str) -> bool {
        false
    }

    async fn is_last_name(&self, _s: &str) -> bool {
        false
    }
}

/// A fixed, low-confidence non-match. Stands in for a real vendor LLM
/// client (Non-goal); exists only so the cascade has something to call at
/// Tier 3 in demos and integration tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockLlmFallback;

#[async_trait]
impl LlmFallback for MockLlmFallback {
    async fn analyze(&self, request: LlmRequest) -> Result<LlmAnalysis> {
        Ok(LlmAnalysis {
            success: true,
            matched: false,
            scenario_id: None,
            confidence: 0.0,
            rationale: format!("mock fallback: no vendor LLM configured for '{}'", request.utterance),
            patterns: Vec::new(),
            tokens: 0,
            cost: 0.0,
            latency_ms: 0,
        })
    }
}

#[derive(Default)]
pub struct InMemoryCostAggregator {
    spend: DashMap<(String, String), f64>,
}

impl InMemoryCostAggregator {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CostAggregator for InMemoryCostAggregator {
    async fn current_spend(&self, template_id: &str, month: &str) -> Result<f64> {
        Ok(*self.spend.get(&(template_id.to_string(), month.to_string())).map(|v| *v).as_ref().unwrap_or(&0.0))
    }

    async fn record_call(&self, template_id: &str, month: &str, cost: f64) -> Result<()> {
        *self.spend.entry((template_id.to_string(), month.to_string())).or_insert(0.0) += cost;
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullPatternLearningLog;

#[async_trait]
impl PatternLearningLog for NullPatternLearningLog {
    async fn enqueue(&self, _template_id: &str, _patterns: Vec<Pattern>) -> Result<()> {
        Ok(())
    }
}

/// Logs every trace envelope at `info` via `tracing` rather than shipping
/// it to a real audit sink. Mirrors the teacher's posture of always having
/// *some* sink behind an observability trait, never a silent no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingTraceSink;

#[async_trait]
impl TraceSink for LoggingTraceSink {
    async fn emit(&self, envelope: &TraceEnvelope) {
        for event in &envelope.events {
            info!(
                stage = %event.stage,
                event_type = %event.event_type,
                status = ?event.status,
                data = %event.data,
                "trace event"
            );
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotificationSink;

#[async_trait]
impl NotificationSink for LoggingNotificationSink {
    async fn alert(&self, alert: Alert) {
        tracing::warn!(code = %alert.code, severity = ?alert.severity, title = %alert.title, message = %alert.message, "alert");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use receptionist_core::{BehaviorProfile, VoiceSettings};
    use std::collections::HashMap;

    fn template(id: &str, version: u32) -> Template {
        Template {
            id: id.to_string(),
            version,
            scenarios: vec![],
            fillers: Default::default(),
            urgency_keywords: HashMap::new(),
            synonyms: HashMap::new(),
            intent_keywords: HashMap::new(),
            thresholds: Default::default(),
            category_fillers: HashMap::new(),
            category_synonyms: HashMap::new(),
            context_patterns: vec![],
            greetings: vec![],
            custom_entity_patterns: vec![],
            corrections: vec![],
        }
    }

    #[tokio::test]
    async fn template_store_round_trips_an_inserted_template() {
        let store = InMemoryTemplateStore::new();
        store.insert(template("t1", 1));
        let loaded = store.load_template("t1").await.unwrap();
        assert_eq!(loaded.id, "t1");
    }

    #[tokio::test]
    async fn template_store_rejects_missing_template() {
        let store = InMemoryTemplateStore::new();
        assert!(store.load_template("nope").await.is_err());
    }

    #[tokio::test]
    async fn apply_patterns_rejects_all_on_version_mismatch() {
        let store = InMemoryTemplateStore::new();
        store.insert(template("t1", 2));
        let outcome = store.apply_patterns("t1", &[], 1).await.unwrap();
        assert!(outcome.applied.is_empty());
    }

    #[tokio::test]
    async fn cost_aggregator_accumulates_across_calls() {
        let agg = InMemoryCostAggregator::new();
        agg.record_call("t1", "2026-07", 1.5).await.unwrap();
        agg.record_call("t1", "2026-07", 0.5).await.unwrap();
        assert_eq!(agg.current_spend("t1", "2026-07").await.unwrap(), 2.0);
    }

    #[tokio::test]
    async fn company_store_round_trips_an_inserted_company() {
        let store = InMemoryCompanyStore::new();
        store.insert(CompanyProfile {
            id: "acme".to_string(),
            name: "Acme".to_string(),
            custom_fillers: vec![],
            variables: HashMap::new(),
            voice: VoiceSettings::default(),
            behavior: BehaviorProfile::default(),
            conversation_style: "balanced".to_string(),
            acknowledgment_overrides: HashMap::new(),
        });
        let loaded = store.load_company("acme").await.unwrap();
        assert_eq!(loaded.name, "Acme");
    }
}
