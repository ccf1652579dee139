//! C3 (router cascade) + C4 (pattern learning) + C7 (optimization default)
//! + C8 (trace emission). The single entry point is `Router::route`. See
//! spec §4.3–§4.4, §4.7–§4.8.

pub mod budget;
pub mod error;
pub mod learner;
pub mod optimization;
pub mod prewarm;
pub mod tier1;
pub mod tier2;
pub mod tier3;

pub use error::{Result, RouterError};

use receptionist_core::{
    Alert, AlertSeverity, CompanyStore, CostAggregator, ErrorKind, LlmFallback, LlmPrewarm, LlmRequest,
    NameDictionary, NotificationSink, OptimizationPolicy, Pattern, PatternLearningLog, PrewarmHandle, RoutedTurn,
    SelectionReason, TemplateStore, Tier, TraceEnvelope, TraceSink, TraceStatus, Turn,
};
use receptionist_preprocessor::Preprocessor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::warn;

static PREWARM_HANDLE_SEQ: AtomicU64 = AtomicU64::new(1);

/// Wires the eight collaborator capabilities (spec §6) around the pure C1–C4
/// modules. Cheap to clone — everything inside is an `Arc`.
#[derive(Clone)]
pub struct Router {
    template_store: Arc<dyn TemplateStore>,
    company_store: Arc<dyn CompanyStore>,
    name_dictionary: Option<Arc<dyn NameDictionary>>,
    llm: Arc<dyn LlmFallback>,
    prewarm: Option<Arc<dyn LlmPrewarm>>,
    cost_aggregator: Arc<dyn CostAggregator>,
    optimization_policy: Arc<dyn OptimizationPolicy>,
    pattern_log: Arc<dyn PatternLearningLog>,
    trace_sink: Arc<dyn TraceSink>,
    notification_sink: Option<Arc<dyn NotificationSink>>,
    preprocessor: Preprocessor,
}

impl Router {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        template_store: Arc<dyn TemplateStore>,
        company_store: Arc<dyn CompanyStore>,
        llm: Arc<dyn LlmFallback>,
        cost_aggregator: Arc<dyn CostAggregator>,
        optimization_policy: Arc<dyn OptimizationPolicy>,
        pattern_log: Arc<dyn PatternLearningLog>,
        trace_sink: Arc<dyn TraceSink>,
    ) -> Self {
        Self {
            template_store,
            company_store,
            name_dictionary: None,
            llm,
            prewarm: None,
            cost_aggregator,
            optimization_policy,
            pattern_log,
            trace_sink,
            notification_sink: None,
            preprocessor: Preprocessor::new(),
        }
    }

    pub fn with_name_dictionary(mut self, dict: Arc<dyn NameDictionary>) -> Self {
        self.name_dictionary = Some(dict);
        self
    }

    pub fn with_prewarm(mut self, prewarm: Arc<dyn LlmPrewarm>) -> Self {
        self.prewarm = Some(prewarm);
        self
    }

    pub fn with_notification_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.notification_sink = Some(sink);
        self
    }

    /// Drives a single Turn through the full cascade. Never returns an
    /// `Err` to the caller: every failure mode is converted into a
    /// `RoutedTurn` with a populated `error` field (spec §4.3, §7). Emits
    /// the accumulated trace envelope to the trace sink before returning.
    pub async fn route(&self, turn: Turn) -> RoutedTurn {
        let result = self.route_inner(turn).await;
        self.trace_sink.emit(&result.trace).await;
        result
    }

    async fn route_inner(&self, turn: Turn) -> RoutedTurn {
        let mut trace = TraceEnvelope::default();
        let started = Instant::now();

        if turn.raw_text.trim().is_empty() {
            trace.emit("router", "INPUT_INVALID", TraceStatus::Error, "empty utterance".to_string());
            let mut result = RoutedTurn::no_match(trace, SelectionReason::Other("empty utterance".to_string()));
            result.error = Some(ErrorKind::InputInvalid);
            return result;
        }

        let Some(template_id) = turn.template_id.clone() else {
            trace.emit("router", "INPUT_INVALID", TraceStatus::Error, "missing template_id".to_string());
            let mut result = RoutedTurn::no_match(trace, SelectionReason::Other("missing template_id".to_string()));
            result.error = Some(ErrorKind::InputInvalid);
            return result;
        };

        let template = match self.template_store.load_template(&template_id).await {
            Ok(t) => t,
            Err(err) => {
                trace.emit("router", "TEMPLATE_LOAD_FAILED", TraceStatus::Error, err.to_string());
                self.alert_fatal(&template_id, &err.to_string()).await;
                let mut result = RoutedTurn::no_match(trace, SelectionReason::Other(err.to_string()));
                result.error = Some(ErrorKind::Fatal);
                return result;
            }
        };

        let company_id = turn.company_id.clone().unwrap_or_default();
        let company = match self.company_store.load_company(&company_id).await {
            Ok(c) => c,
            Err(err) => {
                trace.emit("router", "COMPANY_LOAD_FAILED", TraceStatus::Error, err.to_string());
                let mut result = RoutedTurn::no_match(trace, SelectionReason::Other(err.to_string()));
                result.error = Some(ErrorKind::Fatal);
                return result;
            }
        };

        let context = turn.context.clone().unwrap_or_default();
        let deadline = Duration::from_millis(template.thresholds.total_timeout_ms);

        let name_dict_ref = self.name_dictionary.as_deref();
        let preprocessed = self.preprocessor.process(&turn, &template, &company, name_dict_ref).await;
        trace.emit(
            "preprocessor",
            "PREPROCESSED",
            TraceStatus::Ok,
            format!("normalized={}", preprocessed.normalized),
        );

        let tier1_outcome = tier1::run(&preprocessed, &template, &context, &turn.language, turn.channel);
        trace.emit(
            "matcher",
            "T1_SCORED",
            TraceStatus::Ok,
            format!("candidates={}", tier1_outcome.candidates.len()),
        );

        if tier1_outcome.candidates.is_empty() {
            trace.emit("router", "NO_ELIGIBLE_SCENARIOS", TraceStatus::Degraded, String::new());
            return RoutedTurn::no_match(trace, SelectionReason::NoEligibleScenarios);
        }

        if let Some(candidate) = &tier1_outcome.accepted {
            let is_exact = candidate.is_exact_match;
            let reason = if is_exact {
                trace.emit("router", "EXACT_MATCH_BYPASS", TraceStatus::Ok, candidate.scenario.id.clone());
                SelectionReason::ExactMatchBypass
            } else {
                trace.emit("router", "T1_ACCEPT", TraceStatus::Ok, candidate.scenario.id.clone());
                SelectionReason::Tier1Accepted
            };
            let tier = if is_exact { Tier::Bypass } else { Tier::Tier1 };
            return self.accept(tier, reason, candidate.clone(), trace, Vec::new());
        }

        let best_t1 = tier1_outcome
            .candidates
            .iter()
            .find(|c| !c.blocked)
            .cloned();

        // Pre-warm: fire in parallel while Tier 2 is evaluated.
        let prewarm_handle = if let Some(prewarm) = &self.prewarm {
            let key = prewarm::prewarm_key(&company_id, &turn.raw_text);
            let request = self.build_llm_request(&turn, &template, &context);
            match prewarm.start(&key, request).await {
                Ok(handle) => Some(handle),
                Err(_) => None,
            }
        } else {
            None
        };

        let tier2_candidate = best_t1
            .as_ref()
            .map(|c| tier2::boost(c, &context))
            .filter(|boosted| tier2::accepts(boosted, &template, &context));

        if let Some(candidate) = tier2_candidate {
            trace.emit("router", "T2_ACCEPT", TraceStatus::Ok, candidate.scenario.id.clone());
            if let (Some(prewarm), Some(handle)) = (&self.prewarm, prewarm_handle) {
                prewarm.cancel(handle).await;
            }
            return self.accept(Tier::Tier2, SelectionReason::Tier2Accepted, candidate, trace, Vec::new());
        }

        if started.elapsed() >= deadline {
            trace.emit("router", "DEADLINE_EXCEEDED", TraceStatus::Degraded, String::new());
            return self.fallback_or_miss(best_t1, trace, SelectionReason::AllTiersMissed);
        }

        // OptimizationEngine short-circuit.
        let decision = optimization::consult(self.optimization_policy.as_ref(), &turn.raw_text, &context).await;
        if !decision.use_llm {
            if let Some(forced_id) = &decision.forced_scenario_id {
                if let Some(scenario) = template.find_scenario(forced_id) {
                    trace.emit("router", "OPT_FORCED_ACCEPT", TraceStatus::Ok, scenario.id.clone());
                    let candidate = receptionist_core::MatchCandidate {
                        scenario: scenario.clone(),
                        subscores: Default::default(),
                        score: 0.90,
                        confidence: 0.90,
                        blocked: false,
                        needs_clarifier: false,
                        clarifier_prompt: None,
                        is_exact_match: false,
                    };
                    if let (Some(prewarm), Some(handle)) = (&self.prewarm, prewarm_handle) {
                        prewarm.cancel(handle).await;
                    }
                    return self.accept(Tier::Tier2, SelectionReason::Tier2ForcedByOptimizer, candidate, trace, Vec::new());
                }
            }
            if let Some(cached) = &decision.cached_response {
                trace.emit("router", "OPT_CACHE_ACCEPT", TraceStatus::Ok, String::new());
                if let (Some(prewarm), Some(handle)) = (&self.prewarm, prewarm_handle) {
                    prewarm.cancel(handle).await;
                }
                let mut result = RoutedTurn::no_match(trace, SelectionReason::Tier2CachedByOptimizer);
                result.tier = Tier::Tier2;
                result.matched = true;
                result.confidence = 0.95;
                result.reply = Some(cached.clone());
                return result;
            }
        }

        // Budget guard.
        let month = budget::current_month();
        if budget::is_exhausted(self.cost_aggregator.as_ref(), &template, &month).await {
            trace.emit("router", "BUDGET_EXHAUSTED", TraceStatus::Degraded, String::new());
            if let (Some(prewarm), Some(handle)) = (&self.prewarm, prewarm_handle) {
                prewarm.cancel(handle).await;
            }
            let mut result = self.fallback_or_miss(best_t1, trace, SelectionReason::BudgetExhausted);
            result.error = Some(ErrorKind::BudgetExhausted);
            return result;
        }

        // Tier 3.
        let request = self.build_llm_request(&turn, &template, &context);
        let prewarm_pair = match (&self.prewarm, prewarm_handle) {
            (Some(prewarm), Some(handle)) => Some((prewarm.as_ref(), handle)),
            _ => None,
        };

        match tier3::run(self.llm.as_ref(), prewarm_pair, request, &template, template.thresholds.tier2).await {
            Ok(outcome) => {
                let cost = receptionist_core::CostBreakdown {
                    llm_calls: 1,
                    llm_tokens: outcome.tokens,
                    llm_cost: outcome.cost,
                };
                let _ = self
                    .cost_aggregator
                    .record_call(&template.id, &month, outcome.cost)
                    .await;

                match outcome.candidate {
                    Some(candidate) => {
                        trace.emit("router", "T3_ACCEPT", TraceStatus::Ok, candidate.scenario.id.clone());
                        let learned = self.learn_patterns(&template, outcome.patterns).await;
                        let mut result =
                            self.accept(Tier::Tier3, SelectionReason::Tier3Accepted, candidate, trace, learned);
                        result.cost = cost;
                        result
                    }
                    None => {
                        trace.emit("router", "T3_REJECT", TraceStatus::Degraded, String::new());
                        let mut result = RoutedTurn::no_match(trace, SelectionReason::AllTiersMissed);
                        result.error = Some(ErrorKind::NoAcceptableScenario);
                        result.cost = cost;
                        result
                    }
                }
            }
            Err(err) => {
                trace.emit("router", "T3_ERROR", TraceStatus::Error, err.to_string());
                let mut result = self.fallback_or_miss(best_t1, trace, SelectionReason::Other(err.to_string()));
                result.error = Some(ErrorKind::LlmUnavailable);
                result
            }
        }
    }

    fn accept(
        &self,
        tier: Tier,
        reason: SelectionReason,
        candidate: receptionist_core::MatchCandidate,
        trace: TraceEnvelope,
        patterns_learned: Vec<Pattern>,
    ) -> RoutedTurn {
        let reply = select_reply(&candidate.scenario);
        RoutedTurn {
            tier,
            matched: true,
            confidence: candidate.confidence,
            reply,
            scenario: Some(candidate.scenario),
            patterns_learned,
            cost: Default::default(),
            stage_timings_micros: Default::default(),
            trace,
            selection_reason: reason,
            error: None,
        }
    }

    fn fallback_or_miss(
        &self,
        best_t2: Option<receptionist_core::MatchCandidate>,
        trace: TraceEnvelope,
        reason: SelectionReason,
    ) -> RoutedTurn {
        match best_t2 {
            Some(candidate) => {
                let boosted = tier2::boost(&candidate, &Default::default());
                self.accept(Tier::Tier2, reason, boosted, trace, Vec::new())
            }
            None => RoutedTurn::no_match(trace, reason),
        }
    }

    fn build_llm_request(&self, turn: &Turn, template: &receptionist_core::Template, context: &receptionist_core::ConversationContext) -> LlmRequest {
        LlmRequest {
            utterance: turn.raw_text.clone(),
            scenario_ids: template.scenarios.iter().map(|s| s.id.clone()).collect(),
            context: context.clone(),
            system_prompt: "Select the best-matching scenario for this caller utterance.".to_string(),
            deadline_ms: template.thresholds.total_timeout_ms,
        }
    }

    async fn learn_patterns(&self, template: &receptionist_core::Template, patterns: Vec<Pattern>) -> Vec<Pattern> {
        if patterns.is_empty() {
            return Vec::new();
        }
        if let Err(err) = self.pattern_log.enqueue(&template.id, patterns.clone()).await {
            warn!(template_id = %template.id, error = %err, "failed to enqueue learned patterns");
            return Vec::new();
        }
        let outcome = learner::learn(
            self.template_store.as_ref(),
            template,
            patterns,
            template.thresholds.learning_confidence_floor,
        )
        .await;
        outcome.applied
    }

    async fn alert_fatal(&self, template_id: &str, message: &str) {
        if let Some(sink) = &self.notification_sink {
            sink.alert(Alert {
                code: "router.fatal".to_string(),
                severity: AlertSeverity::Critical,
                title: "Router could not load template".to_string(),
                message: message.to_string(),
                details: Some(template_id.to_string()),
            })
            .await;
        }
    }
}

/// First of `fullReplies`, else first of `quickReplies`, else `None` (spec
/// §9: the distillation's ambiguity, resolved explicitly this way).
fn select_reply(scenario: &receptionist_core::Scenario) -> Option<String> {
    scenario
        .full_replies
        .first()
        .or_else(|| scenario.quick_replies.first())
        .cloned()
}

/// Issues a fresh pre-warm handle id. Only used by reference `LlmPrewarm`
/// implementations that need a monotonically increasing key.
pub fn next_prewarm_handle() -> PrewarmHandle {
    PrewarmHandle(PREWARM_HANDLE_SEQ.fetch_add(1, Ordering::Relaxed))
}
