//! C7 — OptimizationEngine default and the Router's error-handling policy
//! around it. Spec §4.7: "The Router treats an unreachable engine as
//! `useLLM=true`."

use async_trait::async_trait;
use receptionist_core::{ConversationContext, OptimizationDecision, OptimizationPolicy, Result};

/// The trivial policy: every turn goes to the LLM. A reasonable default
/// for templates with no cache or proven-path table configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysUseLlmPolicy;

#[async_trait]
impl OptimizationPolicy for AlwaysUseLlmPolicy {
    async fn should_use_llm(&self, _utterance: &str, _context: &ConversationContext) -> Result<OptimizationDecision> {
        Ok(OptimizationDecision {
            use_llm: true,
            reason: "default policy: no proven-path cache configured".to_string(),
            forced_scenario_id: None,
            cached_response: None,
        })
    }
}

/// Consults `policy`; an error (unreachable collaborator) is treated as
/// `useLLM=true` rather than propagated.
pub async fn consult(policy: &dyn OptimizationPolicy, utterance: &str, context: &ConversationContext) -> OptimizationDecision {
    match policy.should_use_llm(utterance, context).await {
        Ok(decision) => decision,
        Err(_) => OptimizationDecision {
            use_llm: true,
            reason: "optimization engine unreachable, defaulting to useLLM=true".to_string(),
            forced_scenario_id: None,
            cached_response: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingPolicy;
    #[async_trait]
    impl OptimizationPolicy for FailingPolicy {
        async fn should_use_llm(&self, _utterance: &str, _context: &ConversationContext) -> Result<OptimizationDecision> {
            Err(receptionist_core::Error::Fatal("unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn default_policy_always_uses_llm() {
        let decision = consult(&AlwaysUseLlmPolicy, "hello", &ConversationContext::default()).await;
        assert!(decision.use_llm);
    }

    #[tokio::test]
    async fn unreachable_policy_defaults_to_use_llm() {
        let decision = consult(&FailingPolicy, "hello", &ConversationContext::default()).await;
        assert!(decision.use_llm);
    }
}
