//! Budget guard — denies Tier 3 when the template's monthly LLM spend has
//! reached its configured limit. Spec §4.3, §8 ("Budget enforcement").

use chrono::Utc;
use receptionist_core::{CostAggregator, Template};

/// Current UTC year-month as `YYYY-MM`, the unit the cost aggregator keys on.
pub fn current_month() -> String {
    Utc::now().format("%Y-%m").to_string()
}

/// `true` when spend has reached or exceeded the template's monthly limit —
/// the caller must deny the LLM call and fall back to the best Tier-2
/// candidate with `error=budget_exhausted`.
pub async fn is_exhausted(aggregator: &dyn CostAggregator, template: &Template, month: &str) -> bool {
    match aggregator.current_spend(&template.id, month).await {
        Ok(spend) => spend >= template.thresholds.monthly_budget_limit,
        // An unreachable aggregator fails closed: treat it as exhausted
        // rather than risk an unbounded LLM bill.
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use receptionist_core::{Result, ThresholdsConfig};
    use std::collections::HashMap;

    struct FixedAggregator(f64);

    #[async_trait]
    impl CostAggregator for FixedAggregator {
        async fn current_spend(&self, _template_id: &str, _month: &str) -> Result<f64> {
            Ok(self.0)
        }
        async fn record_call(&self, _template_id: &str, _month: &str, _cost: f64) -> Result<()> {
            Ok(())
        }
    }

    fn template(limit: f64) -> Template {
        let mut thresholds = ThresholdsConfig::default();
        thresholds.monthly_budget_limit = limit;
        Template {
            id: "t".to_string(),
            version: 1,
            scenarios: vec![],
            fillers: Default::default(),
            urgency_keywords: HashMap::new(),
            synonyms: HashMap::new(),
            intent_keywords: HashMap::new(),
            thresholds,
            category_fillers: HashMap::new(),
            category_synonyms: HashMap::new(),
            context_patterns: vec![],
            greetings: vec![],
            custom_entity_patterns: vec![],
            corrections: vec![],
        }
    }

    #[tokio::test]
    async fn denies_when_spend_meets_the_limit() {
        let aggregator = FixedAggregator(500.0);
        assert!(is_exhausted(&aggregator, &template(500.0), "2026-07").await);
    }

    #[tokio::test]
    async fn allows_when_spend_is_below_the_limit() {
        let aggregator = FixedAggregator(10.0);
        assert!(!is_exhausted(&aggregator, &template(500.0), "2026-07").await);
    }
}
