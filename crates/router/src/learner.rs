//! C4 — PatternLearner. Folds patterns extracted by Tier 3 into the active
//! template's rule structures so a repeat utterance is served by Tier 1.
//! Spec §4.4.

use receptionist_core::{Pattern, PatternKind, Template, TemplateApplyOutcome, TemplateStore, UrgencyKeyword};
use tracing::{info, warn};

/// Splits `patterns` into ones confident enough to apply now and ones
/// stored only as suggestions (spec: "patterns below a configured floor
/// ... are stored as suggestions, not applied").
pub fn partition_by_confidence(patterns: Vec<Pattern>, floor: f64) -> (Vec<Pattern>, Vec<Pattern>) {
    patterns.into_iter().partition(|p| p.confidence >= floor)
}

/// Sends the confident subset of `patterns` to the template store with
/// optimistic concurrency. A stale-write conflict is logged and the whole
/// batch is dropped, not retried (spec §4.4, §7 `WritebackConflict`).
pub async fn learn(
    store: &dyn TemplateStore,
    template: &Template,
    patterns: Vec<Pattern>,
    confidence_floor: f64,
) -> TemplateApplyOutcome {
    let (applicable, suggestions) = partition_by_confidence(patterns, confidence_floor);
    if !suggestions.is_empty() {
        info!(template_id = %template.id, count = suggestions.len(), "patterns below confidence floor stored as suggestions only");
    }
    if applicable.is_empty() {
        return TemplateApplyOutcome::default();
    }

    match store.apply_patterns(&template.id, &applicable, template.version).await {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(template_id = %template.id, error = %err, "pattern writeback conflict, dropping batch");
            TemplateApplyOutcome {
                applied: Vec::new(),
                rejected: applicable,
            }
        }
    }
}

/// Pure merge of a single pattern into a template's rule structures.
/// Case-insensitive dedup; never removes or lowers an existing weight
/// (spec §4.4 "Application rules").
pub fn merge_pattern_into_template(template: &mut Template, pattern: &Pattern) {
    match &pattern.kind {
        PatternKind::Synonym { canonical, aliases } => {
            let entry = template.synonyms.entry(canonical.clone()).or_default();
            let existing_lower: std::collections::HashSet<String> = entry.iter().map(|a| a.to_lowercase()).collect();
            for alias in aliases {
                if !existing_lower.contains(&alias.to_lowercase()) {
                    entry.push(alias.clone());
                }
            }
        }
        PatternKind::Filler { word } => {
            let exists = template.fillers.iter().any(|f| f.eq_ignore_ascii_case(word));
            if !exists {
                template.fillers.insert(word.clone());
            }
        }
        PatternKind::Urgency { word, weight, category } => {
            let clamped = weight.clamp(0.0, 1.0);
            let category = parse_category(category);
            template
                .urgency_keywords
                .entry(word.clone())
                .and_modify(|existing| {
                    if clamped > existing.weight {
                        existing.weight = clamped;
                    }
                })
                .or_insert(UrgencyKeyword { weight: clamped, category });
        }
        PatternKind::TriggerExpansion { scenario_id, triggers } => {
            if let Some(scenario) = template.scenarios.iter_mut().find(|s| &s.id == scenario_id) {
                let existing_lower: std::collections::HashSet<String> =
                    scenario.positive_triggers.iter().map(|t| t.to_lowercase()).collect();
                for trigger in triggers {
                    if !existing_lower.contains(&trigger.to_lowercase()) {
                        scenario.positive_triggers.push(trigger.clone());
                    }
                }
            }
        }
        PatternKind::NegativeTrigger { scenario_id, phrases } => {
            if let Some(scenario) = template.scenarios.iter_mut().find(|s| &s.id == scenario_id) {
                let existing_lower: std::collections::HashSet<String> =
                    scenario.negative_triggers.iter().map(|t| t.to_lowercase()).collect();
                for phrase in phrases {
                    if !existing_lower.contains(&phrase.to_lowercase()) {
                        scenario.negative_triggers.push(phrase.clone());
                    }
                }
            }
        }
    }
}

fn parse_category(raw: &str) -> receptionist_core::UrgencyCategory {
    if raw.eq_ignore_ascii_case("emergency") {
        receptionist_core::UrgencyCategory::Emergency
    } else {
        receptionist_core::UrgencyCategory::General
    }
}
