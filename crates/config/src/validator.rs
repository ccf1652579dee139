//! Fail-fast structural validation over a parsed `Template`, so the router
//! never has to guard against malformed config mid-Turn. Grounded on
//! `config/src/domain/validator.rs`.

use receptionist_core::Template;
use std::collections::HashSet;

/// Returns a human-readable reason on the first violation found. Multiple
/// violations are not accumulated — the administrative collaborator is
/// expected to fix and re-submit, mirroring the teacher's validator, which
/// also returns on first failure for a given config section.
pub fn validate_template(template: &Template) -> Result<(), String> {
    if template.scenarios.is_empty() {
        return Err("template has no scenarios".to_string());
    }

    let mut seen_ids = HashSet::new();
    for scenario in &template.scenarios {
        if !seen_ids.insert(scenario.id.as_str()) {
            return Err(format!("duplicate scenario id: {}", scenario.id));
        }
        if let Some(min_conf) = scenario.min_confidence {
            if !(0.0..=1.0).contains(&min_conf) {
                return Err(format!(
                    "scenario {} has min_confidence outside [0,1]: {}",
                    scenario.id, min_conf
                ));
            }
        }
        if scenario.priority < 0 {
            return Err(format!(
                "scenario {} has a negative priority: {}",
                scenario.id, scenario.priority
            ));
        }
        for pattern in &scenario.regex_triggers {
            if let Err(e) = regex::Regex::new(pattern) {
                return Err(format!(
                    "scenario {} has an invalid regex trigger {:?}: {}",
                    scenario.id, pattern, e
                ));
            }
        }
        if scenario.quick_replies.is_empty() && scenario.full_replies.is_empty() {
            return Err(format!(
                "scenario {} has neither quick_replies nor full_replies",
                scenario.id
            ));
        }
    }

    let t = &template.thresholds;
    for (name, value) in [
        ("tier1", t.tier1),
        ("tier2", t.tier2),
        ("min_confidence_default", t.min_confidence_default),
        ("bm25_weight", t.bm25_weight),
        ("semantic_weight", t.semantic_weight),
        ("regex_weight", t.regex_weight),
        ("context_weight", t.context_weight),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(format!("threshold {name} must be in [0,1], got {value}"));
        }
    }
    let weight_sum = t.bm25_weight + t.semantic_weight + t.regex_weight + t.context_weight;
    if (weight_sum - 1.0).abs() > 1e-6 {
        return Err(format!(
            "matcher weights must sum to 1.0, got {weight_sum}"
        ));
    }

    Ok(())
}
