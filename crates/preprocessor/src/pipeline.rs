//! Orchestrates the five deterministic preprocessing stages (C1) into a
//! single `PreprocessorResult`. Grounded on the teacher's
//! `text_processing::pipeline::TextProcessingPipeline::process` stage
//! cascade, replacing its ML steps with the rule-based stages of spec §4.1.

use crate::{entities, filler, quality, synonyms, tokens, vocabulary};
use receptionist_core::{
    CompanyProfile, Entities, NameDictionary, PreprocessorResult, QualityVerdict, StageTiming, Template, Turn,
};
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Runs the stage cascade for a single turn. Stateless — template, company,
/// and name-dictionary inputs are supplied per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    pub async fn process(
        &self,
        turn: &Turn,
        template: &Template,
        company: &CompanyProfile,
        name_dict: Option<&dyn NameDictionary>,
    ) -> PreprocessorResult {
        let started = Instant::now();
        let total_timeout = Duration::from_millis(template.thresholds.total_timeout_ms);
        let mut timings = Vec::new();

        if started.elapsed() >= total_timeout {
            warn!(call_id = %turn.call_id, "total_timeout_ms exceeded before any stage ran");
            return disabled_result(&turn.raw_text);
        }

        // Stage 1: fillers.
        let mut filler_union: HashSet<String> = template.fillers.clone();
        filler_union.extend(company.custom_fillers.iter().cloned());
        for extra in template.category_fillers.values() {
            filler_union.extend(extra.iter().cloned());
        }
        let filler_list: Vec<String> = filler_union.iter().cloned().collect();

        let (after_fillers, t1) = run_stage("fillers", &started, || {
            filler::remove_fillers(&turn.raw_text, Some(&company.name), &filler_list, &template.greetings)
        })
        .unwrap_or_else(|err| (turn.raw_text.clone(), err));
        timings.push(t1);

        if started.elapsed() >= total_timeout {
            return partial_disabled_result(turn, after_fillers, timings);
        }

        // Stage 2: vocabulary corrections.
        let corrections = after_fillers.clone();
        let (after_vocabulary, t2) = run_stage("vocabulary", &started, || {
            vocabulary::apply_corrections(&corrections, &template.corrections)
        })
        .unwrap_or_else(|err| (after_fillers.clone(), err));
        timings.push(t2);

        if started.elapsed() >= total_timeout {
            return partial_disabled_result(turn, after_vocabulary, timings);
        }

        // Stage 3: synonym normalization.
        let all_categories: Vec<String> = template.category_synonyms.keys().cloned().collect();
        let merged_synonyms = synonyms::merge_synonym_maps(&template.synonyms, &template.category_synonyms, &all_categories);
        let vocab_text = after_vocabulary.clone();
        let synonyms_for_stage = merged_synonyms.clone();
        let (after_synonyms, t3) = run_stage("synonyms", &started, || {
            synonyms::apply_synonyms(&vocab_text, &synonyms_for_stage)
        })
        .unwrap_or_else(|err| (after_vocabulary.clone(), err));
        timings.push(t3);

        let normalized = after_synonyms.clone();

        if started.elapsed() >= total_timeout {
            return partial_disabled_result(turn, normalized, timings);
        }

        // Stage 4: tokenization and expansion.
        let token_text = normalized.clone();
        let token_fillers = filler_union.clone();
        let (original_tokens, t4a) = run_stage("tokenize", &started, || tokens::tokenize(&token_text, &token_fillers))
            .unwrap_or_else(|err| (Vec::new(), err));
        timings.push(t4a);

        let original_tokens_for_expand = original_tokens.clone();
        let context_patterns = template.context_patterns.clone();
        let (expand_result, t4b) = run_stage("token_expansion", &started, || {
            tokens::expand_tokens(&original_tokens_for_expand, &merged_synonyms, &context_patterns)
        })
        .unwrap_or_else(|err| ((original_tokens.clone(), Default::default()), err));
        timings.push(t4b);
        let (expanded_tokens, expansion_map) = expand_result;

        if started.elapsed() >= total_timeout {
            let mut result = partial_disabled_result(turn, normalized.clone(), timings);
            result.original_tokens = original_tokens;
            result.expanded_tokens = expanded_tokens;
            result.expansion_map = expansion_map;
            return result;
        }

        // Stage 5: entity extraction (async — run outside catch_unwind).
        let stage_started = Instant::now();
        let entities = entities::extract_entities(&turn.raw_text, &template.custom_entity_patterns, name_dict).await;
        let entities_micros = stage_started.elapsed().as_micros() as u64;
        debug!(stage = "entities", micros = entities_micros, "stage completed");
        timings.push(StageTiming {
            stage: "entities".to_string(),
            micros: entities_micros,
            error: None,
        });

        let quality = quality::assess_quality(&normalized);
        if !quality.passed {
            warn!(reason = %quality.reason, "quality gate failed");
        } else {
            debug!(reason = %quality.reason, "quality gate passed");
        }

        PreprocessorResult {
            raw_text: turn.raw_text.clone(),
            after_fillers,
            after_vocabulary,
            after_synonyms,
            normalized,
            original_tokens,
            expanded_tokens,
            expansion_map,
            entities,
            stage_timings: timings,
            quality,
        }
    }
}

/// Runs a synchronous stage closure, catching panics so one bad stage
/// degrades to pass-through rather than aborting the whole pipeline (spec
/// §4.1: "any exception in a stage degrades that stage to pass-through").
/// On panic, returns `Err` carrying a `StageTiming` with the error recorded;
/// the caller supplies the pass-through value.
fn run_stage<T>(
    stage: &str,
    started: &Instant,
    f: impl FnOnce() -> T + panic::UnwindSafe,
) -> Result<(T, StageTiming), StageTiming> {
    let stage_started = Instant::now();
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => {
            let micros = stage_started.elapsed().as_micros() as u64;
            debug!(stage, micros, "stage completed");
            Ok((value, StageTiming { stage: stage.to_string(), micros, error: None }))
        }
        Err(_) => {
            let _ = started.elapsed();
            let micros = stage_started.elapsed().as_micros() as u64;
            warn!(stage, "stage panicked; degraded to pass-through");
            Err(StageTiming {
                stage: stage.to_string(),
                micros,
                error: Some("stage panicked; degraded to pass-through".to_string()),
            })
        }
    }
}

fn disabled_result(raw_text: &str) -> PreprocessorResult {
    PreprocessorResult {
        raw_text: raw_text.to_string(),
        after_fillers: raw_text.to_string(),
        after_vocabulary: raw_text.to_string(),
        after_synonyms: raw_text.to_string(),
        normalized: raw_text.to_string(),
        original_tokens: Vec::new(),
        expanded_tokens: Vec::new(),
        expansion_map: Default::default(),
        entities: Entities::default(),
        stage_timings: vec![StageTiming {
            stage: "pipeline".to_string(),
            micros: 0,
            error: Some("total_timeout_ms exceeded before any stage ran".to_string()),
        }],
        quality: QualityVerdict::failed("pipeline_disabled"),
    }
}

fn partial_disabled_result(turn: &Turn, text_so_far: String, mut timings: Vec<StageTiming>) -> PreprocessorResult {
    warn!(call_id = %turn.call_id, "total_timeout_ms exceeded mid-pipeline");
    timings.push(StageTiming {
        stage: "pipeline".to_string(),
        micros: 0,
        error: Some("total_timeout_ms exceeded mid-pipeline".to_string()),
    });
    PreprocessorResult {
        raw_text: turn.raw_text.clone(),
        after_fillers: text_so_far.clone(),
        after_vocabulary: text_so_far.clone(),
        after_synonyms: text_so_far.clone(),
        normalized: text_so_far,
        original_tokens: Vec::new(),
        expanded_tokens: Vec::new(),
        expansion_map: Default::default(),
        entities: Entities::default(),
        stage_timings: timings,
        quality: QualityVerdict::failed("pipeline_disabled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use receptionist_core::{BehaviorProfile, CompanyProfile, Template, ThresholdsConfig, Turn, VoiceSettings};
    use std::collections::{HashMap, HashSet as Set};

    fn template() -> Template {
        Template {
            id: "t".to_string(),
            version: 1,
            scenarios: Vec::new(),
            fillers: ["um", "uh"].iter().map(|s| s.to_string()).collect(),
            urgency_keywords: HashMap::new(),
            synonyms: HashMap::new(),
            intent_keywords: HashMap::new(),
            thresholds: ThresholdsConfig::default(),
            category_fillers: HashMap::new(),
            category_synonyms: HashMap::new(),
            context_patterns: Vec::new(),
            greetings: vec!["hi".to_string()],
            custom_entity_patterns: Vec::new(),
            corrections: Vec::new(),
        }
    }

    fn company() -> CompanyProfile {
        CompanyProfile {
            id: "c".to_string(),
            name: "Acme".to_string(),
            custom_fillers: Vec::new(),
            variables: HashMap::new(),
            voice: VoiceSettings::default(),
            behavior: BehaviorProfile::default(),
            conversation_style: "friendly".to_string(),
            acknowledgment_overrides: HashMap::new(),
        }
    }

    #[tokio::test]
    async fn produces_a_normalized_result_and_never_mutates_raw_text() {
        let turn = Turn::new("hi um my acme heater is broken", "call-1", 0);
        let pipeline = Preprocessor::new();
        let result = pipeline.process(&turn, &template(), &company(), None).await;
        assert_eq!(result.raw_text, "hi um my acme heater is broken");
        assert!(!result.normalized.contains("acme"));
        assert!(result.tokens_monotone());
    }

    #[tokio::test]
    async fn runs_all_five_stages() {
        let turn = Turn::new("my furnace stopped working", "call-2", 0);
        let pipeline = Preprocessor::new();
        let result = pipeline.process(&turn, &template(), &company(), None).await;
        let stage_names: Set<&str> = result.stage_timings.iter().map(|t| t.stage.as_str()).collect();
        for stage in ["fillers", "vocabulary", "synonyms", "tokenize", "token_expansion", "entities"] {
            assert!(stage_names.contains(stage), "missing stage {stage}");
        }
    }

    #[tokio::test]
    async fn zero_total_timeout_produces_a_disabled_result() {
        let mut tmpl = template();
        tmpl.thresholds.total_timeout_ms = 0;
        let turn = Turn::new("my furnace stopped working", "call-3", 0);
        let pipeline = Preprocessor::new();
        let result = pipeline.process(&turn, &tmpl, &company(), None).await;
        assert_eq!(result.quality.reason, "pipeline_disabled");
    }
}
