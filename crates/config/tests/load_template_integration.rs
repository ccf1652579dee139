//! `load_template`/`load_company` exercised against real files on disk,
//! parse-then-validate end to end (spec administrative collaborator),
//! as opposed to `loader.rs`'s in-memory `parse_template` unit tests.

use receptionist_config::{load_company, load_template, ConfigError};
use std::io::Write;

fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("receptionist-config-test-{name}-{:p}", contents.as_ptr()));
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

const VALID_TEMPLATE: &str = r#"
id: "hvac-default"
version: 1
scenarios:
  - id: "book-visit"
    name: "Book a visit"
    positive_triggers: ["schedule a visit", "book an appointment"]
    negative_triggers: []
    regex_triggers: []
    priority: 10
    min_confidence: null
    categories: ["booking"]
    status: live
    languages: ["en"]
    channels: ["voice"]
    cooldown_secs: 0
    quick_replies: ["Sure, let's get you booked."]
    full_replies: ["I can schedule that visit for you. What day works best?"]
    preconditions: []
fillers: ["um", "like"]
urgency_keywords:
  fire: { weight: 0.5, category: emergency }
synonyms:
  thermostat: ["thingy", "box on wall"]
intent_keywords:
  BOOK: ["schedule", "book"]
thresholds:
  tier1: 0.80
  tier2: 0.60
  min_confidence_default: 0.45
  bm25_weight: 0.40
  semantic_weight: 0.30
  regex_weight: 0.20
  context_weight: 0.10
  bm25_k1: 1.5
  bm25_b: 0.75
  max_scenarios: 1000
  stage_timeout_ms: 50
  total_timeout_ms: 5000
  monthly_budget_limit: 500.0
  learning_confidence_floor: 0.75
"#;

const DUPLICATE_SCENARIO_TEMPLATE: &str = r#"
id: "hvac-default"
version: 1
scenarios:
  - id: "book-visit"
    name: "Book a visit"
    positive_triggers: ["schedule a visit"]
    negative_triggers: []
    regex_triggers: []
    priority: 10
    min_confidence: null
    categories: ["booking"]
    status: live
    languages: ["en"]
    channels: ["voice"]
    cooldown_secs: 0
    quick_replies: ["Sure."]
    full_replies: []
    preconditions: []
  - id: "book-visit"
    name: "Book a visit again"
    positive_triggers: ["schedule another visit"]
    negative_triggers: []
    regex_triggers: []
    priority: 5
    min_confidence: null
    categories: ["booking"]
    status: live
    languages: ["en"]
    channels: ["voice"]
    cooldown_secs: 0
    quick_replies: ["Sure."]
    full_replies: []
    preconditions: []
fillers: []
urgency_keywords: {}
synonyms: {}
intent_keywords: {}
thresholds:
  tier1: 0.80
  tier2: 0.60
  min_confidence_default: 0.45
  bm25_weight: 0.40
  semantic_weight: 0.30
  regex_weight: 0.20
  context_weight: 0.10
  bm25_k1: 1.5
  bm25_b: 0.75
  max_scenarios: 1000
  stage_timeout_ms: 50
  total_timeout_ms: 5000
  monthly_budget_limit: 500.0
  learning_confidence_floor: 0.75
"#;

const VALID_COMPANY: &str = r#"
id: "acme"
name: "Acme HVAC"
custom_fillers: []
variables: {}
voice:
  voice_id: "en-US-default"
  twilio_endpoint: null
behavior:
  mode: hybrid
  humor_level: 2
  empathy_level: 3
  directness_level: 2
  emergency_keywords: ["gas leak", "no heat"]
  billing_conflict_keywords: []
  joke_keywords: []
  trade_overrides: {}
  safety_strictness: 3
conversation_style: "balanced"
acknowledgment_overrides: {}
"#;

#[test]
fn loads_and_validates_a_well_formed_template_from_disk() {
    let path = write_temp("valid", VALID_TEMPLATE);
    let template = load_template(&path).unwrap();
    assert_eq!(template.id, "hvac-default");
    assert_eq!(template.scenarios.len(), 1);
    std::fs::remove_file(&path).ok();
}

#[test]
fn rejects_a_template_with_duplicate_scenario_ids() {
    let path = write_temp("dup", DUPLICATE_SCENARIO_TEMPLATE);
    let err = load_template(&path).unwrap_err();
    match err {
        ConfigError::InvalidTemplate(reason) => assert!(reason.contains("duplicate")),
        other => panic!("expected InvalidTemplate, got {other:?}"),
    }
    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_file_reports_file_not_found() {
    let err = load_template("/nonexistent/path/does-not-exist.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn loads_a_well_formed_company_profile_from_disk() {
    let path = write_temp("company", VALID_COMPANY);
    let company = load_company(&path).unwrap();
    assert_eq!(company.id, "acme");
    assert_eq!(company.behavior.emergency_keywords, vec!["gas leak", "no heat"]);
    std::fs::remove_file(&path).ok();
}
