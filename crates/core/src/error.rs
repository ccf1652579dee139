//! Crate-wide error type.
//!
//! Mirrors the teacher's per-crate `thiserror`-derived enum convention
//! (`agent/src/lib.rs::AgentError`, `config/src/lib.rs::ConfigError`): one
//! variant per failure kind named after spec §7's error kinds, with `From`
//! bridges added by downstream crates as they introduce their own errors.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("input invalid: {0}")]
    InputInvalid(String),

    #[error("stage failed transiently: {stage}: {reason}")]
    StageTransient { stage: String, reason: String },

    #[error("llm unavailable: {0}")]
    LlmUnavailable(String),

    #[error("budget exhausted for template {template_id}")]
    BudgetExhausted { template_id: String },

    #[error("no acceptable scenario")]
    NoAcceptableScenario,

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("writeback conflict applying pattern: {0}")]
    WritebackConflict(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("company not found: {0}")]
    CompanyNotFound(String),

    #[error("fatal: {0}")]
    Fatal(String),
}
