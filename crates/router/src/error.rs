use thiserror::Error;

pub type Result<T> = std::result::Result<T, RouterError>;

/// Internal tier-level failures. Per spec §4.3/§7, none of these ever cross
/// the Router's outer boundary — `route()` always returns a `RoutedTurn`,
/// converting every variant here into a tier-miss/escalation or an `error`
/// field on the result.
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("template {0} not found")]
    TemplateNotFound(String),

    #[error("company {0} not found")]
    CompanyNotFound(String),

    #[error("llm unavailable: {0}")]
    LlmUnavailable(String),

    #[error("budget exhausted for template {template_id}")]
    BudgetExhausted { template_id: String },

    #[error("no acceptable scenario")]
    NoAcceptableScenario,

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("pattern writeback conflict: {0}")]
    WritebackConflict(String),

    #[error("tier-internal failure: {0}")]
    TierFailed(String),
}

impl From<receptionist_core::Error> for RouterError {
    fn from(err: receptionist_core::Error) -> Self {
        match err {
            receptionist_core::Error::TemplateNotFound(id) => RouterError::TemplateNotFound(id),
            receptionist_core::Error::CompanyNotFound(id) => RouterError::CompanyNotFound(id),
            receptionist_core::Error::LlmUnavailable(reason) => RouterError::LlmUnavailable(reason),
            receptionist_core::Error::BudgetExhausted { template_id } => RouterError::BudgetExhausted { template_id },
            receptionist_core::Error::NoAcceptableScenario => RouterError::NoAcceptableScenario,
            receptionist_core::Error::PreconditionFailed(reason) => RouterError::PreconditionFailed(reason),
            receptionist_core::Error::WritebackConflict(reason) => RouterError::WritebackConflict(reason),
            other => RouterError::TierFailed(other.to_string()),
        }
    }
}
