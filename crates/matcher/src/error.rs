use thiserror::Error;

pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("no eligible scenarios for language={language} channel={channel}")]
    NoEligibleScenarios { language: String, channel: String },
}

impl From<MatchError> for receptionist_core::Error {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::NoEligibleScenarios { .. } => receptionist_core::Error::NoAcceptableScenario,
        }
    }
}
