use thiserror::Error;

pub type Result<T> = std::result::Result<T, PreprocessError>;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("stage {stage} failed: {reason}")]
    StageFailed { stage: String, reason: String },

    #[error("pipeline exceeded total timeout")]
    Timeout,
}

impl From<PreprocessError> for receptionist_core::Error {
    fn from(err: PreprocessError) -> Self {
        match err {
            PreprocessError::StageFailed { stage, reason } => {
                receptionist_core::Error::StageTransient { stage, reason }
            }
            PreprocessError::Timeout => {
                receptionist_core::Error::StageTransient {
                    stage: "pipeline".to_string(),
                    reason: "timeout".to_string(),
                }
            }
        }
    }
}
