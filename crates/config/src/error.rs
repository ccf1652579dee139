use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    #[error("failed to parse {path}: {reason}")]
    ParseError { path: String, reason: String },

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("invalid company profile: {0}")]
    InvalidCompany(String),
}

impl From<ConfigError> for receptionist_core::Error {
    fn from(err: ConfigError) -> Self {
        receptionist_core::Error::Fatal(err.to_string())
    }
}
