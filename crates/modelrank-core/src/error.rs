//! Error taxonomy for modelrank.
//!
//! Only setup problems are errors. A job that fails to launch, exits
//! non-zero, or prints no metric is recorded as a [`JobOutcome`] instead.
//!
//! [`JobOutcome`]: crate::outcome::JobOutcome

/// modelrank domain errors.
#[derive(Debug, thiserror::Error)]
pub enum ModelRankError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("duplicate job name: {0}")]
    DuplicateJob(String),

    #[error("job registry is empty")]
    EmptyRegistry,

    #[error("job {0} has an empty command")]
    EmptyCommand(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for modelrank operations.
pub type Result<T> = std::result::Result<T, ModelRankError>;
