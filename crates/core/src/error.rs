use thiserror::Error;

pub type PulseResult<T> = Result<T, PulseError>;

#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Acquisition source '{0}' has no entry in the color palette")]
    UnknownSource(String),

    #[error("Timestamp {0}ms cannot be represented as a calendar date")]
    TimestampOutOfRange(i64),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for PulseError {
    fn from(err: config::ConfigError) -> Self {
        PulseError::Config(err.to_string())
    }
}
