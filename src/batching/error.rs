use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchingError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
