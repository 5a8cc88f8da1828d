use thiserror::Error;

use crate::batching::BatchingError;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("unknown optimizer: {0}")]
    UnknownOptimizer(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Batching(#[from] BatchingError),
}
