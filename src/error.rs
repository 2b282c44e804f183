use thiserror::Error;

use crate::api::ApiError;
use crate::validate::ValidationError;

/// Failure of a user-initiated action. Each one is terminal for that action; nothing retries.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{action} is not available {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
