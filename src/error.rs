//! Client Errors

use thiserror::Error;

/// Failure of a call against the task API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("invalid API base {base:?}: {reason}")]
    InvalidBase { base: String, reason: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status(status.as_u16())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
