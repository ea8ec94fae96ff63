use reqwest::StatusCode;
use std::fmt;

#[derive(Debug)]
pub enum BackendError {
    /// The request could not be sent or its response could not be decoded.
    FetchFailed(reqwest::Error),
    UnexpectedStatus(StatusCode),
    /// The configured backend URL cannot have a path appended to it.
    InvalidUrl,
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::FetchFailed(e) => write!(f, "request to the backend failed: {e}"),
            BackendError::UnexpectedStatus(status) => {
                write!(f, "backend responded with status {status}")
            }
            BackendError::InvalidUrl => write!(f, "backend URL cannot be a base URL"),
        }
    }
}

impl std::error::Error for BackendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BackendError::FetchFailed(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        BackendError::FetchFailed(e)
    }
}
