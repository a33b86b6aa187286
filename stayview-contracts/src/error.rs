use thiserror::Error;

/// Failures reported by host capabilities. Engines log these and carry on;
/// none of them is surfaced to the visitor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("capability unavailable: {0}")]
    Unavailable(&'static str),

    #[error("request rejected by host: {0}")]
    Rejected(String),

    #[error("user dismissed the {0} prompt")]
    Dismissed(&'static str),
}

pub type Result<T> = std::result::Result<T, HostError>;
