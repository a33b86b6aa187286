use std::fmt::{self, Display};

/// Errors produced by model constructors and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    EmptyUrl(&'static str),
    EmptyKey,
    EmptyLabel,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyUrl(what) => write!(f, "{what} url is empty"),
            ModelError::EmptyKey => write!(f, "photo key is empty"),
            ModelError::EmptyLabel => {
                write!(f, "call to action label is empty")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
