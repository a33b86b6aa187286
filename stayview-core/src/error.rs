use thiserror::Error;

/// Failures while formatting outbound booking/messaging links.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("invalid base url: {0}")]
    InvalidBase(#[from] url::ParseError),

    #[error("phone number has no digits: {0:?}")]
    EmptyPhoneNumber(String),

    #[error("check-out {checkout} is before check-in {checkin}")]
    InvertedStay {
        checkin: chrono::NaiveDate,
        checkout: chrono::NaiveDate,
    },

    #[error("at least one adult is required")]
    NoAdults,
}

pub type Result<T> = std::result::Result<T, LinkError>;
