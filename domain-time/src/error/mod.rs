use thiserror::Error;

/// Caller-input errors raised by the resolver and the clock factories.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainTimeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("the specified time zone is not recognized: {0}")]
    UnsupportedTimeZone(String),
}

impl DomainTimeError {
    pub fn code(&self) -> &'static str {
        match self {
            DomainTimeError::InvalidArgument(_) => "INVALID_ARGUMENT",
            DomainTimeError::UnsupportedTimeZone(_) => "UNSUPPORTED_TIME_ZONE",
        }
    }
}

pub type Result<T, E = DomainTimeError> = std::result::Result<T, E>;
