//! Error taxonomy for the booking core.
//!
//! Every operation returns a typed failure from this enum; nothing is
//! swallowed or retried internally except bounded token regeneration.
//! Callers exposing the core over a network boundary map these to their
//! own status codes (SlotTaken/InvalidTransition -> 409, Validation -> 400,
//! NotFound -> 404).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("invalid value for field '{field}'")]
    Validation { field: &'static str },
    #[error("slot is already taken")]
    SlotTaken,
    #[error("{0} was not found")]
    NotFound(String),
    #[error("invalid status transition: {0}")]
    InvalidTransition(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("could not assign a unique token")]
    TokenExhausted,
}

pub type Result<T> = std::result::Result<T, BookingError>;
