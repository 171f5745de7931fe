//! Error types for algoscope-core.
//!
//! Both variants are recoverable at the boundary that called the builder:
//! the caller surfaces the message and leaves its current structure alone.
//! Tracers and the playback controller never see them.

use thiserror::Error;

/// Result type for algoscope-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by structure builders and operation triggers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Non-numeric or out-of-range values, a count above the cap, or a
    /// parameter that does not name anything in the structure.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation needs at least one element and the structure has none.
    #[error("{0} is empty")]
    EmptyStructure(&'static str),
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(Error::EmptyStructure("Stack").to_string(), "Stack is empty");
        assert_eq!(
            Error::invalid("maximum 50 elements allowed").to_string(),
            "invalid input: maximum 50 elements allowed"
        );
    }
}
