//! Error types for the application

use std::fmt;

use thiserror::Error;

/// Result type alias using our TradeError
pub type Result<T> = std::result::Result<T, TradeError>;

/// Main error type for library operations
#[derive(Error, Debug)]
pub enum TradeError {
    /// A required argument was missing or unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A tick line could not be parsed
    #[error("Tick parse error: {0}")]
    TickParse(String),

    /// I/O errors while reading tick input
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure surfaced by an order service while placing a buy.
///
/// Wraps any error type. The responder never inspects it; it is only
/// carried through to the errored notification.
pub struct ExecutionError(anyhow::Error);

impl ExecutionError {
    /// Wrap an arbitrary error
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self(anyhow::Error::new(error))
    }

    /// Build an error from a plain message
    pub fn msg<M>(message: M) -> Self
    where
        M: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        Self(anyhow::Error::msg(message))
    }

    /// Access the underlying error if it is of type `E`
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.0.downcast_ref::<E>()
    }

    /// Borrow the wrapped error
    pub fn inner(&self) -> &anyhow::Error {
        &self.0
    }
}

impl From<anyhow::Error> for ExecutionError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Debug for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl std::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("exchange rejected order")]
    struct Rejected;

    #[test]
    fn test_execution_error_downcast() {
        let err = ExecutionError::new(Rejected);
        assert!(err.downcast_ref::<Rejected>().is_some());
        assert_eq!(err.to_string(), "exchange rejected order");
    }

    #[test]
    fn test_execution_error_from_message() {
        let err = ExecutionError::msg("Boom");
        assert_eq!(err.to_string(), "Boom");
        assert!(err.downcast_ref::<Rejected>().is_none());
    }

    #[test]
    fn test_trade_error_display() {
        let err = TradeError::InvalidArgument("executor".to_string());
        assert_eq!(err.to_string(), "Invalid argument: executor");
    }
}
