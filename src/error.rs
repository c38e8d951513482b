use thiserror::Error;

pub type PaymentResult<T> = Result<T, PaymentError>;

/// Errors surfaced to the host by provider operations.
///
/// Validation failures (`InvalidArgument`, `InvalidData`) are raised before any
/// gateway call. `UnexpectedState` covers gateway-reported failures and
/// transport faults. Nothing is retried by the provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    #[error("Unexpected state: {message}")]
    UnexpectedState { message: String },
}

impl PaymentError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    pub fn unexpected_state(message: impl Into<String>) -> Self {
        Self::UnexpectedState {
            message: message.into(),
        }
    }

    /// True for caller-side validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PaymentError::InvalidArgument { .. } | PaymentError::InvalidData { .. }
        )
    }

    pub fn is_unexpected_state(&self) -> bool {
        matches!(self, PaymentError::UnexpectedState { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            PaymentError::InvalidArgument { message }
            | PaymentError::InvalidData { message }
            | PaymentError::UnexpectedState { message } => message,
        }
    }
}
