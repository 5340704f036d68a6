use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Input rejected before reaching storage. Holds the client-facing message.
    InvalidArgument(String),
    /// No record for the requested identifier. Holds the client-facing message.
    NotFound(String),
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::InvalidArgument(message) => write!(f, "{message}"),
            KernelError::NotFound(message) => write!(f, "{message}"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
