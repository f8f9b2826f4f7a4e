use std::fmt;

use crate::queue::QueueMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    QueueFull,
    QueueEmpty,
    UnknownMode,
    ScenarioSyntax,
    ScenarioIo,
    ExpectationMismatch,
}

#[derive(Debug, Clone)]
pub struct AppError {
    pub error_type: ErrorType,
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}; {}", self.error_type, self.message)
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn new(error_type: ErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
        }
    }

    pub fn queue_full(mode: QueueMode) -> Self {
        Self {
            error_type: ErrorType::QueueFull,
            message: format!("queue is full ({})", mode),
        }
    }

    pub fn queue_empty(mode: QueueMode) -> Self {
        Self {
            error_type: ErrorType::QueueEmpty,
            message: format!("queue is empty ({})", mode),
        }
    }

    pub fn mismatch(message: String) -> Self {
        Self {
            error_type: ErrorType::ExpectationMismatch,
            message,
        }
    }

    /// Prefixes the message with the location it was raised at, keeping the kind.
    pub fn within(self, context: &str) -> Self {
        Self {
            error_type: self.error_type,
            message: format!("{}: {}", context, self.message),
        }
    }
}
