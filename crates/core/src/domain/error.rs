// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid illness category: {0} (expected 1, 2 or 3)")]
    InvalidCategory(u8),

    #[error("Invalid illness severity: {0} (expected 1..=10)")]
    InvalidSeverity(u8),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
