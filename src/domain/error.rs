//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent failures while building the outline tree.
/// These are independent of rendering and I/O concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("id generator: {0}")]
    IdGenerator(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
