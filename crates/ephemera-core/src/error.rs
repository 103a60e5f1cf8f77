//! Error types for Ephemera stores

use thiserror::Error;

/// Errors that can occur in store operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A store was configured with a capacity it cannot hold events in
    #[error("Invalid capacity: {capacity} (must be at least 1)")]
    InvalidCapacity { capacity: usize },

    /// Failure reported by a backend that performs I/O
    #[error("Backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a new InvalidCapacity error
    pub fn invalid_capacity(capacity: usize) -> Self {
        Self::InvalidCapacity { capacity }
    }

    /// Create a new Backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
