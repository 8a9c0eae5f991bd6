//! Error types for the seeker crate.

use thiserror::Error;

/// Errors that can occur when executing a search.
///
/// Building a query never fails: unknown fields and absent criteria only
/// suppress predicates. Errors come from the backend or from encoding a
/// search log record.
#[derive(Debug, Error)]
pub enum SeekerError {
    /// Failure reported by the backend, surfaced verbatim.
    #[error(transparent)]
    Backend(Box<dyn std::error::Error + Send + Sync>),

    /// Search log filters could not be encoded.
    #[error("failed to encode search filters: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SeekerError {
    /// Wraps a backend error without altering its message or source chain.
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        SeekerError::Backend(err.into())
    }
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_error_displays_verbatim() {
        let err = SeekerError::backend("no such table: items");
        assert_eq!(err.to_string(), "no such table: items");
    }

    #[test]
    fn backend_error_keeps_source_type() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "connection reset");
        let SeekerError::Backend(inner) = SeekerError::backend(io) else {
            panic!("expected a backend error");
        };
        assert!(inner.downcast_ref::<std::io::Error>().is_some());
    }
}
