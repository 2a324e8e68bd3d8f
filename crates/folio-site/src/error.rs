//! Error types for Folio.

use crate::resolve::Operation;
use crate::store::StoreError;
use thiserror::Error;

/// Result type for Folio operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving content.
#[derive(Debug, Error)]
pub enum Error {
    /// A required input was empty or out of range. Raised before any store call.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Nothing matched a valid key
    #[error("Not found: {0}")]
    NotFound(String),

    /// The content store failed. The store's error is kept as the source and
    /// left out of the message.
    #[error("{operation} failed")]
    Store {
        operation: Operation,
        #[source]
        source: StoreError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn store(operation: Operation, source: StoreError) -> Self {
        Error::Store { operation, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn store_error_hides_detail_but_keeps_source() {
        let err = Error::store(
            Operation::ResolvePageByPermalink,
            StoreError::Status {
                status: 500,
                message: "relation \"pages\" does not exist".into(),
            },
        );

        assert_eq!(err.to_string(), "fetch page by permalink failed");
        let source = err.source().expect("source kept");
        assert!(source.to_string().contains("does not exist"));
    }
}
