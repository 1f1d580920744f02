//! Errors from the driving loop.

use thiserror::Error;

use crate::store::StoreError;

/// A recalculation pass could not complete.
#[derive(Debug, Error)]
pub enum RecalculateError {
    /// Listing sightings failed; nothing was published.
    #[error("Failed to list sightings: {0}")]
    List(#[source] StoreError),

    /// Purging expired or stale sightings failed.
    #[error("Failed to delete sightings: {0}")]
    Delete(#[source] StoreError),

    /// Publishing or clearing a distribution failed.
    #[error("Failed to publish distributions: {0}")]
    Publish(#[source] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_cause() {
        let err = RecalculateError::List(StoreError::Unavailable("db locked".to_string()));
        assert_eq!(
            err.to_string(),
            "Failed to list sightings: Store unavailable: db locked"
        );
    }

    #[test]
    fn test_source_is_store_error() {
        use std::error::Error;
        let err = RecalculateError::Publish(StoreError::Operation("full".to_string()));
        assert!(err.source().is_some());
    }
}
