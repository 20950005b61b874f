//! Error types for the RestFeed domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all RestFeed operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Feed assembly errors ---
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    // --- Content store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors raised while assembling a feed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    #[error("The page number requested is larger than the number of pages available (page {page}, max {max_pages}).")]
    InvalidPage { page: u64, max_pages: u64 },

    #[error("Content type not found: {0}")]
    ContentTypeNotFound(String),

    #[error("Feed disabled for content type: {0}")]
    FeedDisabled(String),
}

impl FeedError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPage { .. } => "rest_feed_invalid_page_number",
            Self::ContentTypeNotFound(_) | Self::FeedDisabled(_) => "rest_no_route",
        }
    }

    /// HTTP status equivalent.
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidPage { .. } => 400,
            Self::ContentTypeNotFound(_) | Self::FeedDisabled(_) => 404,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Failed to load content from {path}: {reason}")]
    Load { path: String, reason: String },
}

impl Error {
    /// Stable machine-readable error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Feed(e) => e.code(),
            Self::Store(_) => "rest_feed_store_error",
            Self::Config { .. } => "rest_feed_config_error",
            Self::Serialization(_) | Self::Internal(_) => "rest_feed_internal_error",
        }
    }

    /// HTTP status equivalent.
    pub fn status(&self) -> u16 {
        match self {
            Self::Feed(e) => e.status(),
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_page_carries_diagnostics() {
        let err = Error::Feed(FeedError::InvalidPage {
            page: 100,
            max_pages: 2,
        });
        assert_eq!(err.code(), "rest_feed_invalid_page_number");
        assert_eq!(err.status(), 400);
        assert!(err.to_string().contains("page 100"));
        assert!(err.to_string().contains("max 2"));
    }

    #[test]
    fn missing_type_maps_to_not_found() {
        let err = FeedError::ContentTypeNotFound("recipe".into());
        assert_eq!(err.code(), "rest_no_route");
        assert_eq!(err.status(), 404);
    }

    #[test]
    fn store_error_is_internal() {
        let err = Error::Store(StoreError::QueryFailed("disk gone".into()));
        assert_eq!(err.status(), 500);
        assert_eq!(err.code(), "rest_feed_store_error");
        assert!(err.to_string().contains("disk gone"));
    }
}
