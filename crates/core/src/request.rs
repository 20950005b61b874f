//! Request-scoped inputs: the feed request and the page context used for
//! feed discovery.

use serde::{Deserialize, Serialize};

use crate::content::DEFAULT_CONTENT_TYPE;

/// A validated feed request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedRequest {
    /// Requested page, already validated to be >= 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
}

impl FeedRequest {
    pub fn page(page: u64) -> Self {
        Self { page: Some(page) }
    }

    /// The requested page, defaulting to 1.
    pub fn requested_page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// What kind of page the visitor is looking at, as determined by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content_type", rename_all = "snake_case")]
pub enum RequestContext {
    /// An archive / listing page of a content type
    Collection(String),
    /// A single item of a content type
    Single(String),
    /// Anything else
    Unknown,
}

impl RequestContext {
    /// The content type in view, falling back to the default type.
    pub fn content_type(&self) -> &str {
        match self {
            Self::Collection(ct) | Self::Single(ct) => ct,
            Self::Unknown => DEFAULT_CONTENT_TYPE,
        }
    }
}
