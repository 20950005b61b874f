//! Content store trait: the content query capability feeds are built on.
//!
//! The store owns content and users; the feed core only asks it for a page
//! of published items, a total count, and user lookups.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::content::{ContentItem, ItemStatus, User};
use crate::error::StoreError;

/// A query for a page of content items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentQuery {
    pub content_type: String,

    #[serde(default)]
    pub status: ItemStatus,

    /// 1-based page; `None` = no page constraint (count everything)
    #[serde(default)]
    pub page: Option<u64>,

    /// Items per page, at least 1
    pub page_size: u64,
}

impl ContentQuery {
    /// A query for published items of the given type.
    pub fn published(content_type: impl Into<String>, page_size: u64) -> Self {
        Self {
            content_type: content_type.into(),
            status: ItemStatus::Published,
            page: None,
            page_size,
        }
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn without_page(mut self) -> Self {
        self.page = None;
        self
    }
}

/// The result of a content query.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Items in store order (typically newest first)
    pub items: Vec<ContentItem>,

    /// Total number of matching items across all pages, as reported by the store
    pub total: u64,
}

/// The core ContentStore trait.
///
/// Implementations: in-memory (for testing), JSON file.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// The store name (e.g., "in_memory", "file").
    fn name(&self) -> &str;

    /// Run a content query.
    async fn query(&self, query: &ContentQuery) -> std::result::Result<QueryResult, StoreError>;

    /// Look up a user by ID.
    async fn user(&self, id: &str) -> std::result::Result<Option<User>, StoreError>;

    /// Look up a user by email address.
    async fn user_by_email(&self, email: &str) -> std::result::Result<Option<User>, StoreError>;

    /// Whether more than one user has published items of the default content type.
    async fn is_multi_author(&self) -> std::result::Result<bool, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_builders() {
        let query = ContentQuery::published("post", 10).with_page(3);
        assert_eq!(query.page, Some(3));
        assert_eq!(query.status, ItemStatus::Published);

        let count = query.clone().without_page();
        assert_eq!(count.page, None);
        assert_eq!(count.page_size, 10);
        assert_eq!(count.content_type, "post");
    }
}
