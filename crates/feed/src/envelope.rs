//! Per-request feed values, built fresh and never cached.

use restfeed_core::content::ContentItem;
use restfeed_core::schema::SpecVersion;
use serde::{Deserialize, Serialize};

use crate::author::AuthorRef;

/// One page of published content.
#[derive(Debug, Clone)]
pub struct FeedPage {
    pub items: Vec<ContentItem>,
    pub total: u64,
    pub page: u64,
    pub max_pages: u64,
}

impl FeedPage {
    /// Page the `prev_url` points at, present when `page > 1`.
    ///
    /// Clamped to `max_pages`, which can be 0 on an empty feed.
    pub fn prev_page(&self) -> Option<u64> {
        (self.page > 1).then(|| (self.page - 1).min(self.max_pages))
    }

    /// Page the `next_url` points at, present when more pages exist.
    pub fn next_page(&self) -> Option<u64> {
        (self.max_pages > self.page).then_some(self.page + 1)
    }
}

/// Content of an item: either the full HTML or a plain-text excerpt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemContent {
    Html(String),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_in_bytes: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_in_seconds: Option<u64>,
}

/// A real-time notification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

/// A projected item, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub id: String,
    pub url: String,
    pub external_url: Option<String>,
    pub title: String,
    pub content: ItemContent,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub banner_image: Option<String>,
    pub date_published: Option<String>,
    pub date_modified: Option<String>,
    pub authors: Vec<AuthorRef>,
    /// `None` when the content type has no tag taxonomy. An empty list is
    /// still emitted.
    pub tags: Option<Vec<String>>,
    pub attachments: Vec<AttachmentRef>,
}

/// A projected item alongside the record it came from.
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub source: ContentItem,
    pub item: FeedItem,
}

/// Top-level feed metadata plus its entries.
#[derive(Debug, Clone)]
pub struct FeedEnvelope {
    pub version: SpecVersion,
    pub title: String,
    pub home_page_url: String,
    pub feed_url: String,
    pub description: String,
    pub user_comment: String,
    pub icon: Option<String>,
    pub favicon: Option<String>,
    pub language: String,
    pub authors: Vec<AuthorRef>,
    pub expired: bool,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    pub hubs: Vec<Hub>,
    pub items: Vec<FeedEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: u64, total: u64, page_size: u64) -> FeedPage {
        FeedPage {
            items: Vec::new(),
            total,
            page,
            max_pages: total.div_ceil(page_size),
        }
    }

    #[test]
    fn neighbours_of_middle_page() {
        let p = page(2, 10, 3);
        assert_eq!(p.prev_page(), Some(1));
        assert_eq!(p.next_page(), Some(3));
    }

    #[test]
    fn first_and_last_pages() {
        assert_eq!(page(1, 4, 3).prev_page(), None);
        assert_eq!(page(1, 4, 3).next_page(), Some(2));
        assert_eq!(page(2, 4, 3).prev_page(), Some(1));
        assert_eq!(page(2, 4, 3).next_page(), None);
    }

    #[test]
    fn prev_is_clamped_on_empty_feed() {
        let p = page(5, 0, 10);
        assert_eq!(p.prev_page(), Some(0));
        assert_eq!(p.next_page(), None);
    }
}
