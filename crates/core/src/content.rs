//! Content model: the read-only entities a feed is built from.
//!
//! Content items and users are owned by the content store; content types
//! come from the host's registry (configuration). The feed core never
//! mutates any of them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The content type every site has, and the one with special feed defaults.
pub const DEFAULT_CONTENT_TYPE: &str = "post";

/// Taxonomy whose terms are exposed as plain-text item tags.
pub const TAG_TAXONOMY: &str = "post_tag";

/// Publication status of a content item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Published,
    Draft,
    Private,
}

/// A single piece of content (a blog post, a page, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Store-local identifier
    pub id: String,

    /// Immutable, globally unique identifier (becomes the feed item id)
    pub guid: String,

    /// Content type name (e.g. "post")
    pub content_type: String,

    #[serde(default)]
    pub status: ItemStatus,

    /// Permalink
    pub url: String,

    /// Raw title, may contain markup
    pub title: String,

    /// Full rendered HTML content
    #[serde(default)]
    pub content: String,

    /// Hand-written excerpt (empty = derive from content)
    #[serde(default)]
    pub excerpt: String,

    pub date_published: DateTime<Utc>,

    pub date_modified: DateTime<Utc>,

    /// ID of the authoring user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Tag names in the tag taxonomy
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Featured image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// A user who can author content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    pub display_name: String,

    #[serde(default)]
    pub email: String,

    /// The user's own website
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Twitter handle, with or without a leading "@"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,

    /// Explicit avatar image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A content type and its feed-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentType {
    /// Identifier (e.g. "post", "page", "recipe")
    pub name: String,

    /// Plural human label (e.g. "Posts")
    pub label: String,

    #[serde(default)]
    pub description: String,

    /// Whether a feed endpoint exists for this type
    #[serde(default)]
    pub show_feed: bool,

    /// Overrides the URL path segment (empty = use `name`)
    #[serde(default)]
    pub feed_base: String,

    #[serde(default)]
    pub supports_thumbnail: bool,

    #[serde(default)]
    pub supports_author: bool,

    /// Taxonomies associated with the type
    #[serde(default)]
    pub taxonomies: Vec<String>,

    /// Archive page for the type, if it has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_url: Option<String>,
}

impl ContentType {
    /// A bare content type with every flag off.
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: String::new(),
            show_feed: false,
            feed_base: String::new(),
            supports_thumbnail: false,
            supports_author: false,
            taxonomies: Vec::new(),
            archive_url: None,
        }
    }

    /// The built-in "post" type with its registration defaults applied.
    pub fn post() -> Self {
        Self {
            show_feed: true,
            feed_base: "posts".into(),
            supports_thumbnail: true,
            supports_author: true,
            taxonomies: vec!["category".into(), TAG_TAXONOMY.into()],
            ..Self::new(DEFAULT_CONTENT_TYPE, "Posts")
        }
    }

    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_CONTENT_TYPE
    }

    pub fn has_tags(&self) -> bool {
        self.taxonomies.iter().any(|t| t == TAG_TAXONOMY)
    }
}
