//! Site-wide settings consumed during feed assembly.

use serde::{Deserialize, Serialize};

/// Settings of the site a feed is served for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    /// Site name
    pub name: String,

    /// Tagline
    #[serde(default)]
    pub description: String,

    pub home_url: String,

    /// Root URL that REST routes live under (e.g. `https://example.com/wp-json/`)
    pub rest_url: String,

    /// BCP 47 language tag
    #[serde(default)]
    pub language: String,

    /// Site icon URL; a `{size}` placeholder is replaced by the pixel size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,

    /// Contact address of the site administrator
    #[serde(default)]
    pub admin_email: String,

    /// Emit plain-text excerpts instead of full HTML content
    #[serde(default)]
    pub use_excerpt: bool,

    /// Items per feed page
    pub posts_per_feed: u64,

    /// Derive Gravatar URLs for users without an explicit avatar
    #[serde(default)]
    pub avatars: bool,
}

impl SiteSettings {
    pub fn has_icon(&self) -> bool {
        self.icon_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Icon URL at the given pixel size.
    pub fn icon_url(&self, size: u32) -> Option<String> {
        self.icon_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(|u| u.replace("{size}", &size.to_string()))
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "My Site".into(),
            description: String::new(),
            home_url: "http://127.0.0.1:8080/".into(),
            rest_url: "http://127.0.0.1:8080/".into(),
            language: "en-US".into(),
            icon_url: None,
            admin_email: String::new(),
            use_excerpt: false,
            posts_per_feed: 10,
            avatars: false,
        }
    }
}
