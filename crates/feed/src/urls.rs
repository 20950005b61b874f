//! Feed URL resolution.
//!
//! Pure functions of configuration: a content type maps to a path segment,
//! and a namespace plus segment map to a URL under the REST root.

use restfeed_core::content::ContentType;

/// Namespace all feed routes live under unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "feed/v1";

/// Resolves canonical feed URLs.
#[derive(Debug, Clone)]
pub struct FeedUrls {
    rest_url: String,
    namespace: String,
}

impl FeedUrls {
    pub fn new(rest_url: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            rest_url: rest_url.into(),
            namespace: namespace.into(),
        }
    }

    /// The namespace, without surrounding slashes.
    pub fn namespace(&self) -> &str {
        self.namespace.trim_matches('/')
    }

    /// The configured base override, else the type's own name.
    pub fn resolve_base(content_type: &ContentType) -> &str {
        if content_type.feed_base.is_empty() {
            &content_type.name
        } else {
            &content_type.feed_base
        }
    }

    /// Route path relative to the REST root: `{namespace}/{base}`.
    pub fn route_path(namespace: &str, base: &str) -> String {
        format!("{}/{}", namespace.trim_matches('/'), base.trim_matches('/'))
    }

    /// Join namespace and base under the REST root.
    pub fn resolve_feed_url(&self, namespace: &str, base: &str) -> String {
        format!(
            "{}/{}",
            self.rest_url.trim_end_matches('/'),
            Self::route_path(namespace, base)
        )
    }

    /// Feed URL of a content type under the configured namespace.
    pub fn feed_url_for(&self, content_type: &ContentType) -> String {
        self.resolve_feed_url(&self.namespace, Self::resolve_base(content_type))
    }
}

/// `feed_url` with its `page` query argument set to `page`.
pub fn page_url(feed_url: &str, page: u64) -> String {
    match url::Url::parse(feed_url) {
        Ok(mut parsed) => {
            let kept: Vec<(String, String)> = parsed
                .query_pairs()
                .filter(|(k, _)| k != "page")
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            parsed
                .query_pairs_mut()
                .clear()
                .extend_pairs(kept)
                .append_pair("page", &page.to_string());
            parsed.to_string()
        }
        Err(_) => {
            let sep = if feed_url.contains('?') { '&' } else { '?' };
            format!("{feed_url}{sep}page={page}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> FeedUrls {
        FeedUrls::new("https://example.com/wp-json/", DEFAULT_NAMESPACE)
    }

    #[test]
    fn base_prefers_override() {
        let mut ct = ContentType::new("content", "Content");
        assert_eq!(FeedUrls::resolve_base(&ct), "content");
        ct.feed_base = "custom/content".into();
        assert_eq!(FeedUrls::resolve_base(&ct), "custom/content");
        assert_eq!(FeedUrls::resolve_base(&ContentType::post()), "posts");
    }

    #[test]
    fn feed_url_trims_slashes() {
        assert_eq!(
            urls().resolve_feed_url("/test/v99/", "/something/"),
            "https://example.com/wp-json/test/v99/something"
        );
        assert_eq!(
            urls().feed_url_for(&ContentType::new("page", "Pages")),
            "https://example.com/wp-json/feed/v1/page"
        );
    }

    #[test]
    fn page_url_sets_and_replaces_page() {
        assert_eq!(
            page_url("https://example.com/wp-json/feed/v1/posts", 2),
            "https://example.com/wp-json/feed/v1/posts?page=2"
        );
        assert_eq!(
            page_url("https://example.com/feed?page=5&lang=en", 3),
            "https://example.com/feed?lang=en&page=3"
        );
    }
}
