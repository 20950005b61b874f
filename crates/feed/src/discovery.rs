//! `<link rel="alternate">` tags advertising feeds in page output.

use restfeed_core::content::{ContentType, DEFAULT_CONTENT_TYPE};
use restfeed_core::request::RequestContext;

use crate::assembler::FeedService;

impl FeedService {
    /// Link tag for one content type, or `None` when it has no enabled feed.
    pub fn render_feed_link_tag(&self, content_type: &str) -> Option<String> {
        let ct = self.enabled_type(content_type).ok()?;
        Some(link_tag(ct, &self.feed_url(ct)))
    }

    /// Link tags for the page being viewed.
    ///
    /// Pages of a non-default type advertise the default feed first.
    pub fn render_current_feed_link_tags(&self, context: &RequestContext) -> String {
        let current = context.content_type();
        let mut tags = Vec::with_capacity(2);
        if current != DEFAULT_CONTENT_TYPE {
            tags.extend(self.render_feed_link_tag(DEFAULT_CONTENT_TYPE));
        }
        tags.extend(self.render_feed_link_tag(current));
        tags.join("\n")
    }
}

fn link_tag(content_type: &ContentType, feed_url: &str) -> String {
    let title = format!("{} JSON Feed", content_type.label);
    format!(
        r#"<link rel="alternate" type="application/json" title="{}" href="{}" />"#,
        html_escape::encode_double_quoted_attribute(&title),
        html_escape::encode_double_quoted_attribute(feed_url),
    )
}

#[cfg(test)]
mod tests {
    use restfeed_core::content::ContentType;
    use restfeed_core::request::RequestContext;
    use restfeed_core::site::SiteSettings;
    use restfeed_store::InMemoryStore;
    use std::sync::Arc;

    use crate::assembler::FeedService;

    fn service() -> FeedService {
        let site = SiteSettings {
            rest_url: "https://example.com/wp-json/".into(),
            ..SiteSettings::default()
        };
        let recipe = ContentType {
            show_feed: true,
            ..ContentType::new("recipe", "Fish & \"Chips\"")
        };
        FeedService::new(
            Arc::new(InMemoryStore::new()),
            site,
            vec![ContentType::post(), recipe, ContentType::new("page", "Pages")],
        )
    }

    #[test]
    fn renders_escaped_tag() {
        assert_eq!(
            service().render_feed_link_tag("post").unwrap(),
            r#"<link rel="alternate" type="application/json" title="Posts JSON Feed" href="https://example.com/wp-json/feed/v1/posts" />"#
        );
        let tag = service().render_feed_link_tag("recipe").unwrap();
        assert!(tag.contains(r#"title="Fish &amp; &quot;Chips&quot; JSON Feed""#));
    }

    #[test]
    fn nothing_for_disabled_or_unknown_types() {
        assert!(service().render_feed_link_tag("page").is_none());
        assert!(service().render_feed_link_tag("nope").is_none());
        assert_eq!(
            service().render_current_feed_link_tags(&RequestContext::Single("page".into())),
            service().render_feed_link_tag("post").unwrap()
        );
    }

    #[test]
    fn current_context_resolution() {
        let svc = service();
        let unknown = svc.render_current_feed_link_tags(&RequestContext::Unknown);
        assert_eq!(unknown.lines().count(), 1);
        assert!(unknown.contains("/feed/v1/posts"));

        let recipe = svc.render_current_feed_link_tags(&RequestContext::Collection("recipe".into()));
        let lines: Vec<&str> = recipe.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("/feed/v1/posts"));
        assert!(lines[1].contains("/feed/v1/recipe"));
    }
}
