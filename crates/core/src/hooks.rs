//! Hook registry: ordered interception points for feed assembly.
//!
//! Every extension point is a [`HookChain`]: callbacks registered for a
//! specific content type run first, then global callbacks, each stage in
//! registration order. A callback receives the current value plus context
//! and returns the (possibly modified) value.

use crate::content::ContentItem;
use crate::request::FeedRequest;
use crate::schema::{Document, FeedSchema};

/// The fixed set of extension points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionPoint {
    FeedTitle,
    FeedDescription,
    ShowFeedAuthor,
    IsExpired,
    SkipBackwardCompatibility,
    Schema,
    FeedData,
    ItemData,
    ItemPermalink,
}

impl ExtensionPoint {
    pub const ALL: [ExtensionPoint; 9] = [
        Self::FeedTitle,
        Self::FeedDescription,
        Self::ShowFeedAuthor,
        Self::IsExpired,
        Self::SkipBackwardCompatibility,
        Self::Schema,
        Self::FeedData,
        Self::ItemData,
        Self::ItemPermalink,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::FeedTitle => "feed_title",
            Self::FeedDescription => "feed_description",
            Self::ShowFeedAuthor => "show_feed_author",
            Self::IsExpired => "is_expired",
            Self::SkipBackwardCompatibility => "skip_backward_compatibility",
            Self::Schema => "schema",
            Self::FeedData => "feed_data",
            Self::ItemData => "item_data",
            Self::ItemPermalink => "item_permalink",
        }
    }
}

/// Context handed to every callback.
#[derive(Debug, Clone, Copy)]
pub struct HookArgs<'a> {
    pub content_type: &'a str,
    pub request: &'a FeedRequest,
    /// Present once the schema has been resolved
    pub schema: Option<&'a FeedSchema>,
    /// The source item, for item-level points
    pub item: Option<&'a ContentItem>,
}

impl<'a> HookArgs<'a> {
    pub fn new(content_type: &'a str, request: &'a FeedRequest) -> Self {
        Self {
            content_type,
            request,
            schema: None,
            item: None,
        }
    }

    pub fn with_schema(mut self, schema: &'a FeedSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_item(mut self, item: &'a ContentItem) -> Self {
        self.item = Some(item);
        self
    }
}

type Callback<T> = Box<dyn Fn(T, &HookArgs<'_>) -> T + Send + Sync>;

/// Two ordered stages of callbacks for one extension point.
pub struct HookChain<T> {
    point: ExtensionPoint,
    typed: Vec<(String, Callback<T>)>,
    global: Vec<Callback<T>>,
}

impl<T> HookChain<T> {
    pub fn new(point: ExtensionPoint) -> Self {
        Self {
            point,
            typed: Vec::new(),
            global: Vec::new(),
        }
    }

    pub fn point(&self) -> ExtensionPoint {
        self.point
    }

    /// Register a callback that only runs for one content type.
    pub fn add_for<F>(&mut self, content_type: impl Into<String>, callback: F)
    where
        F: Fn(T, &HookArgs<'_>) -> T + Send + Sync + 'static,
    {
        self.typed.push((content_type.into(), Box::new(callback)));
    }

    /// Register a callback that runs for every content type.
    pub fn add_global<F>(&mut self, callback: F)
    where
        F: Fn(T, &HookArgs<'_>) -> T + Send + Sync + 'static,
    {
        self.global.push(Box::new(callback));
    }

    /// Run the type-specific stage, then the global stage.
    pub fn apply(&self, value: T, args: &HookArgs<'_>) -> T {
        let value = self
            .typed
            .iter()
            .filter(|(ct, _)| ct == args.content_type)
            .fold(value, |acc, (_, cb)| cb(acc, args));
        self.global.iter().fold(value, |acc, cb| cb(acc, args))
    }

    pub fn len(&self) -> usize {
        self.typed.len() + self.global.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> std::fmt::Debug for HookChain<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookChain")
            .field("point", &self.point)
            .field("typed", &self.typed.len())
            .field("global", &self.global.len())
            .finish()
    }
}

/// All extension points of the feed pipeline.
#[derive(Debug)]
pub struct Hooks {
    pub feed_title: HookChain<String>,
    pub feed_description: HookChain<String>,
    pub show_feed_author: HookChain<bool>,
    pub is_expired: HookChain<bool>,
    pub skip_backward_compatibility: HookChain<bool>,
    pub schema: HookChain<FeedSchema>,
    pub feed_data: HookChain<Document>,
    pub item_data: HookChain<Document>,
    pub item_permalink: HookChain<String>,
}

impl Hooks {
    pub fn new() -> Self {
        Self {
            feed_title: HookChain::new(ExtensionPoint::FeedTitle),
            feed_description: HookChain::new(ExtensionPoint::FeedDescription),
            show_feed_author: HookChain::new(ExtensionPoint::ShowFeedAuthor),
            is_expired: HookChain::new(ExtensionPoint::IsExpired),
            skip_backward_compatibility: HookChain::new(
                ExtensionPoint::SkipBackwardCompatibility,
            ),
            schema: HookChain::new(ExtensionPoint::Schema),
            feed_data: HookChain::new(ExtensionPoint::FeedData),
            item_data: HookChain::new(ExtensionPoint::ItemData),
            item_permalink: HookChain::new(ExtensionPoint::ItemPermalink),
        }
    }

    /// Number of callbacks registered at a point.
    pub fn registered(&self, point: ExtensionPoint) -> usize {
        match point {
            ExtensionPoint::FeedTitle => self.feed_title.len(),
            ExtensionPoint::FeedDescription => self.feed_description.len(),
            ExtensionPoint::ShowFeedAuthor => self.show_feed_author.len(),
            ExtensionPoint::IsExpired => self.is_expired.len(),
            ExtensionPoint::SkipBackwardCompatibility => self.skip_backward_compatibility.len(),
            ExtensionPoint::Schema => self.schema.len(),
            ExtensionPoint::FeedData => self.feed_data.len(),
            ExtensionPoint::ItemData => self.item_data.len(),
            ExtensionPoint::ItemPermalink => self.item_permalink.len(),
        }
    }
}

impl Default for Hooks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_stage_runs_before_global() {
        let mut chain: HookChain<String> = HookChain::new(ExtensionPoint::FeedTitle);
        chain.add_global(|v, _| format!("{v}|global"));
        chain.add_for("post", |v, _| format!("{v}|post-1"));
        chain.add_for("page", |v, _| format!("{v}|page"));
        chain.add_for("post", |v, _| format!("{v}|post-2"));

        let request = FeedRequest::default();
        let args = HookArgs::new("post", &request);
        assert_eq!(chain.apply("t".into(), &args), "t|post-1|post-2|global");

        let args = HookArgs::new("recipe", &request);
        assert_eq!(chain.apply("t".into(), &args), "t|global");
    }

    #[test]
    fn callbacks_see_context() {
        let mut chain: HookChain<bool> = HookChain::new(ExtensionPoint::IsExpired);
        chain.add_global(|v, args| v || args.request.page == Some(9));

        let request = FeedRequest::page(9);
        assert!(chain.apply(false, &HookArgs::new("post", &request)));
        let request = FeedRequest::page(1);
        assert!(!chain.apply(false, &HookArgs::new("post", &request)));
    }

    #[test]
    fn registry_counts_per_point() {
        let mut hooks = Hooks::new();
        assert!(ExtensionPoint::ALL.iter().all(|p| hooks.registered(*p) == 0));

        hooks.show_feed_author.add_global(|_, _| true);
        hooks.show_feed_author.add_for("page", |_, _| true);
        assert_eq!(hooks.registered(ExtensionPoint::ShowFeedAuthor), 2);
        assert_eq!(hooks.registered(ExtensionPoint::Schema), 0);
        assert_eq!(ExtensionPoint::ShowFeedAuthor.name(), "show_feed_author");
    }
}
