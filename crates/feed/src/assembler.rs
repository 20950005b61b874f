//! Feed assembly: pagination, envelope construction and item projection.
//!
//! [`FeedService`] is built once at startup and shared by route handlers.
//! Every call builds its values fresh from the store.

use restfeed_core::content::{ContentItem, ContentType};
use restfeed_core::error::{Error, FeedError, Result};
use restfeed_core::hooks::{HookArgs, Hooks};
use restfeed_core::request::FeedRequest;
use restfeed_core::schema::{Document, FeedSchema, SpecVersion};
use restfeed_core::site::SiteSettings;
use restfeed_core::store::{ContentQuery, ContentStore};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::author::AuthorRef;
use crate::envelope::{FeedEntry, FeedEnvelope, FeedItem, FeedPage, ItemContent};
use crate::schema::build_schema;
use crate::serializer;
use crate::text;
use crate::urls::{self, DEFAULT_NAMESPACE, FeedUrls};

/// Icon sizes in pixels.
const ICON_SIZE: u32 = 512;
const FAVICON_SIZE: u32 = 64;

/// Assembles JSON Feed documents for registered content types.
pub struct FeedService {
    store: Arc<dyn ContentStore>,
    site: SiteSettings,
    content_types: Vec<ContentType>,
    urls: FeedUrls,
    hooks: Arc<Hooks>,
    version: SpecVersion,
    skip_backward_compatibility: bool,
}

impl FeedService {
    pub fn new(store: Arc<dyn ContentStore>, site: SiteSettings, content_types: Vec<ContentType>) -> Self {
        let urls = FeedUrls::new(site.rest_url.clone(), DEFAULT_NAMESPACE);
        Self {
            store,
            site,
            content_types,
            urls,
            hooks: Arc::new(Hooks::new()),
            version: SpecVersion::default(),
            skip_backward_compatibility: false,
        }
    }

    pub fn with_hooks(mut self, hooks: Hooks) -> Self {
        self.hooks = Arc::new(hooks);
        self
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.urls = FeedUrls::new(self.site.rest_url.clone(), namespace);
        self
    }

    pub fn with_version(mut self, version: SpecVersion) -> Self {
        self.version = version;
        self
    }

    /// Default for the backward-compatibility decision before hooks run.
    pub fn with_skip_backward_compatibility(mut self, skip: bool) -> Self {
        self.skip_backward_compatibility = skip;
        self
    }

    pub fn site(&self) -> &SiteSettings {
        &self.site
    }

    pub fn urls(&self) -> &FeedUrls {
        &self.urls
    }

    pub fn version(&self) -> SpecVersion {
        self.version
    }

    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    pub fn content_type(&self, name: &str) -> Option<&ContentType> {
        self.content_types.iter().find(|ct| ct.name == name)
    }

    /// Content types that expose a feed.
    pub fn feed_types(&self) -> impl Iterator<Item = &ContentType> {
        self.content_types.iter().filter(|ct| ct.show_feed)
    }

    /// Look up a content type whose feed is enabled.
    pub fn enabled_type(&self, name: &str) -> std::result::Result<&ContentType, FeedError> {
        let ct = self
            .content_type(name)
            .ok_or_else(|| FeedError::ContentTypeNotFound(name.to_string()))?;
        if !ct.show_feed {
            return Err(FeedError::FeedDisabled(name.to_string()));
        }
        Ok(ct)
    }

    pub fn feed_url(&self, content_type: &ContentType) -> String {
        self.urls.feed_url_for(content_type)
    }

    /// Whether the singular v1 `author` field is dropped for this request.
    pub fn skip_backward_compatibility(&self, content_type: &ContentType, request: &FeedRequest) -> bool {
        let args = HookArgs::new(&content_type.name, request);
        self.hooks
            .skip_backward_compatibility
            .apply(self.skip_backward_compatibility, &args)
    }

    /// The schema for `content_type` after the schema hooks.
    pub fn get_schema(&self, content_type: &ContentType, request: &FeedRequest) -> FeedSchema {
        let skip = self.skip_backward_compatibility(content_type, request);
        let schema = build_schema(&content_type.name, self.version, !skip);
        let args = HookArgs::new(&content_type.name, request);
        self.hooks.schema.apply(schema, &args)
    }

    /// Fetch one page of published items.
    pub async fn get_page(
        &self,
        content_type: &ContentType,
        requested_page: u64,
        page_size: u64,
    ) -> Result<FeedPage> {
        let page = requested_page.max(1);
        let query = ContentQuery::published(&content_type.name, page_size).with_page(page);
        let result = self.store.query(&query).await?;

        let mut total = result.total;
        if page > 1 && result.items.is_empty() {
            debug!(content_type = %content_type.name, page, "Empty page, recounting total");
            total = self.store.query(&query.without_page()).await?.total;
        }

        let max_pages = total.div_ceil(page_size.max(1));
        if page > max_pages && total > 0 {
            warn!(content_type = %content_type.name, page, max_pages, "Requested page out of range");
            return Err(FeedError::InvalidPage { page, max_pages }.into());
        }

        Ok(FeedPage {
            items: result.items,
            total,
            page,
            max_pages,
        })
    }

    /// Build the envelope for `page`.
    pub async fn build_envelope(
        &self,
        content_type: &ContentType,
        page: FeedPage,
        request: &FeedRequest,
    ) -> Result<FeedEnvelope> {
        let args = HookArgs::new(&content_type.name, request);
        let feed_url = self.feed_url(content_type);

        let prev_url = page.prev_page().map(|p| urls::page_url(&feed_url, p));
        let next_url = page.next_page().map(|p| urls::page_url(&feed_url, p));

        let mut items = Vec::with_capacity(page.items.len());
        for source in page.items {
            items.push(self.prepare_item(content_type, source, request).await?);
        }

        Ok(FeedEnvelope {
            version: self.version,
            title: self.feed_title(content_type, &args),
            home_page_url: self.home_page_url(content_type),
            description: self.feed_description(content_type, &args),
            user_comment: user_comment(&feed_url),
            icon: self.site.icon_url(ICON_SIZE),
            favicon: self.site.icon_url(FAVICON_SIZE),
            language: self.site.language.clone(),
            authors: self.feed_authors(content_type, &args).await?,
            expired: self.hooks.is_expired.apply(false, &args),
            prev_url,
            next_url,
            hubs: Vec::new(),
            items,
            feed_url,
        })
    }

    /// Project one stored item.
    pub async fn prepare_item(
        &self,
        content_type: &ContentType,
        source: ContentItem,
        request: &FeedRequest,
    ) -> Result<FeedEntry> {
        let args = HookArgs::new(&content_type.name, request).with_item(&source);
        let url = self.hooks.item_permalink.apply(source.url.clone(), &args);

        let content = if self.site.use_excerpt {
            ItemContent::Text(text::feed_excerpt(&source.excerpt, &source.content))
        } else {
            ItemContent::Html(text::feed_content(&source.content))
        };

        let image = if content_type.supports_thumbnail {
            source.thumbnail.clone().filter(|t| !t.is_empty())
        } else {
            None
        };

        // One author per item, even though the field is a list.
        let mut authors = Vec::new();
        if content_type.supports_author {
            if let Some(author_id) = source.author.as_deref() {
                if let Some(user) = self.store.user(author_id).await? {
                    authors.push(AuthorRef::from_user(&user, self.site.avatars));
                }
            }
        }

        let tags = content_type.has_tags().then(|| source.tags.clone());

        let item = FeedItem {
            id: source.guid.clone(),
            url,
            external_url: None,
            title: text::plain_title(&source.title),
            content,
            summary: None,
            image,
            banner_image: None,
            date_published: Some(text::format_date(&source.date_published)),
            date_modified: Some(text::format_date(&source.date_modified)),
            authors,
            tags,
            attachments: Vec::new(),
        };
        Ok(FeedEntry { source, item })
    }

    /// Assemble and serialize the feed for the named content type.
    pub async fn get_feed(&self, content_type: &str, request: &FeedRequest) -> Result<Document> {
        let ct = self.enabled_type(content_type)?;
        let page_size = self.site.posts_per_feed;
        if page_size == 0 {
            return Err(Error::Config {
                message: "posts_per_feed must be at least 1".into(),
            });
        }

        let page = self.get_page(ct, request.requested_page(), page_size).await?;
        debug!(
            content_type = %ct.name,
            page = page.page,
            max_pages = page.max_pages,
            items = page.items.len(),
            "Assembling feed"
        );

        let schema = self.get_schema(ct, request);
        let envelope = self.build_envelope(ct, page, request).await?;
        let args = HookArgs::new(&ct.name, request);
        Ok(serializer::serialize(&envelope, &schema, &self.hooks, &args))
    }

    fn feed_title(&self, content_type: &ContentType, args: &HookArgs<'_>) -> String {
        let title = if content_type.is_default() {
            self.site.name.clone()
        } else {
            format!("{}: {}", self.site.name, content_type.label)
        };
        let title = self.hooks.feed_title.apply(title, args);
        if title.is_empty() {
            self.site.name.clone()
        } else {
            title
        }
    }

    fn feed_description(&self, content_type: &ContentType, args: &HookArgs<'_>) -> String {
        let description = if content_type.is_default() {
            self.site.description.clone()
        } else {
            content_type.description.clone()
        };
        self.hooks.feed_description.apply(description, args)
    }

    fn home_page_url(&self, content_type: &ContentType) -> String {
        content_type
            .archive_url
            .clone()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| self.site.home_url.clone())
    }

    async fn feed_authors(&self, content_type: &ContentType, args: &HookArgs<'_>) -> Result<Vec<AuthorRef>> {
        let single_author = content_type.is_default() && !self.store.is_multi_author().await?;
        if !self.hooks.show_feed_author.apply(single_author, args) {
            return Ok(Vec::new());
        }

        // The site contact is the only feed-level author.
        let user = self.store.user_by_email(&self.site.admin_email).await?;
        Ok(user
            .map(|u| vec![AuthorRef::from_user(&u, self.site.avatars)])
            .unwrap_or_default())
    }
}

fn user_comment(feed_url: &str) -> String {
    format!(
        "This feed allows you to read the posts from this site in any feed reader that \
         supports the JSON Feed format. To add this feed to your reader, copy the following \
         URL -- {feed_url} -- and add it your reader."
    )
}
