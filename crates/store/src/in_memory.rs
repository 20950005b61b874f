//! In-memory store: useful for testing and for serving a fixed content set.

use async_trait::async_trait;
use restfeed_core::content::{ContentItem, DEFAULT_CONTENT_TYPE, ItemStatus, User};
use restfeed_core::error::StoreError;
use restfeed_core::store::{ContentQuery, ContentStore, QueryResult};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A store that keeps items and users in Vecs.
///
/// Queries return items newest first (by publish date, then ID).
pub struct InMemoryStore {
    items: Arc<RwLock<Vec<ContentItem>>>,
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::with_content(Vec::new(), Vec::new())
    }

    pub fn with_content(items: Vec<ContentItem>, users: Vec<User>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            users: Arc::new(RwLock::new(users)),
        }
    }

    pub async fn insert_item(&self, item: ContentItem) {
        let mut items = self.items.write().await;
        items.retain(|i| i.id != item.id);
        items.push(item);
    }

    pub async fn insert_user(&self, user: User) {
        let mut users = self.users.write().await;
        users.retain(|u| u.id != user.id);
        users.push(user);
    }

    /// Replace the whole content set.
    pub async fn replace(&self, items: Vec<ContentItem>, users: Vec<User>) {
        *self.items.write().await = items;
        *self.users.write().await = users;
    }

    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn query(&self, query: &ContentQuery) -> Result<QueryResult, StoreError> {
        if query.page_size == 0 {
            return Err(StoreError::QueryFailed("page_size must be at least 1".into()));
        }

        let items = self.items.read().await;
        let mut matching: Vec<&ContentItem> = items
            .iter()
            .filter(|i| i.content_type == query.content_type && i.status == query.status)
            .collect();

        matching.sort_by(|a, b| {
            b.date_published
                .cmp(&a.date_published)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matching.len() as u64;
        let offset = query.page.unwrap_or(1).saturating_sub(1).saturating_mul(query.page_size);

        let page: Vec<ContentItem> = matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(query.page_size).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        Ok(QueryResult { items: page, total })
    }

    async fn user(&self, id: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let email = email.trim();
        if email.is_empty() {
            return Ok(None);
        }
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    /// Counts authors of published items of the default type only.
    async fn is_multi_author(&self) -> Result<bool, StoreError> {
        let items = self.items.read().await;
        let authors: HashSet<&str> = items
            .iter()
            .filter(|i| i.status == ItemStatus::Published && i.content_type == DEFAULT_CONTENT_TYPE)
            .filter_map(|i| i.author.as_deref())
            .collect();
        Ok(authors.len() > 1)
    }
}
