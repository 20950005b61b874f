//! File-based store: content exported as JSON lines.
//!
//! Each line is one record tagged with `kind`:
//!
//! ```text
//! {"kind":"user","id":"1","display_name":"Jane","email":"jane@example.com"}
//! {"kind":"item","id":"10","guid":"...","content_type":"post", ...}
//! ```
//!
//! The file is read once on open (and again on [`FileStore::reload`]); queries
//! are answered from memory.

use async_trait::async_trait;
use restfeed_core::content::{ContentItem, User};
use restfeed_core::error::StoreError;
use restfeed_core::store::{ContentQuery, ContentStore, QueryResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::in_memory::InMemoryStore;

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record {
    User(User),
    Item(ContentItem),
}

/// A read-only store backed by a JSONL export.
pub struct FileStore {
    path: PathBuf,
    inner: InMemoryStore,
}

impl FileStore {
    /// Open the file at `path` and load every valid record.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let (items, users) = Self::load_from_disk(&path)?;
        debug!(
            path = %path.display(),
            items = items.len(),
            users = users.len(),
            "File content store loaded"
        );
        Ok(Self {
            path,
            inner: InMemoryStore::with_content(items, users),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file, replacing the loaded content.
    pub async fn reload(&self) -> Result<(), StoreError> {
        let (items, users) = Self::load_from_disk(&self.path)?;
        debug!(path = %self.path.display(), items = items.len(), "File content store reloaded");
        self.inner.replace(items, users).await;
        Ok(())
    }

    fn load_from_disk(path: &Path) -> Result<(Vec<ContentItem>, Vec<User>), StoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut items = Vec::new();
        let mut users = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Record>(line) {
                Ok(Record::Item(item)) => items.push(item),
                Ok(Record::User(user)) => users.push(user),
                Err(e) => warn!(line = idx + 1, error = %e, "Skipping corrupted content record"),
            }
        }
        Ok((items, users))
    }
}

#[async_trait]
impl ContentStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn query(&self, query: &ContentQuery) -> Result<QueryResult, StoreError> {
        self.inner.query(query).await
    }

    async fn user(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.inner.user(id).await
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.inner.user_by_email(email).await
    }

    async fn is_multi_author(&self) -> Result<bool, StoreError> {
        self.inner.is_multi_author().await
    }
}
