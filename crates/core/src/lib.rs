//! # RestFeed Core
//!
//! Domain types, traits, and error definitions for the RestFeed JSON Feed
//! service. This crate has **no HTTP dependencies**: it defines the domain
//! model that the store, feed, and gateway crates implement against.
//!
//! ## Design Philosophy
//!
//! Content storage is defined as a trait here ([`ContentStore`]); the
//! implementations live in `restfeed-store`. Extension points are plain
//! ordered callback chains ([`Hooks`]) owned by whoever builds the feed
//! service, so nothing in the pipeline depends on process-wide state.

pub mod content;
pub mod error;
pub mod hooks;
pub mod request;
pub mod schema;
pub mod site;
pub mod store;

// Re-export key types at crate root for ergonomics
pub use content::{ContentItem, ContentType, DEFAULT_CONTENT_TYPE, ItemStatus, TAG_TAXONOMY, User};
pub use error::{Error, FeedError, Result, StoreError};
pub use hooks::{ExtensionPoint, HookArgs, HookChain, Hooks};
pub use request::{FeedRequest, RequestContext};
pub use schema::{Document, FeedSchema, Property, PropertyKind, SpecVersion, StringFormat};
pub use site::SiteSettings;
pub use store::{ContentQuery, ContentStore, QueryResult};
