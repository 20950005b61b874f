//! # RestFeed Feed
//!
//! The JSON Feed assembly pipeline. A request flows through:
//!
//! 1. [`FeedService::get_page`]: one content query, plus a recount when an
//!    out-of-range page comes back empty.
//! 2. [`FeedService::build_envelope`]: feed metadata and projected items,
//!    with each computed value passed through its hook pair.
//! 3. [`FeedService::get_schema`]: the version's ordered property list.
//! 4. [`serializer::serialize`]: schema-ordered output of non-empty values.
//!
//! Link-tag discovery lives in [`discovery`].

pub mod assembler;
pub mod author;
pub mod discovery;
pub mod envelope;
pub mod schema;
pub mod serializer;
pub mod text;
pub mod urls;

pub use assembler::FeedService;
pub use author::AuthorRef;
pub use envelope::{AttachmentRef, FeedEntry, FeedEnvelope, FeedItem, FeedPage, Hub, ItemContent};
pub use schema::build_schema;
pub use urls::{DEFAULT_NAMESPACE, FeedUrls};
