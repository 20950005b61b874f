//! `restfeed link-tags`: Print the `<link rel="alternate">` tags for a page.

use restfeed_core::request::RequestContext;
use std::path::Path;

pub async fn run(
    path: Option<&Path>,
    collection: Option<String>,
    single: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(path)?;
    let feed = super::open_feed(&config)?;

    let context = match (collection, single) {
        (Some(ct), _) => RequestContext::Collection(ct),
        (None, Some(ct)) => RequestContext::Single(ct),
        (None, None) => RequestContext::Unknown,
    };

    let tags = feed.render_current_feed_link_tags(&context);
    if tags.is_empty() {
        eprintln!("No feed is enabled for {}", context.content_type());
    } else {
        println!("{tags}");
    }
    Ok(())
}
