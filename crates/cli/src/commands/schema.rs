//! `restfeed schema`: Print the JSON Schema a feed is serialized against.

use restfeed_core::request::FeedRequest;
use std::path::Path;

pub async fn run(path: Option<&Path>, content_type: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(path)?;
    let feed = super::open_feed(&config)?;

    let ct = feed.enabled_type(content_type)?;
    let schema = feed.get_schema(ct, &FeedRequest::default());
    println!("{}", serde_json::to_string_pretty(&schema.to_json())?);
    Ok(())
}
