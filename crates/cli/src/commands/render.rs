//! `restfeed render`: Print a feed document as the server would send it.

use restfeed_core::request::FeedRequest;
use std::path::Path;

pub async fn run(
    path: Option<&Path>,
    content_type: &str,
    page: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(path)?;
    let feed = super::open_feed(&config)?;

    let request = FeedRequest { page };
    let doc = feed
        .get_feed(content_type, &request)
        .await
        .map_err(|e| format!("{} ({})", e, e.code()))?;

    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
