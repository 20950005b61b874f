pub mod init;
pub mod link_tags;
pub mod render;
pub mod schema;
pub mod serve;
pub mod status;

use restfeed_config::AppConfig;
use restfeed_feed::FeedService;
use std::path::Path;
use tracing::debug;

/// Load the config file at `path`, or the default one.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let resolved = path.map(Path::to_path_buf).unwrap_or_else(AppConfig::config_path);
    debug!(path = %resolved.display(), "Loading config");
    let config = AppConfig::load_with_env(&resolved)
        .map_err(|e| format!("Failed to load config: {e}"))?;
    Ok(config)
}

/// Build the feed service over the configured store.
pub fn open_feed(config: &AppConfig) -> Result<FeedService, Box<dyn std::error::Error>> {
    let store = restfeed_gateway::open_store(config)
        .map_err(|e| format!("Failed to open content store: {e}"))?;
    let feed = restfeed_gateway::feed_service(config, store);
    debug!(store = feed.store_name(), feeds = feed.feed_types().count(), "Feed service ready");
    Ok(feed)
}
