//! `restfeed status`: Show configuration and registered feeds.

use restfeed_config::AppConfig;
use std::path::Path;

pub async fn run(path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(path)?;
    let feed = super::open_feed(&config)?;

    println!("RestFeed Status");
    println!("===============");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Site:         {}", config.site.name);
    println!("  REST root:    {}", config.site.rest_url);
    println!("  Namespace:    {}", feed.urls().namespace());
    println!("  Version:      {}", feed.version());
    println!(
        "  Compat:       {}",
        if config.feed.skip_backward_compatibility { "v1.1 only" } else { "author + authors" }
    );
    println!("  Page size:    {}", config.site.posts_per_feed);
    println!("  Store:        {}", feed.store_name());
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);

    println!("\n  Feeds:");
    let mut any = false;
    for ct in feed.feed_types() {
        any = true;
        println!("    {:<12} {}", ct.name, feed.feed_url(ct));
    }
    if !any {
        println!("    (none enabled)");
    }

    let config_path = path.map(Path::to_path_buf).unwrap_or_else(AppConfig::config_path);
    if config_path.exists() {
        println!("\n  Config file found");
    } else {
        println!("\n  No config file, run `restfeed init` first");
    }

    Ok(())
}
