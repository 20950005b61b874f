//! `restfeed serve`: Start the HTTP feed server.

use std::path::Path;

pub async fn run(path: Option<&Path>, port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(path)?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("RestFeed");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Namespace: {}", config.feed.namespace);

    restfeed_gateway::start(config).await?;

    Ok(())
}
