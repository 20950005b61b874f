//! `restfeed init`: Write a default config file.

use restfeed_config::AppConfig;
use std::path::Path;

pub async fn run(path: Option<&Path>, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(AppConfig::config_path);

    if config_path.exists() && !force {
        println!("Config already exists at: {}", config_path.display());
        println!("   Edit it manually or re-run with --force.");
        return Ok(());
    }

    if let Some(dir) = config_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&config_path, AppConfig::default_toml())?;
    println!("Created config at: {}", config_path.display());
    println!("\nNext steps:");
    println!("  1. Set [site] name, home_url and rest_url");
    println!("  2. Point [content] path at your JSON-lines content export");
    println!("  3. Run `restfeed serve`");

    Ok(())
}
