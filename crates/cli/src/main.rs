//! RestFeed CLI: the main entry point.
//!
//! Commands:
//! - `init`: Write a default config file
//! - `serve`: Start the HTTP feed server
//! - `render`: Print a feed document
//! - `schema`: Print a feed's JSON Schema
//! - `link-tags`: Print discovery `<link>` tags
//! - `status`: Show configuration and registered feeds

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "restfeed",
    about = "RestFeed: JSON Feed endpoints for site content",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ~/.restfeed/config.toml)
    #[arg(short, long, global = true, env = "RESTFEED_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Start the HTTP feed server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the feed document for a content type
    Render {
        /// Content type name, e.g. `post`
        #[arg(default_value = "post")]
        content_type: String,

        /// Page number
        #[arg(short, long)]
        page: Option<u64>,
    },

    /// Print the JSON Schema of a content type's feed
    Schema {
        #[arg(default_value = "post")]
        content_type: String,
    },

    /// Print the discovery link tags for a page context
    LinkTags {
        /// Viewing a collection of this content type
        #[arg(long, conflicts_with = "single")]
        collection: Option<String>,

        /// Viewing a single item of this content type
        #[arg(long)]
        single: Option<String>,
    },

    /// Show configuration and registered feeds
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Init { force } => commands::init::run(config, force).await?,
        Commands::Serve { port } => commands::serve::run(config, port).await?,
        Commands::Render { content_type, page } => {
            commands::render::run(config, &content_type, page).await?
        }
        Commands::Schema { content_type } => commands::schema::run(config, &content_type).await?,
        Commands::LinkTags { collection, single } => {
            commands::link_tags::run(config, collection, single).await?
        }
        Commands::Status => commands::status::run(config).await?,
    }

    Ok(())
}
