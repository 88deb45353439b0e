//! saveur MCP server entry point
//!
//! # Usage
//!
//! ```bash
//! saveur-mcp [--server recipes|images|composite] [--pexels-key KEY]
//! ```
//!
//! # Environment Variables
//!
//! - `PEXELS_API_KEY`: API key for the image-search flavours
//! - `RUST_LOG`: Control log verbosity (default: `saveur_mcp=info`)
//!
//! # Protocol
//!
//! The server communicates via JSON-RPC 2.0 over stdio:
//! - Requests/responses go through stdout
//! - Logs go to stderr (to avoid interfering with the protocol)

use std::sync::Arc;

use clap::{Parser, ValueEnum};

use saveur_mcp::McpServer;
use saveur_mcp::collab::{MarmitonScraper, PexelsClient};
use saveur_mcp::server::default_recipe_deps;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ServerKind {
    /// Recipe suggestion tools, resources, and prompts
    Recipes,
    /// Standalone Pexels image search
    Images,
    /// Recipe-image composite (image server nested behind forwarding tools)
    Composite,
}

/// MCP server for recipe suggestion and food-image lookup
#[derive(Parser)]
#[command(name = "saveur-mcp")]
#[command(about = "MCP server for recipe suggestion and food-image lookup")]
#[command(version)]
struct Args {
    /// Which server to run
    #[arg(long, value_enum, default_value_t = ServerKind::Recipes)]
    server: ServerKind,

    /// Pexels API key (required for images/composite)
    #[arg(long, env = "PEXELS_API_KEY")]
    pexels_key: Option<String>,

    /// Override the recipe-site base URL (testing against a local server)
    #[arg(long)]
    scrape_base_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr; stdout is reserved for the MCP protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("saveur_mcp=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let server = match args.server {
        ServerKind::Recipes => {
            let mut deps = default_recipe_deps();
            if let Some(base_url) = args.scrape_base_url {
                deps.scraper = Arc::new(MarmitonScraper::with_base_url(base_url));
            }
            McpServer::recipes(deps)?
        }
        ServerKind::Images | ServerKind::Composite => {
            let key = args
                .pexels_key
                .ok_or("PEXELS_API_KEY is required for the image servers")?;
            let search = Arc::new(PexelsClient::new(key));
            match args.server {
                ServerKind::Images => McpServer::images(search)?,
                _ => McpServer::composite(search)?,
            }
        }
    };

    tracing::info!(server = %server.name(), "Starting saveur-mcp");
    server.run().await?;

    Ok(())
}
