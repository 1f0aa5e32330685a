//! Docsearch MCP Server - Main entry point
//!
//! Loads a documentation search index at startup and serves queries over the
//! Model Context Protocol on stdio.

use anyhow::Result;
use docsearch_mcp_server::{Config, DocSearchMcpServer, DocSearchTools};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let fallback_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        "Loading search index from {}",
        config.index_path.display()
    );

    let search_tools = match DocSearchTools::from_config(&config) {
        Ok(tools) => tools,
        Err(e) => {
            error!("Failed to load search index: {}", e);
            return Err(e.into());
        }
    };

    let stats = search_tools.stats();
    info!(
        "Search index ready: {} records, {} terms, {} skipped",
        stats.records, stats.distinct_tokens, stats.skipped_records
    );

    let server = DocSearchMcpServer::new(search_tools);

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    docsearch_mcp_server::server::run_server(server).await?;

    info!("Docsearch MCP Server shutdown complete");
    Ok(())
}
