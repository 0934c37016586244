//! MCP Server binary entry point
//!
//! Run with: cargo run --bin linkd-escrow-mcp

use linkd_escrow_mcp::mcp::LinkdEscrowService;
use linkd_escrow_mcp::{LinkdSdk, NetworkConfig};
use rmcp::{ServiceExt, transport::stdio};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging to stderr (stdout is for MCP protocol)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = NetworkConfig::from_env();
    info!(
        network = ?config.network,
        "Linkd Escrow MCP Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Network selection is supplied once here and never mutated afterwards
    let service = LinkdEscrowService::new(LinkdSdk::new(config))
        .serve(stdio())
        .await?;

    info!("MCP server running on stdio, waiting for requests...");

    // Wait for shutdown
    service.waiting().await?;

    info!("MCP server shutting down");
    Ok(())
}
