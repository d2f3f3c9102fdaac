//! GenePattern MCP Server
//!
//! Model Context Protocol server exposing the GenePattern REST API (jobs,
//! modules, files and uploads) to LLM agents over stdio or streamable HTTP.

use anyhow::Context;
use clap::Parser;

use genepattern_mcp::cli::{log_filter, Cli, Transport};
use genepattern_mcp::server::GenePatternMcpServer;
use genepattern_mcp::transport;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for the stdio transport.
    let filter = log_filter()?;
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let client = cli
        .build_client()
        .context("Failed to configure the GenePattern client")?;

    tracing::info!(
        transport = ?cli.transport,
        url = %client.base_url(),
        provider = client.credential_provider().name(),
        timeout_secs = cli.timeout_secs,
        "genepattern-mcp starting"
    );

    let server = GenePatternMcpServer::new(client);
    match cli.transport {
        Transport::Stdio => transport::serve_stdio(server).await,
        Transport::Http => transport::serve_http(server, &cli.host, cli.port).await,
    }
}
