//! Stdio and streamable HTTP transports.

use rmcp::transport::streamable_http_server::session::local::LocalSessionManager;
use rmcp::transport::streamable_http_server::{StreamableHttpServerConfig, StreamableHttpService};
use rmcp::ServiceExt;
use tokio::net::TcpListener;
use tracing::info;

use crate::server::GenePatternMcpServer;

/// Path the HTTP transport is mounted at.
pub const MCP_PATH: &str = "/mcp";

/// Serve one session over stdin/stdout until the client disconnects.
pub async fn serve_stdio(server: GenePatternMcpServer) -> anyhow::Result<()> {
    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;
    Ok(())
}

/// Build the axum router with the MCP service mounted at [`MCP_PATH`].
///
/// Each session gets a clone of `server`; clones share the HTTP client.
pub fn http_router(server: GenePatternMcpServer) -> axum::Router {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );
    axum::Router::new().nest_service(MCP_PATH, service)
}

/// Serve streamable HTTP on `host:port` until Ctrl-C.
pub async fn serve_http(server: GenePatternMcpServer, host: &str, port: u16) -> anyhow::Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    info!(addr = %listener.local_addr()?, path = MCP_PATH, "Listening for MCP over HTTP");

    axum::serve(listener, http_router(server))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}
