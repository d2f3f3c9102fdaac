//! GenePattern MCP Server library.
//!
//! Provides the [`server::GenePatternMcpServer`] handler, the tool parameter
//! types, and the CLI and transport wiring used by the `genepattern-mcp`
//! binary. Exposed as a library for integration testing.

pub mod cli;
pub mod server;
pub mod tools;
pub mod transport;
