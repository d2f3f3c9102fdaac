//! MCP tool implementations, one module per endpoint group.
//!
//! Each function takes the shared [`GenePatternClient`](genepattern_client::GenePatternClient),
//! the caller's [`CallContext`](genepattern_client::CallContext) and a param
//! struct, and returns the tool output as a string. Failures are rendered as
//! structured error JSON rather than protocol errors.

pub mod admin;
pub mod files;
pub mod helpers;
pub mod jobs;
pub mod params;
pub mod tasks;
pub mod uploads;

pub use params::*;
