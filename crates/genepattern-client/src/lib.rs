//! # GenePattern Client
//!
//! Authenticated client for the GenePattern REST API.
//!
//! The crate has three layers:
//!
//! - [`auth`]: credential providers that produce an API key for a call context.
//! - [`client`]: the dispatcher, which issues one request per call and
//!   normalizes the response by content type.
//! - [`api`]: the endpoint catalog, one typed method per REST operation.
//!
//! Module documentation retrieval lives in [`documentation`].
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use genepattern_client::{CallContext, ClientConfig, EnvCredentialProvider, GenePatternClient};
//!
//! # async fn example() -> genepattern_client::ClientResult<()> {
//! let client = GenePatternClient::new(
//!     &ClientConfig::from_env(),
//!     Arc::new(EnvCredentialProvider::default()),
//! )?;
//! let status = client.get_job_status(&CallContext::empty(), "12345").await?;
//! println!("{status:?}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod documentation;
pub mod error;
pub mod request;
pub mod response;

pub use api::jobs::{JobDetailOptions, JobSearchQuery};
pub use api::server_config::SystemMessage;
pub use api::tags::PinRequest;
pub use api::tasks::{CategorySummary, ModuleListing, ModuleSummary, TaskDetailOptions};
pub use api::uploads::{CompletedPart, ResumableChunk};
pub use auth::{
    BearerPassthroughProvider, CallContext, CredentialProvider, CredentialProviderRegistry,
    EnvCredentialProvider, ProviderConstructor, ProviderSettings, StaticCredentialProvider,
};
pub use client::GenePatternClient;
pub use config::{ClientConfig, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
pub use documentation::{
    DocumentationLookup, DocumentationUnavailable, ExtractionError, LopdfExtractor,
    ModuleDocumentation, PageTextExtractor,
};
pub use error::{ClientError, ClientResult};
pub use request::{ApiRequest, MultipartBody, RequestBody, ToQueryValue};
pub use response::{ApiResponse, NO_CONTENT_MESSAGE};
