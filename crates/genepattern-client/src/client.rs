//! Authenticated request dispatcher for the GenePattern REST API.
//!
//! Every catalog operation funnels through [`GenePatternClient::dispatch`]:
//! one credential lookup, one HTTP request, one normalized response. There is
//! no retry, and the only timeout is the per-call one from [`ClientConfig`].

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use tracing::{debug, warn};
use url::Url;

use crate::auth::{CallContext, CredentialProvider};
use crate::config::ClientConfig;
use crate::documentation::{LopdfExtractor, PageTextExtractor};
use crate::error::{ClientError, ClientResult};
use crate::request::{ApiRequest, RequestBody};
use crate::response::ApiResponse;

/// GenePattern REST client.
///
/// Cheap to clone; clones share the connection pool and credential provider.
#[derive(Debug, Clone)]
pub struct GenePatternClient {
    pub(crate) http: reqwest::Client,
    base_url: Url,
    rest_url: String,
    credentials: Arc<dyn CredentialProvider>,
    pub(crate) extractor: Arc<dyn PageTextExtractor>,
}

impl GenePatternClient {
    /// Build a client. Fails on an unusable base URL or HTTP stack setup error.
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> ClientResult<Self> {
        let base_url = config.base()?;
        let rest_url = config.rest_url()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("genepattern-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::config_error(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            rest_url,
            credentials,
            extractor: Arc::new(LopdfExtractor),
        })
    }

    /// Replace the PDF text extractor used for module documentation.
    pub fn with_page_extractor(mut self, extractor: Arc<dyn PageTextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    pub fn credential_provider(&self) -> &dyn CredentialProvider {
        self.credentials.as_ref()
    }

    /// Issue one authenticated request and normalize the response.
    ///
    /// Fails closed with [`ClientError::MissingCredential`] when the provider
    /// has no key for this context; nothing is sent in that case.
    pub async fn dispatch(
        &self,
        context: &CallContext,
        request: ApiRequest,
    ) -> ClientResult<ApiResponse> {
        let provider = self.credentials.name();
        let api_key = self
            .credentials
            .api_key(context)
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or_else(|| {
                warn!(provider, path = %request.path, "No API key available, request not sent");
                ClientError::MissingCredential {
                    provider: provider.to_string(),
                }
            })?;

        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret())).map_err(|_| {
                ClientError::config_error(format!(
                    "API key from credential provider '{provider}' is not a valid header value"
                ))
            })?;
        authorization.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(AUTHORIZATION, authorization);
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let ApiRequest {
            method,
            path,
            query,
            body,
            headers,
        } = request;

        let url = self.endpoint_url(&path)?;
        let query: Vec<(String, String)> = query
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();

        debug!(%method, %url, body = body.kind(), provider, "Dispatching GenePattern request");

        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .headers(default_headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Raw(bytes) => builder.body(bytes),
            RequestBody::Multipart(form) => builder.multipart(form.into_form()),
        };
        if !headers.is_empty() {
            let overrides: HeaderMap = headers.into_iter().collect();
            builder = builder.headers(overrides);
        }

        let response = builder.send().await.map_err(|e| {
            warn!(%method, %url, error = %e, "GenePattern request failed before a response arrived");
            ClientError::transport(&e)
        })?;

        normalize_response(response).await
    }

    /// Append `path` to the REST root one segment at a time.
    ///
    /// Segments are percent-encoded, so `#`, `?` and `%` in a file name stay
    /// part of the path. `.` and `..` segments are rejected.
    fn endpoint_url(&self, path: &str) -> ClientResult<Url> {
        let relative = path.strip_prefix('/').unwrap_or(path);
        if let Some(segment) = relative.split('/').find(|s| *s == "." || *s == "..") {
            return Err(ClientError::invalid_input(format!(
                "Invalid request path '{path}': '{segment}' segments are not allowed"
            )));
        }

        let mut url = Url::parse(&self.rest_url).map_err(|e| {
            ClientError::config_error(format!("Invalid REST URL '{}': {e}", self.rest_url))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::config_error(format!("REST URL '{}' cannot carry a path", self.rest_url))
            })?
            .pop_if_empty()
            .extend(relative.split('/'));
        Ok(url)
    }
}

/// Body of a rejected request, or a marker when it could not be read.
fn rejection_body(body: reqwest::Result<String>) -> String {
    body.unwrap_or_else(|e| format!("<body unavailable: {e}>"))
}

/// Map status and content type onto [`ApiResponse`] or a remote rejection.
async fn normalize_response(response: reqwest::Response) -> ClientResult<ApiResponse> {
    let status = response.status();
    let url = response.url().to_string();

    if status.as_u16() >= 400 {
        let body = rejection_body(response.text().await);
        warn!(status = status.as_u16(), %url, "GenePattern rejected the request");
        return Err(ClientError::api_error(status.as_u16(), url, body));
    }

    if status == StatusCode::NO_CONTENT {
        return Ok(ApiResponse::Acknowledged);
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let media = content_type
        .as_deref()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let data = response
        .bytes()
        .await
        .map_err(|e| ClientError::transport(&e))?;

    if media.contains("application/json") {
        return Ok(ApiResponse::Json(serde_json::from_slice(&data)?));
    }
    if media.contains("text/") {
        return Ok(ApiResponse::Text(String::from_utf8_lossy(&data).into_owned()));
    }
    Ok(ApiResponse::Bytes { content_type, data })
}
