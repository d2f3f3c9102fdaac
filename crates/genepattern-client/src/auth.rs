//! Credential providers and the per-call context they read from.
//!
//! A single [`CredentialProvider`] is chosen at startup by name through a
//! [`CredentialProviderRegistry`] and shared by every call. Lookups of an
//! unknown name fail; there is no fallback to the default provider.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderMap, AUTHORIZATION};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::config::API_KEY_ENV;
use crate::error::{ClientError, ClientResult};

/// Header carrying the MCP session id on the streamable HTTP transport.
pub const SESSION_ID_HEADER: &str = "mcp-session-id";

/// Opaque per-invocation handle passed through every operation.
///
/// Only credential providers look inside it. On the HTTP transport it carries
/// the inbound request headers; on stdio it is empty.
#[derive(Clone, Default)]
pub struct CallContext {
    headers: HeaderMap,
}

impl CallContext {
    /// A context with nothing in it (stdio transport, tests).
    pub fn empty() -> Self {
        Self::default()
    }

    /// A context built from the inbound request headers.
    pub fn from_headers(headers: HeaderMap) -> Self {
        Self { headers }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn session_id(&self) -> Option<&str> {
        self.header(SESSION_ID_HEADER)
    }

    /// Token from an inbound `Authorization: Bearer ...` header.
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| {
                s.strip_prefix("Bearer ")
                    .or_else(|| s.strip_prefix("bearer "))
            })
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

// Header values may hold credentials; only names are printed.
impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.headers.keys().map(|k| k.as_str()).collect();
        f.debug_struct("CallContext")
            .field("headers", &names)
            .finish()
    }
}

/// Produces the GenePattern API key for a call, or `None` when there is none.
///
/// Implementations are shared across concurrent calls and must not rely on
/// unsynchronized mutable state.
pub trait CredentialProvider: Send + Sync + fmt::Debug {
    /// Registry name of this provider, used in diagnostics.
    fn name(&self) -> &str;

    fn api_key(&self, context: &CallContext) -> Option<SecretString>;
}

/// Reads the key from an environment variable on every call.
///
/// Not cached: changing the variable takes effect on the next call.
#[derive(Debug, Clone)]
pub struct EnvCredentialProvider {
    variable: String,
}

impl EnvCredentialProvider {
    pub fn new(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::new(API_KEY_ENV)
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn name(&self) -> &str {
        "env"
    }

    fn api_key(&self, _context: &CallContext) -> Option<SecretString> {
        std::env::var(&self.variable)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(SecretString::from)
    }
}

/// A key fixed at startup.
#[derive(Debug)]
pub struct StaticCredentialProvider {
    key: SecretString,
}

impl StaticCredentialProvider {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: SecretString::from(key.into()),
        }
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn name(&self) -> &str {
        "static"
    }

    fn api_key(&self, _context: &CallContext) -> Option<SecretString> {
        Some(SecretString::from(self.key.expose_secret().to_owned()))
    }
}

/// Forwards the bearer token the MCP caller presented on the inbound HTTP
/// request, so each caller acts with their own GenePattern key.
#[derive(Debug, Clone, Default)]
pub struct BearerPassthroughProvider;

impl CredentialProvider for BearerPassthroughProvider {
    fn name(&self) -> &str {
        "bearer-passthrough"
    }

    fn api_key(&self, context: &CallContext) -> Option<SecretString> {
        context
            .bearer_token()
            .map(|token| SecretString::from(token.to_owned()))
    }
}

/// Inputs available to provider constructors at startup.
#[derive(Debug, Default)]
pub struct ProviderSettings {
    /// Key supplied explicitly at startup (`--api-key`).
    pub api_key: Option<SecretString>,
    /// Variable read by the `env` provider. Defaults to `GENEPATTERN_KEY`.
    pub api_key_env: Option<String>,
}

/// Builds a provider from startup settings.
pub type ProviderConstructor = fn(&ProviderSettings) -> ClientResult<Arc<dyn CredentialProvider>>;

fn build_env(settings: &ProviderSettings) -> ClientResult<Arc<dyn CredentialProvider>> {
    let variable = settings
        .api_key_env
        .clone()
        .unwrap_or_else(|| API_KEY_ENV.to_string());
    Ok(Arc::new(EnvCredentialProvider::new(variable)))
}

fn build_static(settings: &ProviderSettings) -> ClientResult<Arc<dyn CredentialProvider>> {
    let key = settings
        .api_key
        .as_ref()
        .map(|k| k.expose_secret().trim().to_owned())
        .filter(|k| !k.is_empty())
        .ok_or_else(|| {
            ClientError::config_error("The 'static' credential provider requires an API key")
        })?;
    Ok(Arc::new(StaticCredentialProvider::new(key)))
}

fn build_bearer_passthrough(
    _settings: &ProviderSettings,
) -> ClientResult<Arc<dyn CredentialProvider>> {
    Ok(Arc::new(BearerPassthroughProvider))
}

/// Name → constructor table for credential providers.
///
/// The set is small, so entries live in a `Vec` in registration order and are
/// looked up linearly.
#[derive(Debug, Clone)]
pub struct CredentialProviderRegistry {
    entries: Vec<(String, ProviderConstructor)>,
}

impl Default for CredentialProviderRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl CredentialProviderRegistry {
    /// Name of the provider used when none is configured.
    pub const DEFAULT_PROVIDER: &'static str = "env";

    /// A registry with no providers.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// A registry holding `env`, `static` and `bearer-passthrough`.
    pub fn with_builtin() -> Self {
        Self {
            entries: vec![
                ("env".to_string(), build_env as ProviderConstructor),
                ("static".to_string(), build_static as ProviderConstructor),
                (
                    "bearer-passthrough".to_string(),
                    build_bearer_passthrough as ProviderConstructor,
                ),
            ],
        }
    }

    /// Add a provider under `name`. Names are case-insensitive and must be unique.
    pub fn register(&mut self, name: &str, constructor: ProviderConstructor) -> ClientResult<()> {
        let key = normalize(name);
        if key.is_empty() {
            return Err(ClientError::config_error(
                "Credential provider name must not be empty",
            ));
        }
        if self.entries.iter().any(|(n, _)| *n == key) {
            return Err(ClientError::config_error(format!(
                "Credential provider '{}' is already registered",
                key
            )));
        }
        self.entries.push((key, constructor));
        Ok(())
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Resolve `name` and construct the provider.
    pub fn build(
        &self,
        name: &str,
        settings: &ProviderSettings,
    ) -> ClientResult<Arc<dyn CredentialProvider>> {
        let key = normalize(name);
        let constructor = self
            .entries
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, c)| *c)
            .ok_or_else(|| ClientError::UnknownCredentialProvider {
                name: name.to_string(),
                available: self.names().join(", "),
            })?;
        let provider = constructor(settings)?;
        debug!(provider = provider.name(), "Credential provider initialized");
        Ok(provider)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}
