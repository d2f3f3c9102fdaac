//! Command-line and environment configuration.
//!
//! Flags win over environment variables, which win over defaults. Everything
//! is resolved once at startup; a bad value stops the process before any
//! transport is opened.

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use genepattern_client::{
    ClientConfig, ClientResult, CredentialProvider, CredentialProviderRegistry, GenePatternClient,
    ProviderSettings, DEFAULT_BASE_URL,
};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

/// How the MCP server talks to its client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout.
    Stdio,
    /// Streamable HTTP at `/mcp`.
    Http,
}

#[derive(Parser, Debug)]
#[command(name = "genepattern-mcp", version)]
#[command(about = "MCP server exposing the GenePattern REST API as tools")]
pub struct Cli {
    /// GenePattern server base URL (the REST API lives under {url}/rest)
    #[arg(long, env = "GENEPATTERN_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// API key for the 'static' credential provider
    #[arg(long, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Credential provider: env, static or bearer-passthrough.
    /// Defaults to 'static' when --api-key is given, otherwise 'env'
    #[arg(long, env = "GENEPATTERN_AUTH_PROVIDER")]
    pub auth_provider: Option<String>,

    /// Environment variable the 'env' provider reads the key from on each call
    #[arg(long, env = "GENEPATTERN_KEY_ENV")]
    pub api_key_env: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "GENEPATTERN_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,

    #[arg(long, value_enum, env = "GENEPATTERN_MCP_TRANSPORT", default_value_t = Transport::Stdio)]
    pub transport: Transport,

    /// Bind address for the HTTP transport
    #[arg(long, env = "GENEPATTERN_MCP_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port for the HTTP transport
    #[arg(long, env = "GENEPATTERN_MCP_PORT", default_value_t = 8000)]
    pub port: u16,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Name of the credential provider to build.
    pub fn provider_name(&self) -> &str {
        match (&self.auth_provider, &self.api_key) {
            (Some(name), _) => name.as_str(),
            (None, Some(_)) => "static",
            (None, None) => CredentialProviderRegistry::DEFAULT_PROVIDER,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.url.clone()).with_timeout_ms(self.timeout_secs.saturating_mul(1000))
    }

    pub fn credential_provider(&self) -> ClientResult<Arc<dyn CredentialProvider>> {
        let settings = ProviderSettings {
            api_key: self.api_key.clone().map(SecretString::from),
            api_key_env: self.api_key_env.clone(),
        };
        CredentialProviderRegistry::with_builtin().build(self.provider_name(), &settings)
    }

    /// Build the shared client. Any error here is a startup failure.
    pub fn build_client(&self) -> ClientResult<GenePatternClient> {
        let provider = self.credential_provider()?;
        GenePatternClient::new(&self.client_config(), provider)
    }
}

/// `RUST_LOG` plus `info` for the server and client crates.
pub fn log_filter() -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive("genepattern_mcp=info".parse()?)
        .add_directive("genepattern_client=info".parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use genepattern_client::ClientError;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["genepattern-mcp"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars_unset(
            [
                "GENEPATTERN_URL",
                "GENEPATTERN_AUTH_PROVIDER",
                "GENEPATTERN_KEY_ENV",
                "GENEPATTERN_TIMEOUT_SECS",
                "GENEPATTERN_MCP_TRANSPORT",
                "GENEPATTERN_MCP_HOST",
                "GENEPATTERN_MCP_PORT",
            ],
            || {
                let cli = parse(&[]);
                assert_eq!(cli.url, DEFAULT_BASE_URL);
                assert_eq!(cli.transport, Transport::Stdio);
                assert_eq!(cli.timeout_secs, 120);
                assert_eq!(cli.port, 8000);
                assert_eq!(cli.provider_name(), "env");
                assert_eq!(cli.client_config().timeout_ms, 120_000);
            },
        );
    }

    #[test]
    fn test_flag_wins_over_env() {
        temp_env::with_var("GENEPATTERN_URL", Some("http://from-env:8080/gp"), || {
            assert_eq!(parse(&[]).url, "http://from-env:8080/gp");
            let cli = parse(&["--url", "http://from-flag/gp"]);
            assert_eq!(cli.url, "http://from-flag/gp");
        });
    }

    #[test]
    fn test_api_key_selects_static_provider() {
        temp_env::with_var_unset("GENEPATTERN_AUTH_PROVIDER", || {
            let cli = parse(&["--api-key", "abc"]);
            assert_eq!(cli.provider_name(), "static");
            assert_eq!(cli.credential_provider().unwrap().name(), "static");
        });
    }

    #[test]
    fn test_explicit_provider_wins() {
        let cli = parse(&["--api-key", "abc", "--auth-provider", "bearer-passthrough"]);
        assert_eq!(cli.provider_name(), "bearer-passthrough");
    }

    #[test]
    fn test_unknown_provider_is_fatal() {
        let cli = parse(&["--auth-provider", "kerberos"]);
        let err = cli.build_client().unwrap_err();
        assert!(matches!(err, ClientError::UnknownCredentialProvider { .. }));
        assert!(err.is_startup_error());
    }

    #[test]
    fn test_static_without_key_is_fatal() {
        let cli = parse(&["--auth-provider", "static"]);
        assert!(matches!(
            cli.build_client().unwrap_err(),
            ClientError::ConfigError(_)
        ));
    }

    #[test]
    fn test_bad_url_is_fatal() {
        let cli = parse(&["--url", "not a url", "--api-key", "abc"]);
        assert!(matches!(
            cli.build_client().unwrap_err(),
            ClientError::ConfigError(_)
        ));
    }

    #[test]
    fn test_http_transport() {
        let cli = parse(&["--transport", "http", "--host", "0.0.0.0", "--port", "9000"]);
        assert_eq!(cli.transport, Transport::Http);
        assert_eq!((cli.host.as_str(), cli.port), ("0.0.0.0", 9000));
    }

    #[test]
    fn test_log_filter_covers_both_crates() {
        temp_env::with_var_unset("RUST_LOG", || {
            let filter = log_filter().unwrap().to_string();
            assert!(filter.contains("genepattern_mcp=info"), "{filter}");
            assert!(filter.contains("genepattern_client=info"), "{filter}");
        });
    }

    #[test]
    fn test_invalid_transport_rejected() {
        assert!(Cli::try_parse_from(["genepattern-mcp", "--transport", "sse"]).is_err());
    }
}
