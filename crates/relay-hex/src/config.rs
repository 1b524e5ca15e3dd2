use anyhow::Context;
use secrecy::SecretString;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://salep.sce.manh.com";
pub const DEFAULT_AUTH_URL: &str = "https://salep-auth.sce.manh.com";
pub const DEFAULT_CLIENT_ID: &str = "omnicomponent.1.0.0";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: String,
    /// File served for every path no route matches.
    pub index_file: PathBuf,
    pub upstream: UpstreamConfig,
}

#[derive(Clone)]
pub struct UpstreamConfig {
    pub api_url: String,
    pub auth_url: String,
    pub client_id: String,
    pub client_secret: SecretString,
    pub username_prefix: String,
    pub password: SecretString,
    pub timeout: Duration,
    pub accept_invalid_certs: bool,
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_url", &self.api_url)
            .field("auth_url", &self.auth_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("username_prefix", &self.username_prefix)
            .field("password", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (Some(password), Some(client_secret)) =
            (var("MANHATTAN_PASSWORD"), var("MANHATTAN_SECRET"))
        else {
            anyhow::bail!("Missing MANHATTAN_PASSWORD or MANHATTAN_SECRET environment variables");
        };

        let timeout = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .with_context(|| format!("invalid UPSTREAM_TIMEOUT_SECS: {raw}"))?,
            ),
            None => Duration::from_secs(60),
        };
        let accept_invalid_certs = match var("UPSTREAM_ACCEPT_INVALID_CERTS") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("invalid UPSTREAM_ACCEPT_INVALID_CERTS: {raw}"))?,
            None => false,
        };

        Ok(Self {
            server_port: var("SERVER_PORT").unwrap_or_else(|| "3000".into()),
            index_file: var("STATIC_INDEX")
                .unwrap_or_else(|| "index.html".into())
                .into(),
            upstream: UpstreamConfig {
                api_url: var("UPSTREAM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
                auth_url: var("UPSTREAM_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.into()),
                client_id: var("UPSTREAM_CLIENT_ID").unwrap_or_else(|| DEFAULT_CLIENT_ID.into()),
                client_secret: SecretString::from(client_secret),
                username_prefix: var("UPSTREAM_USERNAME_PREFIX").unwrap_or_else(|| {
                    relay_types::domain::tenant::DEFAULT_USERNAME_PREFIX.into()
                }),
                password: SecretString::from(password),
                timeout,
                accept_invalid_certs,
            },
        })
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got {other:?}"),
    }
}
