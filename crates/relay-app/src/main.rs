use relay_client::{PasswordGrant, UpstreamClient};
use relay_hex::application::relay_service::RelayService;
use relay_hex::config::{Config, UpstreamConfig};
use relay_hex::inbound::http::{HttpServer, HttpServerConfig};

fn build_client(upstream: UpstreamConfig) -> anyhow::Result<UpstreamClient> {
    let grant = PasswordGrant {
        client_id: upstream.client_id,
        client_secret: upstream.client_secret,
        username_prefix: upstream.username_prefix,
        password: upstream.password,
    };
    UpstreamClient::builder(&upstream.api_url, &upstream.auth_url, grant)?
        .with_timeout(upstream.timeout)
        .accept_invalid_certs(upstream.accept_invalid_certs)
        .build()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for MANHATTAN_PASSWORD / MANHATTAN_SECRET when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "configuration loaded");

    let service = RelayService::new(build_client(config.upstream.clone())?);

    let server_cfg = HttpServerConfig {
        port: config.server_port.clone(),
        index_file: config.index_file.clone(),
    };

    let http = HttpServer::new(service, server_cfg).await?;
    http.run().await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(extra: &[(&str, &str)]) -> Config {
        let mut vars = vec![("MANHATTAN_PASSWORD", "p"), ("MANHATTAN_SECRET", "s")];
        vars.extend_from_slice(extra);
        Config::from_lookup(|key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        })
        .unwrap()
    }

    #[test]
    fn builds_client_from_default_config() {
        assert!(build_client(config(&[]).upstream).is_ok());
    }

    #[test]
    fn builds_client_with_cert_bypass() {
        let cfg = config(&[("UPSTREAM_ACCEPT_INVALID_CERTS", "1")]);
        assert!(cfg.upstream.accept_invalid_certs);
        assert!(build_client(cfg.upstream).is_ok());
    }

    #[test]
    fn rejects_unusable_upstream_url() {
        let cfg = config(&[("UPSTREAM_API_URL", "not a url")]);
        assert!(build_client(cfg.upstream).is_err());
    }
}
