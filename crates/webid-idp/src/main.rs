//! WebID identity provider entry point.
//!
//! Starts the HTTP service with configuration from a TOML file or
//! defaults; TLS termination and client-certificate verification are
//! the fronting proxy's job.

mod api;
mod config;
mod state;

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use webid_crypto::AuthoritySigningKey;
use webid_fetch::{FetchConfig, HttpDocumentFetcher};

use config::IdpConfig;
use state::AppState;

/// WebID delegated authentication identity provider
#[derive(Parser, Debug)]
#[command(name = "webid-idp", version, about = "WebID delegated authentication identity provider")]
struct Args {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "webid-idp.toml")]
    config: PathBuf,

    /// Override the HTTP port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Generate a default config file and exit.
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = IdpConfig::load(&args.config)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    if args.init {
        let config = IdpConfig::default();
        config.save(&args.config)?;
        tracing::info!(path = %args.config.display(), "wrote default config");
        return Ok(());
    }
    if config.authority.host.is_empty() {
        anyhow::bail!("authority.host is not configured");
    }

    let signing_key = Arc::new(AuthoritySigningKey::load(&config.authority.signing_key_path)?);

    let fetch_config = FetchConfig {
        timeout: config.fetch_timeout(),
        secretary_identity_pem: config.secretary.identity_pem.clone(),
    };
    let fetcher = Arc::new(HttpDocumentFetcher::new(&fetch_config)?);
    if let Some(webid) = &config.secretary.webid {
        tracing::info!(secretary = %webid, "fetching profiles as secretary agent");
    }

    let state = Arc::new(AppState {
        fetcher,
        signing_key,
        authority_host: config.authority.host.clone(),
    });

    let addr: SocketAddr =
        format!("{}:{}", config.server.listen_addr, config.server.port).parse()?;
    tracing::info!(%addr, host = %config.authority.host, "webid-idp listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, api::router(state)).await?;

    Ok(())
}
