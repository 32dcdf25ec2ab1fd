use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use profile_card::{GithubClient, ProfileStatsService, config::Config, web};

#[derive(Parser)]
#[command(name = "profile-card")]
#[command(version)]
#[command(about = "Serves an embeddable SVG card summarising a GitHub profile")]
struct Cli {
    /// Configuration file path (optional; missing file uses defaults)
    #[arg(short, long, default_value = "profile-card.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level, overridden by RUST_LOG
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("profile_card={},tower_http={}", cli.log_level, cli.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::load(&cli.config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    info!("Starting profile-card v{}", env!("CARGO_PKG_VERSION"));
    info!(
        api = %config.github.api_base_url,
        ttl_secs = config.cache.ttl_secs,
        "Configuration loaded"
    );

    let client = GithubClient::new(&config.github)?;
    let service = ProfileStatsService::new(Arc::new(client), config.cache.ttl()?)
        .with_active_repos(config.github.active_repo_limit);

    let ip: IpAddr = config
        .server
        .host
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.server.host))?;
    let addr = SocketAddr::new(ip, config.server.port);

    web::serve(web::router(Arc::new(service)), addr).await
}
