use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use backend::{config::load_config, create_router, forward::RouteForwarder, AppState};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(about = "Serves the walking route client and relays route requests")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "WALK_ADDR", default_value = "0.0.0.0:8000")]
    addr: SocketAddr,

    /// JSON config file; only its public part is published
    #[arg(long, env = "WALK_CONFIG", default_value = "config.json")]
    config: PathBuf,

    /// Directory holding the built client
    #[arg(long, env = "WALK_STATIC_DIR", default_value = "frontend")]
    static_dir: PathBuf,

    /// Endpoint of the external route generation service
    #[arg(long, env = "WALK_GENERATOR_URL")]
    generator_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = load_config(&args.config)
        .with_context(|| format!("loading config from {}", args.config.display()))?;
    tracing::info!("loaded config from {}", args.config.display());

    let forwarder = RouteForwarder::new(args.generator_url);
    tracing::info!("route requests go to {}", forwarder.target());

    let state = AppState {
        config: Arc::new(config),
        forwarder: Arc::new(forwarder),
    };
    let app = create_router(state, Some(args.static_dir.clone()));

    tracing::info!("serving client from {}", args.static_dir.display());
    tracing::info!("starting backend on http://{}", args.addr);
    tracing::info!("  GET /api/config - public configuration");
    tracing::info!("  POST /api/generate-route - relayed to the route generator");

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("binding {}", args.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
