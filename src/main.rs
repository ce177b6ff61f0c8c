use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use contactbook::{AppConfig, AppState, FileContactStore, FlashMessages, build_router};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Server-rendered contact directory backed by a JSON file.
#[derive(Debug, Parser)]
#[command(name = "contactbook", version, about)]
struct Cli {
    /// Interface to bind (overrides APP_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides APP_PORT)
    #[arg(long, short)]
    port: Option<u16>,

    /// Contacts JSON document (overrides CONTACTS_DATA_PATH)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Static asset directory (overrides CONTACTS_PUBLIC_DIR)
    #[arg(long)]
    public: Option<PathBuf>,
}

impl Cli {
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = self.host {
            config = config.host(host);
        }
        if let Some(port) = self.port {
            config = config.port(port);
        }
        if let Some(data) = self.data {
            config = config.data_path(data);
        }
        if let Some(public) = self.public {
            config = config.public_dir(public);
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.apply(
        AppConfig::from_env().context("failed to load application configuration")?,
    );

    let store = FileContactStore::open(&config.data_path)
        .await
        .with_context(|| format!("failed to open contact store {}", config.data_path.display()))?;
    info!(path = %config.data_path.display(), "contact store ready");

    let state = AppState::new(Arc::new(store), FlashMessages::new(config.flash_ttl));
    let app = build_router(state, &config.public_dir);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "contact book listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("contactbook=debug,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
