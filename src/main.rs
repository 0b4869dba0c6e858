use anyhow::{Context, bail};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pace_waitlist::config::{Args, StoreKind};
use pace_waitlist::handlers;
use pace_waitlist::rate_limit::RateLimiter;
use pace_waitlist::state::AppState;
use pace_waitlist::store::{MemoryStore, SignupStore, SupabaseStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // parse cli arguments
    let args = Args::parse();
    init_tracing(args.log_json);

    let store = build_store(&args)?;
    let rate_window = Duration::from_secs(args.rate_window);

    let state = Arc::new(AppState::new(
        RateLimiter::new(args.rate_limit, rate_window),
        store,
    ));
    let app = handlers::router(state.clone());

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(version = env!("CARGO_PKG_VERSION"), %addr, "Waitlist server running");
    info!(store = state.store.kind(), table = %args.table, "Signup store ready");
    info!(
        "Rate limit: {} requests per {} seconds",
        args.rate_limit, args.rate_window
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Waitlist server stopped");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_store(args: &Args) -> anyhow::Result<Arc<dyn SignupStore>> {
    match args.store {
        StoreKind::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreKind::Supabase => {
            let Some((url, key)) = args.supabase_credentials() else {
                bail!("SUPABASE_URL and SUPABASE_SERVICE_ROLE must be set for the supabase store");
            };
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(args.store_timeout))
                .build()
                .context("failed to build HTTP client")?;
            Ok(Arc::new(SupabaseStore::new(client, url, key, &args.table)))
        }
    }
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
