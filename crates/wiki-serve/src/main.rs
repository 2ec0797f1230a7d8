//! `wiki-serve` binary: serves the page directory over HTTP until Ctrl-C.

use anyhow::Context;
use axum::Router;
use axum::http::Request;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use wiki_serve::{AppState, Config, router};

/// Serve a directory of flat-file wiki pages.
#[derive(Parser, Debug)]
#[command(name = "wiki-serve")]
#[command(about = "Minimal file-backed wiki server", long_about = None)]
struct Args {
    /// `.env` file with `WIKI_*` settings; skipped when absent.
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if std::path::Path::new(&args.dotenv).exists() {
        dotenvy::from_path(&args.dotenv)
            .with_context(|| format!("failed to read {}", args.dotenv))?;
    }
    init_tracing();

    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();

    let state = AppState::new(config)?;
    let storage = state.pages.storage();
    storage.ensure_data_dir().await.with_context(|| {
        format!(
            "failed to create data directory {}",
            storage.data_dir().display()
        )
    })?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "wiki listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("wiki stopped");
    Ok(())
}

/// `RUST_LOG` filter, defaulting to `info`.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wiki routes wrapped in a per-request span.
fn app(state: AppState) -> Router {
    router(state).layer(
        TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
            tracing::info_span!(
                "page_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        }),
    )
}

/// Resolves on Ctrl-C so in-flight saves finish before exit.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
