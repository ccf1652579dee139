//! Entry point. Grounded on the teacher's `server/src/main.rs`: load
//! config, init tracing, build state, bind, serve with graceful shutdown
//! on SIGINT/SIGTERM. Trimmed to what this spec's server actually owns —
//! no domain config, persistence, or RAG wiring (Non-goals).

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use receptionist_server::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting receptionist-server");

    let state = AppState::new();

    if let Ok(path) = std::env::var("RECEPTIONIST_TEMPLATE_PATH") {
        match receptionist_config::load_template(&path) {
            Ok(template) => {
                tracing::info!(id = %template.id, path = %path, "loaded template from RECEPTIONIST_TEMPLATE_PATH");
                state.template_store.insert(template);
            }
            Err(err) => tracing::warn!(path = %path, error = %err, "failed to load template, starting without one"),
        }
    }

    if let Ok(path) = std::env::var("RECEPTIONIST_COMPANY_PATH") {
        match receptionist_config::load_company(&path) {
            Ok(company) => {
                tracing::info!(id = %company.id, path = %path, "loaded company from RECEPTIONIST_COMPANY_PATH");
                state.company_store.insert(company);
            }
            Err(err) => tracing::warn!(path = %path, error = %err, "failed to load company, starting without one"),
        }
    }

    let app = create_router(state);

    let port: u16 = std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "receptionist_server=info,receptionist_router=info,tower_http=info".into());

    let json = std::env::var("RECEPTIONIST_LOG_JSON").map(|v| v == "1").unwrap_or(false);
    let fmt_layer = if json { tracing_subscriber::fmt::layer().json().boxed() } else { tracing_subscriber::fmt::layer().boxed() };

    tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();
}
