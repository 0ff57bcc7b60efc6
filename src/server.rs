use axum::middleware;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::{create_pool, ensure_database, BootstrapOutcome, DbPool};
use crate::error::AppResult;
use crate::error_pages::{error_page_middleware, fallback_handler};
use crate::handlers;
use crate::state::AppState;

/// Assemble the router with its middleware stack over an existing pool.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(handlers::routes())
        .fallback(fallback_handler)
        .layer(middleware::from_fn(error_page_middleware))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the application state and Axum router from a [`Config`].
///
/// Installs the seed database on first launch, then opens the pool. A failed
/// seed copy is returned as an error and nothing is served.
pub fn build_app(config: Config) -> AppResult<(AppState, Router)> {
    match ensure_database(&config.seed, &config.database_path)? {
        BootstrapOutcome::Copied { bytes } => {
            tracing::info!(bytes, "First launch: seed database installed")
        }
        BootstrapOutcome::AlreadyPresent => {}
    }

    let db: DbPool = create_pool(&config.database_path)?;
    // Open one connection now so a broken file fails at startup.
    db.get()?;

    let state = AppState {
        db,
        config: Arc::new(config),
    };

    Ok((state.clone(), router(state)))
}

/// Bind the router to `host:port` and spawn the server as a tokio task.
///
/// Returns the actual port the server bound to (useful when `port` is 0 for
/// OS-assigned ports) and a [`JoinHandle`] for the server task.
pub async fn serve(app: Router, host: &str, port: u16) -> std::io::Result<(u16, JoinHandle<()>)> {
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let actual_port = listener.local_addr()?.port();

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok((actual_port, handle))
}
