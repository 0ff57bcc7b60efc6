use budgetbuddy::config::Config;
use budgetbuddy::server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "budgetbuddy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!(
        db = %config.database_path.display(),
        seed = %config.seed,
        "Starting BudgetBuddy on {}",
        config.address()
    );

    let host = config.host.clone();
    let port = config.port;

    let (_state, app) = match server::build_app(config) {
        Ok(built) => built,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    let (port, handle) = match server::serve(app, &host, port).await {
        Ok(bound) => bound,
        Err(e) => {
            tracing::error!("Failed to bind {}:{}: {}", host, port, e);
            std::process::exit(1);
        }
    };
    tracing::info!("Listening on http://{}:{}", host, port);

    if let Err(e) = handle.await {
        tracing::error!("Server task failed: {}", e);
        std::process::exit(1);
    }
}
