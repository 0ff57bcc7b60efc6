//! Build the bundled seed database from its SQL script.
//!
//! Usage: build-seed [SQL_PATH] [OUT_PATH]
//! Defaults: assets/seed.sql, assets/budgetbuddy.db

use std::path::PathBuf;

use budgetbuddy::config::DATABASE_FILE_NAME;
use budgetbuddy::db::seed::build_seed_database;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "budgetbuddy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let sql_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets/seed.sql"));
    let out_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets").join(DATABASE_FILE_NAME));

    let sql = match std::fs::read_to_string(&sql_path) {
        Ok(sql) => sql,
        Err(e) => {
            tracing::error!(path = %sql_path.display(), "Cannot read seed script: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = build_seed_database(&sql, &out_path) {
        tracing::error!(path = %out_path.display(), "Failed to build seed database: {}", e);
        std::process::exit(1);
    }
}
