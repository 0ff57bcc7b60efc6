use std::env;
use std::path::PathBuf;

use crate::date_utils::MonthCursor;
use crate::db::SeedSource;

/// File name of the working database inside the storage directory.
pub const DATABASE_FILE_NAME: &str = "budgetbuddy.db";

pub const DEFAULT_PORT: u16 = 7070;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Writable location of the working database.
    pub database_path: PathBuf,
    /// Seed database installed at `database_path` on first launch. The
    /// compiled-in copy unless `BUDGETBUDDY_SEED_PATH` names a file.
    pub seed: SeedSource,
    /// Month shown when a request does not name one.
    pub start_month: Option<MonthCursor>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let start_month = match env::var("BUDGETBUDDY_START_MONTH") {
            Ok(value) if !value.trim().is_empty() => match value.parse::<MonthCursor>() {
                Ok(month) => Some(month),
                Err(e) => {
                    tracing::warn!(%value, "Ignoring BUDGETBUDDY_START_MONTH: {}", e);
                    None
                }
            },
            _ => None,
        };

        Self {
            host: env::var("BUDGETBUDDY_HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: parse_port(env::var("BUDGETBUDDY_PORT").ok().as_deref()),
            database_path: env::var("BUDGETBUDDY_DATABASE_PATH")
                .map(|v| {
                    PathBuf::from(
                        v.strip_prefix("sqlite://")
                            .or_else(|| v.strip_prefix("sqlite:"))
                            .unwrap_or(&v),
                    )
                })
                .unwrap_or_else(|_| default_database_path()),
            seed: seed_source(env::var("BUDGETBUDDY_SEED_PATH").ok()),
            start_month,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn default_month(&self) -> MonthCursor {
        self.start_month.unwrap_or_else(MonthCursor::current)
    }
}

fn parse_port(value: Option<&str>) -> u16 {
    match value.map(str::trim) {
        None | Some("") => DEFAULT_PORT,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = raw, "Ignoring BUDGETBUDDY_PORT, using {}", DEFAULT_PORT);
            DEFAULT_PORT
        }),
    }
}

fn seed_source(value: Option<String>) -> SeedSource {
    match value {
        Some(path) if !path.trim().is_empty() => SeedSource::File(PathBuf::from(path)),
        _ => SeedSource::Bundled,
    }
}

/// `<data dir>/budgetbuddy/SQLite/budgetbuddy.db`, or a relative `data/`
/// directory when the platform has no data directory.
pub fn default_database_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("budgetbuddy"))
        .unwrap_or_else(|| PathBuf::from("data"))
        .join("SQLite")
        .join(DATABASE_FILE_NAME)
}
