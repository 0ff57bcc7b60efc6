//! Building the bundled seed database from its SQL script.

use std::path::Path;

use rusqlite::{Connection, DatabaseName};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// The seed script shipped with the crate.
pub const SEED_SQL: &str = include_str!("../../assets/seed.sql");

/// The seed database built from [`SEED_SQL`] at compile time.
pub const SEED_DB: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/budgetbuddy.db"));

/// Run the seed script (schema and starter rows) against `conn`.
pub fn apply_seed_script(conn: &Connection, sql: &str) -> rusqlite::Result<()> {
    debug!(bytes = sql.len(), "Applying seed script");
    conn.execute_batch(sql)
}

/// Build a seed database file at `dst` from `sql`.
///
/// The schema is built in memory and written out with SQLite's backup API, so
/// `dst` never holds a half-built database. Refuses to overwrite `dst`.
pub fn build_seed_database(sql: &str, dst: &Path) -> AppResult<()> {
    if dst.exists() {
        return Err(AppError::Validation(format!(
            "{} already exists; remove it first",
            dst.display()
        )));
    }
    if let Some(parent) = dst.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open_in_memory()?;
    apply_seed_script(&conn, sql)?;
    conn.backup(DatabaseName::Main, dst, None)?;

    info!(path = %dst.display(), "Wrote seed database");
    Ok(())
}
