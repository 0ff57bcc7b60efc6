//! First-launch setup of the working database.
//!
//! The schema lives in the bundled seed file, not in code. On a cold start the
//! seed is copied into writable storage once; after that the copy is used
//! as-is. There is no versioning or repair of an existing file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::db::seed::SEED_DB;
use crate::error::{AppError, AppResult};

/// Where the first-launch database comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// The database compiled into the binary.
    Bundled,
    /// A prebuilt seed file on disk.
    File(PathBuf),
}

impl fmt::Display for SeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedSource::Bundled => write!(f, "bundled seed"),
            SeedSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The working database already existed and was left untouched.
    AlreadyPresent,
    /// The seed was copied into place.
    Copied { bytes: u64 },
}

/// Make sure `database_path` exists, installing `seed` there if it does not.
pub fn ensure_database(seed: &SeedSource, database_path: &Path) -> AppResult<BootstrapOutcome> {
    if database_path.exists() {
        debug!(db = %database_path.display(), "Database already present, skipping seed copy");
        return Ok(BootstrapOutcome::AlreadyPresent);
    }

    install_seed(seed, database_path).map_err(|e| {
        error!(
            %seed,
            db = %database_path.display(),
            "Failed to install seed database: {}",
            e
        );
        AppError::Bootstrap(format!(
            "could not copy {} to {}: {}",
            seed,
            database_path.display(),
            e
        ))
    })
}

fn install_seed(seed: &SeedSource, database_path: &Path) -> std::io::Result<BootstrapOutcome> {
    if let Some(parent) = database_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let bytes = match seed {
        SeedSource::Bundled => {
            fs::write(database_path, SEED_DB)?;
            SEED_DB.len() as u64
        }
        SeedSource::File(path) => fs::copy(path, database_path)?,
    };
    info!(
        %seed,
        db = %database_path.display(),
        bytes,
        "Installed seed database"
    );
    Ok(BootstrapOutcome::Copied { bytes })
}
