//! Composition root: builds the wager service from configuration.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::memory::MemoryWagerStore;
use crate::adapter::outbound::sqlite::store::SqliteWagerStore;
use crate::application::wager::service::WagerService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::paths;

/// Open (creating if needed) the SQLite database at `path`.
///
/// # Errors
/// Returns an error if the parent directory cannot be created, the pool
/// cannot be built, or migrations fail.
pub fn open_sqlite_store(path: &Path) -> Result<SqliteWagerStore> {
    paths::ensure_parent(path)?;
    SqliteWagerStore::open(&path.to_string_lossy())
}

/// Build a SQLite-backed service for `config`.
///
/// # Errors
/// Returns an error if the database cannot be opened.
pub fn build_service(config: &Config) -> Result<WagerService<SqliteWagerStore>> {
    let store = open_sqlite_store(Path::new(&config.database))?;
    info!(
        database = %config.database,
        starting_points = config.ledger.starting_points,
        "Wager service ready"
    );
    Ok(WagerService::new(
        Arc::new(store),
        config.ledger.starting_points,
    ))
}

/// Build a service over a fresh in-memory store.
#[must_use]
pub fn build_memory_service(config: &Config) -> WagerService<MemoryWagerStore> {
    WagerService::new(
        Arc::new(MemoryWagerStore::new()),
        config.ledger.starting_points,
    )
}
