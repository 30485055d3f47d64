use std::path::{Path, PathBuf};
use std::sync::Arc;

use wagerbook::adapter::outbound::sqlite::store::SqliteWagerStore;
use wagerbook::application::wager::service::WagerService;

/// Temporary SQLite database for integration tests.
///
/// The directory (and database) is removed when dropped.
pub struct TempDb {
    dir: tempfile::TempDir,
    path: PathBuf,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::Builder::new()
            .prefix(&format!("wagerbook-{name}-"))
            .tempdir()
            .expect("create temp dir");
        let path = dir.path().join("wagerbook.db");
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Open a store on this database, running migrations.
    pub fn store(&self) -> SqliteWagerStore {
        SqliteWagerStore::open(&self.path.to_string_lossy()).expect("open sqlite store")
    }

    pub fn service(&self, starting_points: i64) -> WagerService<SqliteWagerStore> {
        WagerService::new(Arc::new(self.store()), starting_points)
    }
}
