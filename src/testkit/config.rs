//! Canonical test configurations.

use std::path::Path;

use crate::infrastructure::config::settings::Config;

/// Default configuration pointing at `database`.
pub fn config_with_database(database: &Path) -> Config {
    Config {
        database: database.to_string_lossy().into_owned(),
        ..Config::default()
    }
}

/// TOML text for a complete configuration.
pub fn config_toml(database: &Path, starting_points: i64) -> String {
    format!(
        "database = {database:?}\n\n[logging]\nlevel = \"warn\"\nformat = \"pretty\"\n\n[ledger]\nstarting_points = {starting_points}\n",
        database = database.to_string_lossy()
    )
}
