//! Path utilities for wagerbook.
//!
//! All data lives under `~/.wagerbook/`:
//! - `~/.wagerbook/config.toml` - main configuration
//! - `~/.wagerbook/wagerbook.db` - ledger database

use std::path::PathBuf;

/// Returns the wagerbook home directory (`~/.wagerbook/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".wagerbook")
}

/// Returns the default config file path (`~/.wagerbook/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default database path (`~/.wagerbook/wagerbook.db`).
pub fn default_database() -> PathBuf {
    home_dir().join("wagerbook.db")
}

/// Ensures the parent directory of `path` exists.
pub fn ensure_parent(path: &std::path::Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
