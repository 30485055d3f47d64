//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
///
/// `config` is the effective configuration after defaults, environment and
/// command-line overrides.
pub fn execute_show(path: &Path, config: &Config) -> Result<()> {
    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": serde_json::to_value(config)?,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    if path.exists() {
        output::field("File", path.display());
    } else {
        output::field("File", output::muted(format!("{} (not found, using defaults)", path.display())));
    }
    output::field("Database", &config.database);

    output::section("Ledger");
    output::field("Start points", config.ledger.starting_points);

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}

/// Execute `config validate`.
///
/// # Errors
/// Returns the load or validation error for `path`.
pub fn execute_validate(path: &Path) -> Result<()> {
    Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.validate",
            "path": path.display().to_string(),
            "valid": true,
        }));
        return Ok(());
    }

    output::success(&format!("{} is valid", path.display()));
    Ok(())
}
