//! Ledger configuration.

use serde::{Deserialize, Serialize};

use crate::domain::balance::{Points, DEFAULT_STARTING_POINTS};

/// Largest accepted starting balance. Leaves headroom for winnings so
/// ordinary play cannot push a balance past `Points::MAX`.
pub const MAX_STARTING_POINTS: Points = 1_000_000_000_000;

/// Settings for point accounts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// Balance granted when an account is first touched.
    #[serde(default = "default_starting_points")]
    pub starting_points: Points,
}

const fn default_starting_points() -> Points {
    DEFAULT_STARTING_POINTS
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            starting_points: default_starting_points(),
        }
    }
}
