//! Point balances held in the ledger.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Points are whole, signed 64-bit amounts.
pub type Points = i64;

/// Balance granted to an account the first time it is touched.
pub const DEFAULT_STARTING_POINTS: Points = 500;

/// A user's point balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub user_id: UserId,
    pub points: Points,
}

impl Balance {
    #[must_use]
    pub fn new(user_id: UserId, points: Points) -> Self {
        Self { user_id, points }
    }

    /// Whether `amount` can be debited without going negative.
    #[must_use]
    pub fn covers(&self, amount: Points) -> bool {
        amount <= self.points
    }
}
