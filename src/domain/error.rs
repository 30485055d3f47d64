//! Domain errors for the wagering core.
//!
//! Every failure a caller can recover from is a variant here. Store
//! adapters and the wager service return these wrapped in
//! [`crate::error::Error::Domain`].
//!
//! # Examples
//!
//! ```
//! use wagerbook::domain::bet::Bet;
//! use wagerbook::domain::error::DomainError;
//! use wagerbook::domain::id::{PollId, UserId};
//! use wagerbook::domain::poll::Choice;
//!
//! let result = Bet::try_new(UserId::new("alice"), PollId::new("p-1"), 0, Choice::A);
//! assert!(matches!(result, Err(DomainError::InvalidAmount { amount: 0 })));
//! ```

use thiserror::Error;

use super::balance::Points;
use super::poll::PollStatus;

/// Errors raised when a wagering rule is violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The debit exceeds the account balance.
    #[error("insufficient funds for {user}: requested {requested}, available {available}")]
    InsufficientFunds {
        user: String,
        requested: Points,
        available: Points,
    },

    /// Amounts must be strictly positive.
    #[error("amount must be positive, got {amount}")]
    InvalidAmount { amount: Points },

    /// Bets are only accepted while the poll is active.
    #[error("poll {poll} is not active ({status})")]
    PollNotActive { poll: String, status: PollStatus },

    /// The poll has already been resolved.
    #[error("poll {poll} is already resolved ({status})")]
    AlreadyResolved { poll: String, status: PollStatus },

    /// No record with the given id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Only the poll creator may resolve it.
    #[error("user {user} did not create poll {poll}")]
    NotCreator { poll: String, user: String },

    /// A required text field was blank.
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    /// The result would not fit in a point balance or pool total.
    #[error("{entity} {id} would exceed the maximum point value")]
    PointsOverflow { entity: &'static str, id: String },
}

impl DomainError {
    /// Shorthand for a missing poll.
    pub fn poll_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "poll",
            id: id.to_string(),
        }
    }

    /// Shorthand for a missing ledger account.
    pub fn account_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "account",
            id: id.to_string(),
        }
    }

    /// Shorthand for a balance that would overflow.
    pub fn account_overflow(id: impl ToString) -> Self {
        Self::PointsOverflow {
            entity: "account",
            id: id.to_string(),
        }
    }

    /// Shorthand for a pool total that would overflow.
    pub fn pool_overflow(id: impl ToString) -> Self {
        Self::PointsOverflow {
            entity: "poll",
            id: id.to_string(),
        }
    }
}
