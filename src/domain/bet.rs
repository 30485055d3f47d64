//! Wager records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::balance::Points;
use super::error::DomainError;
use super::id::{BetId, PollId, UserId};
use super::poll::Choice;

/// An immutable stake placed by a user on one side of a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bet {
    id: BetId,
    user_id: UserId,
    poll_id: PollId,
    amount: Points,
    choice: Choice,
    placed_at: DateTime<Utc>,
}

impl Bet {
    /// Create a new bet.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAmount`] if `amount` is not positive.
    pub fn try_new(
        user_id: UserId,
        poll_id: PollId,
        amount: Points,
        choice: Choice,
    ) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount { amount });
        }
        Ok(Self {
            id: BetId::generate(),
            user_id,
            poll_id,
            amount,
            choice,
            placed_at: Utc::now(),
        })
    }

    /// Rebuild a bet from persisted fields.
    #[must_use]
    pub fn restore(
        id: BetId,
        user_id: UserId,
        poll_id: PollId,
        amount: Points,
        choice: Choice,
        placed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            poll_id,
            amount,
            choice,
            placed_at,
        }
    }

    pub fn id(&self) -> &BetId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn poll_id(&self) -> &PollId {
        &self.poll_id
    }

    pub fn amount(&self) -> Points {
        self.amount
    }

    pub fn choice(&self) -> Choice {
        self.choice
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }
}
