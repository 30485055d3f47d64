//! Persistence ports for balances, polls and bets.
//!
//! Every method is a single atomic operation against the backing store.
//! Adapters must never expose a read-modify-write window: a debit checks
//! and updates the balance in one step, placing a bet appends the record
//! and bumps the poll total in one step, and settling a poll commits the
//! status change and all credits together or not at all.

use std::future::Future;

use crate::domain::{
    balance::{Balance, Points},
    bet::Bet,
    id::{PollId, UserId},
    payout::Settlement,
    poll::{Choice, Poll},
};
use crate::error::Result;

/// Per-user point balances.
pub trait LedgerStore: Send + Sync {
    /// Get a balance, `None` if the account was never opened.
    fn balance(&self, user: &UserId) -> impl Future<Output = Result<Option<Balance>>> + Send;

    /// Open an account with `starting_points` unless it already exists.
    /// Returns the current balance either way.
    fn open_account(
        &self,
        user: &UserId,
        starting_points: Points,
    ) -> impl Future<Output = Result<Balance>> + Send;

    /// Add points to an existing account.
    ///
    /// Fails with `InvalidAmount` for a non-positive amount and `NotFound`
    /// for an unknown account.
    fn credit(&self, user: &UserId, amount: Points)
        -> impl Future<Output = Result<Balance>> + Send;

    /// Remove points from an existing account.
    ///
    /// Fails with `InsufficientFunds` if `amount` exceeds the balance.
    fn debit(&self, user: &UserId, amount: Points) -> impl Future<Output = Result<Balance>> + Send;
}

/// Poll definitions and lifecycle.
pub trait PollStore: Send + Sync {
    /// Persist a newly created poll.
    fn insert_poll(&self, poll: &Poll) -> impl Future<Output = Result<()>> + Send;

    /// Get a poll by ID.
    fn poll(&self, id: &PollId) -> impl Future<Output = Result<Option<Poll>>> + Send;

    /// List all polls in creation order.
    fn polls(&self) -> impl Future<Output = Result<Vec<Poll>>> + Send;

    /// Transition an active poll to the resolved state for `winner`.
    ///
    /// Fails with `NotFound` or `AlreadyResolved`. Does not pay anyone;
    /// see [`SettlementStore::settle`] for the full resolution.
    fn resolve_poll(&self, id: &PollId, winner: Choice)
        -> impl Future<Output = Result<Poll>> + Send;
}

/// Immutable wager records.
pub trait BetStore: Send + Sync {
    /// Append a bet and add its stake to the poll total.
    ///
    /// Fails with `NotFound` for an unknown poll and `PollNotActive` for a
    /// resolved one. Never touches the ledger.
    fn place_bet(&self, bet: &Bet) -> impl Future<Output = Result<()>> + Send;

    /// All bets on a poll in placement order.
    fn bets_for_poll(&self, poll: &PollId) -> impl Future<Output = Result<Vec<Bet>>> + Send;

    /// All bets by a user in placement order.
    fn bets_for_user(&self, user: &UserId) -> impl Future<Output = Result<Vec<Bet>>> + Send;
}

/// Atomic resolve-and-distribute.
pub trait SettlementStore: Send + Sync {
    /// Resolve the poll and credit every winner in one transaction.
    ///
    /// The payout plan is computed from the bets visible inside the
    /// transaction. The status change is conditional on the poll still
    /// being active, so a repeated call fails with `AlreadyResolved`
    /// and never credits twice.
    fn settle(&self, id: &PollId, winner: Choice)
        -> impl Future<Output = Result<Settlement>> + Send;
}

/// Everything the wager service needs from storage.
pub trait WagerStore: LedgerStore + PollStore + BetStore + SettlementStore {}

impl<T> WagerStore for T where T: LedgerStore + PollStore + BetStore + SettlementStore {}
