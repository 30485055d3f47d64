//! In-memory wager store.
//!
//! Holds all state behind one mutex so each port method is a single
//! critical section. Suitable for tests and ephemeral sessions.

use std::collections::HashMap;

use chrono::Utc;
use parking_lot::Mutex;

use crate::domain::{
    balance::{Balance, Points},
    bet::Bet,
    error::DomainError,
    id::{PollId, UserId},
    payout::{PayoutPlan, Settlement},
    poll::{Choice, Poll},
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{BetStore, LedgerStore, PollStore, SettlementStore};

#[derive(Default)]
struct MemoryState {
    balances: HashMap<UserId, Points>,
    polls: HashMap<PollId, Poll>,
    /// Insertion order of polls.
    poll_order: Vec<PollId>,
    bets: Vec<Bet>,
}

impl MemoryState {
    fn poll_mut(&mut self, id: &PollId) -> std::result::Result<&mut Poll, DomainError> {
        self.polls
            .get_mut(id)
            .ok_or_else(|| DomainError::poll_not_found(id))
    }

    fn credit(&mut self, user: &UserId, amount: Points) -> std::result::Result<Points, DomainError> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount { amount });
        }
        let points = self
            .balances
            .get_mut(user)
            .ok_or_else(|| DomainError::account_not_found(user))?;
        *points = points
            .checked_add(amount)
            .ok_or_else(|| DomainError::account_overflow(user))?;
        Ok(*points)
    }
}

/// Mutex-guarded in-memory implementation of every store port.
#[derive(Default)]
pub struct MemoryWagerStore {
    state: Mutex<MemoryState>,
}

impl MemoryWagerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a stored poll as-is, bypassing the bet bookkeeping.
    #[cfg(test)]
    pub(crate) fn replace_poll(&self, poll: Poll) {
        self.state.lock().polls.insert(poll.id().clone(), poll);
    }
}

impl LedgerStore for MemoryWagerStore {
    async fn balance(&self, user: &UserId) -> Result<Option<Balance>> {
        let state = self.state.lock();
        Ok(state
            .balances
            .get(user)
            .map(|points| Balance::new(user.clone(), *points)))
    }

    async fn open_account(&self, user: &UserId, starting_points: Points) -> Result<Balance> {
        let mut state = self.state.lock();
        let points = *state.balances.entry(user.clone()).or_insert(starting_points);
        Ok(Balance::new(user.clone(), points))
    }

    async fn credit(&self, user: &UserId, amount: Points) -> Result<Balance> {
        let mut state = self.state.lock();
        let points = state.credit(user, amount)?;
        Ok(Balance::new(user.clone(), points))
    }

    async fn debit(&self, user: &UserId, amount: Points) -> Result<Balance> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount { amount }.into());
        }
        let mut state = self.state.lock();
        let points = state
            .balances
            .get_mut(user)
            .ok_or_else(|| DomainError::account_not_found(user))?;
        if amount > *points {
            return Err(DomainError::InsufficientFunds {
                user: user.to_string(),
                requested: amount,
                available: *points,
            }
            .into());
        }
        *points -= amount;
        Ok(Balance::new(user.clone(), *points))
    }
}

impl PollStore for MemoryWagerStore {
    async fn insert_poll(&self, poll: &Poll) -> Result<()> {
        let mut state = self.state.lock();
        if state.polls.contains_key(poll.id()) {
            return Err(Error::Database(format!("poll {} already exists", poll.id())));
        }
        state.polls.insert(poll.id().clone(), poll.clone());
        state.poll_order.push(poll.id().clone());
        Ok(())
    }

    async fn poll(&self, id: &PollId) -> Result<Option<Poll>> {
        Ok(self.state.lock().polls.get(id).cloned())
    }

    async fn polls(&self) -> Result<Vec<Poll>> {
        let state = self.state.lock();
        Ok(state
            .poll_order
            .iter()
            .filter_map(|id| state.polls.get(id).cloned())
            .collect())
    }

    async fn resolve_poll(&self, id: &PollId, winner: Choice) -> Result<Poll> {
        let mut state = self.state.lock();
        let poll = state.poll_mut(id)?;
        poll.resolve(winner, Utc::now())?;
        Ok(poll.clone())
    }
}

impl BetStore for MemoryWagerStore {
    async fn place_bet(&self, bet: &Bet) -> Result<()> {
        let mut state = self.state.lock();
        let poll = state.poll_mut(bet.poll_id())?;
        poll.ensure_active()?;
        poll.add_stake(bet.choice(), bet.amount())?;
        state.bets.push(bet.clone());
        Ok(())
    }

    async fn bets_for_poll(&self, poll: &PollId) -> Result<Vec<Bet>> {
        let state = self.state.lock();
        Ok(state
            .bets
            .iter()
            .filter(|b| b.poll_id() == poll)
            .cloned()
            .collect())
    }

    async fn bets_for_user(&self, user: &UserId) -> Result<Vec<Bet>> {
        let state = self.state.lock();
        Ok(state
            .bets
            .iter()
            .filter(|b| b.user_id() == user)
            .cloned()
            .collect())
    }
}

impl SettlementStore for MemoryWagerStore {
    async fn settle(&self, id: &PollId, winner: Choice) -> Result<Settlement> {
        let mut state = self.state.lock();

        // Validate everything before mutating so a failure leaves no trace.
        let mut poll = state
            .polls
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::poll_not_found(id))?;
        poll.resolve(winner, Utc::now())?;

        let plan = PayoutPlan::compute(id, winner, &state.bets);
        let credits = plan.credits();
        for (user, amount) in &credits {
            let points = state
                .balances
                .get(user)
                .ok_or_else(|| DomainError::account_not_found(user))?;
            if points.checked_add(*amount).is_none() {
                return Err(DomainError::account_overflow(user).into());
            }
        }

        for (user, amount) in &credits {
            if *amount > 0 {
                state.credit(user, *amount)?;
            }
        }
        state.polls.insert(id.clone(), poll.clone());

        Ok(Settlement { poll, plan })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::poll::PollStatus;
    use crate::error::Error;

    fn user(s: &str) -> UserId {
        UserId::new(s)
    }

    async fn store_with_poll() -> (MemoryWagerStore, Poll) {
        let store = MemoryWagerStore::new();
        let poll = Poll::try_new(user("carol"), "Q?", "Yes", "No").unwrap();
        store.insert_poll(&poll).await.unwrap();
        (store, poll)
    }

    #[tokio::test]
    async fn open_account_is_idempotent() {
        let store = MemoryWagerStore::new();
        let first = store.open_account(&user("a"), 500).await.unwrap();
        store.debit(&user("a"), 200).await.unwrap();
        let second = store.open_account(&user("a"), 500).await.unwrap();

        assert_eq!(first.points, 500);
        assert_eq!(second.points, 300);
    }

    #[tokio::test]
    async fn debit_beyond_balance_is_rejected_and_leaves_balance() {
        let store = MemoryWagerStore::new();
        store.open_account(&user("a"), 100).await.unwrap();

        let err = store.debit(&user("a"), 101).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Domain(DomainError::InsufficientFunds {
                requested: 101,
                available: 100,
                ..
            })
        ));
        assert_eq!(store.balance(&user("a")).await.unwrap().unwrap().points, 100);
    }

    #[tokio::test]
    async fn credit_requires_an_account() {
        let store = MemoryWagerStore::new();
        let err = store.credit(&user("ghost"), 10).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::NotFound {
                entity: "account",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn placing_a_bet_bumps_poll_totals() {
        let (store, poll) = store_with_poll().await;
        let bet = Bet::try_new(user("a"), poll.id().clone(), 40, Choice::B).unwrap();

        store.place_bet(&bet).await.unwrap();

        let stored = store.poll(poll.id()).await.unwrap().unwrap();
        assert_eq!(stored.total_points_b(), 40);
        assert_eq!(store.bets_for_poll(poll.id()).await.unwrap(), vec![bet.clone()]);
        assert_eq!(store.bets_for_user(&user("a")).await.unwrap(), vec![bet]);
    }

    #[tokio::test]
    async fn bets_on_missing_or_resolved_polls_are_rejected() {
        let (store, poll) = store_with_poll().await;
        let stray = Bet::try_new(user("a"), PollId::new("nope"), 10, Choice::A).unwrap();
        assert!(matches!(
            store.place_bet(&stray).await,
            Err(Error::Domain(DomainError::NotFound { entity: "poll", .. }))
        ));

        store.resolve_poll(poll.id(), Choice::A).await.unwrap();
        let late = Bet::try_new(user("a"), poll.id().clone(), 10, Choice::A).unwrap();
        assert!(matches!(
            store.place_bet(&late).await,
            Err(Error::Domain(DomainError::PollNotActive { .. }))
        ));
        assert!(store.bets_for_poll(poll.id()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn settle_credits_winners_once() {
        let (store, poll) = store_with_poll().await;
        for (name, amount, choice) in [("u1", 100, Choice::A), ("u2", 100, Choice::B), ("u3", 50, Choice::A)] {
            store.open_account(&user(name), 500).await.unwrap();
            store.debit(&user(name), amount).await.unwrap();
            let bet = Bet::try_new(user(name), poll.id().clone(), amount, choice).unwrap();
            store.place_bet(&bet).await.unwrap();
        }

        let settlement = store.settle(poll.id(), Choice::A).await.unwrap();

        assert_eq!(settlement.poll.status(), PollStatus::ResolvedA);
        assert_eq!(settlement.plan.distributed(), 249);
        assert_eq!(store.balance(&user("u1")).await.unwrap().unwrap().points, 566);
        assert_eq!(store.balance(&user("u2")).await.unwrap().unwrap().points, 400);
        assert_eq!(store.balance(&user("u3")).await.unwrap().unwrap().points, 533);

        let err = store.settle(poll.id(), Choice::B).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Domain(DomainError::AlreadyResolved { .. })
        ));
        assert_eq!(store.balance(&user("u1")).await.unwrap().unwrap().points, 566);
    }

    #[tokio::test]
    async fn settle_unknown_poll_is_not_found() {
        let store = MemoryWagerStore::new();
        let err = store.settle(&PollId::new("nope"), Choice::A).await.unwrap_err();
        assert!(matches!(err, Error::Domain(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn duplicate_poll_id_is_rejected() {
        let (store, poll) = store_with_poll().await;
        let bet = Bet::try_new(user("a"), poll.id().clone(), 40, Choice::A).unwrap();
        store.place_bet(&bet).await.unwrap();

        let err = store.insert_poll(&poll).await.unwrap_err();

        assert!(matches!(err, Error::Database(_)));
        let stored = store.poll(poll.id()).await.unwrap().unwrap();
        assert_eq!(stored.total_points_a(), 40);
        assert_eq!(store.polls().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn credit_past_max_is_rejected() {
        let store = MemoryWagerStore::new();
        store.open_account(&user("a"), Points::MAX - 1).await.unwrap();

        let err = store.credit(&user("a"), 2).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Domain(DomainError::PointsOverflow { entity: "account", .. })
        ));
        assert_eq!(store.balance(&user("a")).await.unwrap().unwrap().points, Points::MAX - 1);
    }

    #[tokio::test]
    async fn settle_that_would_overflow_a_balance_changes_nothing() {
        let (store, poll) = store_with_poll().await;
        // "a" sorts first, so its credit would land before "b" overflows.
        store.open_account(&user("a"), 100).await.unwrap();
        store.open_account(&user("b"), Points::MAX).await.unwrap();
        for (name, amount) in [("a", 10), ("b", 10)] {
            let bet = Bet::try_new(user(name), poll.id().clone(), amount, Choice::A).unwrap();
            store.place_bet(&bet).await.unwrap();
        }

        let err = store.settle(poll.id(), Choice::A).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Domain(DomainError::PointsOverflow { entity: "account", .. })
        ));
        assert_eq!(store.balance(&user("a")).await.unwrap().unwrap().points, 100);
        assert!(store.poll(poll.id()).await.unwrap().unwrap().is_active());
    }

    #[tokio::test]
    async fn polls_list_in_creation_order() {
        let store = MemoryWagerStore::new();
        let first = Poll::try_new(user("c"), "First", "a", "b").unwrap();
        let second = Poll::try_new(user("c"), "Second", "a", "b").unwrap();
        store.insert_poll(&first).await.unwrap();
        store.insert_poll(&second).await.unwrap();

        let titles: Vec<String> = store
            .polls()
            .await
            .unwrap()
            .iter()
            .map(|p| p.title().to_string())
            .collect();
        assert_eq!(titles, vec!["First", "Second"]);
    }
}
