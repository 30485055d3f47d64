//! Wagering use cases.
//!
//! [`WagerService`] sequences the ledger, poll and bet stores into the
//! user-facing flows and serializes writers per user and per poll.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::lock::EntityLocks;
use crate::domain::{
    balance::Points,
    bet::Bet,
    error::DomainError,
    id::{PollId, UserId},
    payout::{PayoutPlan, PoolTotals, Settlement},
    poll::{Choice, Poll},
};
use crate::error::Result;
use crate::port::outbound::store::WagerStore;

/// A poll whose stored totals disagree with its bet records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsDrift {
    pub poll_id: PollId,
    pub stored: PoolTotals,
    pub recomputed: PoolTotals,
}

/// Application service for polls, bets and balances.
pub struct WagerService<S> {
    store: Arc<S>,
    locks: EntityLocks,
    starting_points: Points,
}

impl<S: WagerStore> WagerService<S> {
    /// Create a service over `store`, granting `starting_points` to new accounts.
    pub fn new(store: Arc<S>, starting_points: Points) -> Self {
        Self {
            store,
            locks: EntityLocks::new(),
            starting_points,
        }
    }

    /// Shared handle to the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn starting_points(&self) -> Points {
        self.starting_points
    }

    /// Current balance, opening the account with the starting balance on
    /// first access.
    pub async fn balance(&self, user: &UserId) -> Result<Points> {
        if let Some(balance) = self.store.balance(user).await? {
            return Ok(balance.points);
        }
        let _guard = self.locks.user(user).await;
        let balance = self.store.open_account(user, self.starting_points).await?;
        Ok(balance.points)
    }

    /// Create an active poll owned by `creator`.
    pub async fn create_poll(
        &self,
        creator: &UserId,
        title: &str,
        option_a: &str,
        option_b: &str,
    ) -> Result<Poll> {
        let poll = Poll::try_new(creator.clone(), title, option_a, option_b)?;
        self.store.insert_poll(&poll).await?;
        info!(poll = %poll.id(), creator = %creator, title = %poll.title(), "Poll created");
        Ok(poll)
    }

    /// Stake `amount` points of `user` on `choice`.
    ///
    /// Checks, in order: amount positive, poll exists, poll active,
    /// balance covers the stake. The stake is debited before the bet is
    /// appended; if appending fails the stake is credited back.
    pub async fn place_bet(
        &self,
        user: &UserId,
        poll_id: &PollId,
        amount: Points,
        choice: Choice,
    ) -> Result<Bet> {
        let bet = Bet::try_new(user.clone(), poll_id.clone(), amount, choice)?;

        let _user_guard = self.locks.user(user).await;
        let _poll_guard = self.locks.poll(poll_id).await;

        self.require_poll(poll_id).await?.ensure_active()?;
        self.store.open_account(user, self.starting_points).await?;
        let remaining = self.store.debit(user, amount).await?;

        if let Err(err) = self.store.place_bet(&bet).await {
            warn!(user = %user, poll = %poll_id, amount, error = %err, "Bet rejected after debit, refunding");
            self.store.credit(user, amount).await?;
            return Err(err);
        }

        info!(
            user = %user,
            poll = %poll_id,
            amount,
            choice = %choice,
            remaining = remaining.points,
            "Bet placed"
        );
        Ok(bet)
    }

    /// Resolve `poll_id` in favour of `winner` and pay out the pool.
    ///
    /// Only the poll creator may resolve. Status change and credits are
    /// committed atomically by the store.
    pub async fn resolve_poll(
        &self,
        actor: &UserId,
        poll_id: &PollId,
        winner: Choice,
    ) -> Result<Settlement> {
        let _poll_guard = self.locks.poll(poll_id).await;

        let poll = self.require_poll(poll_id).await?;
        if !poll.is_created_by(actor) {
            return Err(DomainError::NotCreator {
                poll: poll_id.to_string(),
                user: actor.to_string(),
            }
            .into());
        }

        let settlement = self.store.settle(poll_id, winner).await?;
        let plan = &settlement.plan;
        info!(
            poll = %poll_id,
            winner = %winner,
            total_pool = plan.total_pool(),
            winning_total = plan.winning_total(),
            winners = plan.credits().len(),
            distributed = plan.distributed(),
            dust = plan.dust(),
            "Poll resolved"
        );
        if plan.winning_total() == 0 && plan.total_pool() > 0 {
            warn!(poll = %poll_id, pool = plan.total_pool(), "No winning bets, pool not distributed");
        }
        Ok(settlement)
    }

    /// What resolving `poll_id` for `winner` would pay, without side effects.
    pub async fn preview_payout(&self, poll_id: &PollId, winner: Choice) -> Result<PayoutPlan> {
        self.require_poll(poll_id).await?;
        let bets = self.store.bets_for_poll(poll_id).await?;
        Ok(PayoutPlan::compute(poll_id, winner, &bets))
    }

    /// Get one poll.
    pub async fn poll(&self, poll_id: &PollId) -> Result<Poll> {
        self.require_poll(poll_id).await
    }

    /// All polls in creation order.
    pub async fn polls(&self) -> Result<Vec<Poll>> {
        self.store.polls().await
    }

    pub async fn bets_for_poll(&self, poll_id: &PollId) -> Result<Vec<Bet>> {
        self.require_poll(poll_id).await?;
        self.store.bets_for_poll(poll_id).await
    }

    pub async fn bets_for_user(&self, user: &UserId) -> Result<Vec<Bet>> {
        self.store.bets_for_user(user).await
    }

    /// Recompute every poll's totals from its bets and report mismatches.
    pub async fn audit(&self) -> Result<Vec<TotalsDrift>> {
        let mut drifts = Vec::new();
        for poll in self.store.polls().await? {
            let bets = self.store.bets_for_poll(poll.id()).await?;
            let recomputed = PoolTotals::from_bets(&bets);
            let stored = PoolTotals {
                a: poll.total_points_a(),
                b: poll.total_points_b(),
            };
            if stored != recomputed {
                warn!(poll = %poll.id(), ?stored, ?recomputed, "Poll totals drifted from bets");
                drifts.push(TotalsDrift {
                    poll_id: poll.id().clone(),
                    stored,
                    recomputed,
                });
            }
        }
        debug!(drifted = drifts.len(), "Audit complete");
        Ok(drifts)
    }

    async fn require_poll(&self, poll_id: &PollId) -> Result<Poll> {
        self.store
            .poll(poll_id)
            .await?
            .ok_or_else(|| DomainError::poll_not_found(poll_id).into())
    }
}
