//! Pari-mutuel payout computation.
//!
//! All stakes on a poll form one pool. When the poll resolves, the pool is
//! split among the winning bets in proportion to their stake:
//!
//! ```text
//! winnings = floor(total_pool * (amount / winning_total))
//! ```
//!
//! The ratio is taken in double precision before scaling by the pool, so
//! results follow IEEE-754 rounding (a 7-of-10 share of 90 pays 62, not 63).
//! Flooring leaves a remainder ("dust") of about one point per winning
//! bet. Dust and losing stakes are not credited to anyone. When nobody
//! backed the winning side the whole pool is kept by no one.
//!
//! # Examples
//!
//! ```
//! use wagerbook::domain::bet::Bet;
//! use wagerbook::domain::id::{PollId, UserId};
//! use wagerbook::domain::payout::PayoutPlan;
//! use wagerbook::domain::poll::Choice;
//!
//! let poll = PollId::new("p-1");
//! let bets = vec![
//!     Bet::try_new(UserId::new("user1"), poll.clone(), 100, Choice::A).unwrap(),
//!     Bet::try_new(UserId::new("user2"), poll.clone(), 100, Choice::B).unwrap(),
//!     Bet::try_new(UserId::new("user3"), poll.clone(), 50, Choice::A).unwrap(),
//! ];
//!
//! let plan = PayoutPlan::compute(&poll, Choice::A, &bets);
//! assert_eq!(plan.total_pool(), 250);
//! assert_eq!(plan.distributed(), 249);
//! assert_eq!(plan.dust(), 1);
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use super::balance::Points;
use super::bet::Bet;
use super::id::{BetId, PollId, UserId};
use super::poll::{Choice, Poll};

/// Per-side stake totals computed from bet records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolTotals {
    pub a: Points,
    pub b: Points,
}

impl PoolTotals {
    /// Sum the stakes of the given bets by side, saturating at `Points::MAX`.
    pub fn from_bets<'a>(bets: impl IntoIterator<Item = &'a Bet>) -> Self {
        bets.into_iter().fold(Self::default(), |mut totals, bet| {
            match bet.choice() {
                Choice::A => totals.a = totals.a.saturating_add(bet.amount()),
                Choice::B => totals.b = totals.b.saturating_add(bet.amount()),
            }
            totals
        })
    }

    #[must_use]
    pub const fn side(&self, choice: Choice) -> Points {
        match choice {
            Choice::A => self.a,
            Choice::B => self.b,
        }
    }

    #[must_use]
    pub const fn pool(&self) -> Points {
        self.a.saturating_add(self.b)
    }
}

/// Winnings owed to one winning bet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payout {
    pub bet_id: BetId,
    pub user_id: UserId,
    pub stake: Points,
    pub winnings: Points,
}

/// The full distribution for a poll resolved in favour of one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayoutPlan {
    poll_id: PollId,
    winner: Choice,
    total_pool: Points,
    winning_total: Points,
    payouts: Vec<Payout>,
}

impl PayoutPlan {
    /// Compute the distribution for `poll_id` won by `winner`.
    ///
    /// Bets belonging to other polls are ignored.
    #[must_use]
    pub fn compute(poll_id: &PollId, winner: Choice, bets: &[Bet]) -> Self {
        let on_poll: Vec<&Bet> = bets.iter().filter(|b| b.poll_id() == poll_id).collect();
        let totals = PoolTotals::from_bets(on_poll.iter().copied());
        let total_pool = totals.pool();
        let winning_total = totals.side(winner);

        let payouts = if winning_total == 0 {
            Vec::new()
        } else {
            on_poll
                .iter()
                .filter(|b| b.choice() == winner)
                .map(|b| Payout {
                    bet_id: b.id().clone(),
                    user_id: b.user_id().clone(),
                    stake: b.amount(),
                    winnings: share(total_pool, b.amount(), winning_total),
                })
                .collect()
        };

        Self {
            poll_id: poll_id.clone(),
            winner,
            total_pool,
            winning_total,
            payouts,
        }
    }

    pub fn poll_id(&self) -> &PollId {
        &self.poll_id
    }

    pub fn winner(&self) -> Choice {
        self.winner
    }

    pub fn total_pool(&self) -> Points {
        self.total_pool
    }

    pub fn winning_total(&self) -> Points {
        self.winning_total
    }

    /// Per-bet payouts in bet order.
    pub fn payouts(&self) -> &[Payout] {
        &self.payouts
    }

    /// Winnings aggregated per user, one credit per winning user.
    pub fn credits(&self) -> BTreeMap<UserId, Points> {
        let mut credits = BTreeMap::new();
        for payout in &self.payouts {
            let credit = credits.entry(payout.user_id.clone()).or_insert(0);
            *credit = Points::saturating_add(*credit, payout.winnings);
        }
        credits
    }

    /// Sum of all winnings paid out.
    pub fn distributed(&self) -> Points {
        self.payouts
            .iter()
            .fold(0, |sum: Points, p| sum.saturating_add(p.winnings))
    }

    /// Pool left undistributed by flooring, or the whole pool when
    /// nobody backed the winner.
    pub fn dust(&self) -> Points {
        self.total_pool - self.distributed()
    }
}

/// Outcome of a committed resolution: the resolved poll and what was paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub poll: Poll,
    pub plan: PayoutPlan,
}

/// `floor(pool * (stake / winning_total))` in `f64`, clamped to `0..=pool`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn share(pool: Points, stake: Points, winning_total: Points) -> Points {
    let ratio = stake as f64 / winning_total as f64;
    let winnings = (pool as f64 * ratio).floor();
    // Rounding of large pools can land just above `pool`; `as` saturates.
    (winnings as Points).clamp(0, pool)
}
