//! SQLite wager store implementation.
//!
//! Provides persistent storage for balances, polls and bets using SQLite
//! and Diesel ORM.

use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbConnection, DbPool,
};
use crate::adapter::outbound::sqlite::database::model::{
    BalanceRow, BetRow, NewBetRow, NewPollRow, PollRow,
};
use crate::adapter::outbound::sqlite::database::schema::{bets, polls, user_points};
use crate::domain::{
    balance::{Balance, Points},
    bet::Bet,
    error::DomainError,
    id::{PollId, UserId},
    payout::{PayoutPlan, Settlement},
    poll::{Choice, Poll, PollStatus},
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{BetStore, LedgerStore, PollStore, SettlementStore};

/// SQLite-backed wager store.
///
/// Implements every store port against one connection pool.
pub struct SqliteWagerStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteWagerStore {
    /// Create a new SQLite wager store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Open the database at `database_url`, running pending migrations.
    ///
    /// # Errors
    /// Returns an error if the pool cannot be created or migrations fail.
    pub fn open(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url)?;
        run_migrations(&pool)?;
        debug!(database = %database_url, "SQLite wager store ready");
        Ok(Self::new(pool))
    }

    fn conn(&self) -> Result<DbConnection> {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }
}

fn load_balance(conn: &mut SqliteConnection, user: &UserId) -> Result<Option<Balance>> {
    let row: Option<BalanceRow> = user_points::table
        .find(user.as_str())
        .select(BalanceRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(BalanceRow::into_balance))
}

fn credit_in(conn: &mut SqliteConnection, user: &UserId, amount: Points) -> Result<Balance> {
    let current =
        load_balance(conn, user)?.ok_or_else(|| DomainError::account_not_found(user))?;
    let points = current
        .points
        .checked_add(amount)
        .ok_or_else(|| DomainError::account_overflow(user))?;
    diesel::update(user_points::table.find(user.as_str()))
        .set((
            user_points::points.eq(points),
            user_points::updated_at.eq(Utc::now().to_rfc3339()),
        ))
        .execute(conn)?;
    Ok(Balance::new(user.clone(), points))
}

fn load_poll(conn: &mut SqliteConnection, id: &PollId) -> Result<Option<Poll>> {
    let row: Option<PollRow> = polls::table
        .filter(polls::id.eq(id.as_str()))
        .select(PollRow::as_select())
        .first(conn)
        .optional()?;
    row.map(PollRow::into_poll).transpose()
}

fn require_poll(conn: &mut SqliteConnection, id: &PollId) -> Result<Poll> {
    load_poll(conn, id)?.ok_or_else(|| DomainError::poll_not_found(id).into())
}

fn resolve_in(conn: &mut SqliteConnection, id: &PollId, winner: Choice) -> Result<Poll> {
    let updated = diesel::update(
        polls::table
            .filter(polls::id.eq(id.as_str()))
            .filter(polls::status.eq(PollStatus::Active.as_str())),
    )
    .set((
        polls::status.eq(PollStatus::resolved(winner).as_str()),
        polls::resolved_at.eq(Some(Utc::now().to_rfc3339())),
    ))
    .execute(conn)?;

    let poll = require_poll(conn, id)?;
    if updated == 0 {
        return Err(DomainError::AlreadyResolved {
            poll: id.to_string(),
            status: poll.status(),
        }
        .into());
    }
    Ok(poll)
}

fn load_poll_bets(conn: &mut SqliteConnection, poll: &PollId) -> Result<Vec<Bet>> {
    let rows: Vec<BetRow> = bets::table
        .filter(bets::poll_id.eq(poll.as_str()))
        .order(bets::seq.asc())
        .select(BetRow::as_select())
        .load(conn)?;
    rows.into_iter().map(BetRow::into_bet).collect()
}

impl LedgerStore for SqliteWagerStore {
    async fn balance(&self, user: &UserId) -> Result<Option<Balance>> {
        let mut conn = self.conn()?;
        load_balance(&mut conn, user)
    }

    async fn open_account(&self, user: &UserId, starting_points: Points) -> Result<Balance> {
        let mut conn = self.conn()?;
        conn.immediate_transaction(|conn| {
            let now = Utc::now().to_rfc3339();
            let row = BalanceRow {
                user_id: user.to_string(),
                points: starting_points,
                created_at: now.clone(),
                updated_at: now,
            };
            let inserted = diesel::insert_or_ignore_into(user_points::table)
                .values(&row)
                .execute(conn)?;
            if inserted > 0 {
                debug!(user = %user, points = starting_points, "Opened ledger account");
            }
            load_balance(conn, user)?.ok_or_else(|| DomainError::account_not_found(user).into())
        })
    }

    async fn credit(&self, user: &UserId, amount: Points) -> Result<Balance> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount { amount }.into());
        }
        let mut conn = self.conn()?;
        conn.immediate_transaction(|conn| credit_in(conn, user, amount))
    }

    async fn debit(&self, user: &UserId, amount: Points) -> Result<Balance> {
        if amount <= 0 {
            return Err(DomainError::InvalidAmount { amount }.into());
        }
        let mut conn = self.conn()?;
        conn.immediate_transaction(|conn| {
            let current = load_balance(conn, user)?
                .ok_or_else(|| DomainError::account_not_found(user))?;
            if !current.covers(amount) {
                return Err(DomainError::InsufficientFunds {
                    user: user.to_string(),
                    requested: amount,
                    available: current.points,
                }
                .into());
            }

            diesel::update(user_points::table.find(user.as_str()))
                .set((
                    user_points::points.eq(user_points::points - amount),
                    user_points::updated_at.eq(Utc::now().to_rfc3339()),
                ))
                .execute(conn)?;

            Ok(Balance::new(user.clone(), current.points - amount))
        })
    }
}

impl PollStore for SqliteWagerStore {
    async fn insert_poll(&self, poll: &Poll) -> Result<()> {
        let mut conn = self.conn()?;
        diesel::insert_into(polls::table)
            .values(NewPollRow::from(poll))
            .execute(&mut conn)?;
        Ok(())
    }

    async fn poll(&self, id: &PollId) -> Result<Option<Poll>> {
        let mut conn = self.conn()?;
        load_poll(&mut conn, id)
    }

    async fn polls(&self) -> Result<Vec<Poll>> {
        let mut conn = self.conn()?;
        let rows: Vec<PollRow> = polls::table
            .order(polls::seq.asc())
            .select(PollRow::as_select())
            .load(&mut conn)?;
        rows.into_iter().map(PollRow::into_poll).collect()
    }

    async fn resolve_poll(&self, id: &PollId, winner: Choice) -> Result<Poll> {
        let mut conn = self.conn()?;
        conn.immediate_transaction(|conn| resolve_in(conn, id, winner))
    }
}

impl BetStore for SqliteWagerStore {
    async fn place_bet(&self, bet: &Bet) -> Result<()> {
        let mut conn = self.conn()?;
        conn.immediate_transaction(|conn| {
            let mut poll = require_poll(conn, bet.poll_id())?;
            poll.ensure_active()?;
            poll.add_stake(bet.choice(), bet.amount())?;

            diesel::insert_into(bets::table)
                .values(NewBetRow::from(bet))
                .execute(conn)?;

            diesel::update(polls::table.filter(polls::id.eq(bet.poll_id().as_str())))
                .set((
                    polls::total_points_a.eq(poll.total_points_a()),
                    polls::total_points_b.eq(poll.total_points_b()),
                ))
                .execute(conn)?;
            Ok(())
        })
    }

    async fn bets_for_poll(&self, poll: &PollId) -> Result<Vec<Bet>> {
        let mut conn = self.conn()?;
        load_poll_bets(&mut conn, poll)
    }

    async fn bets_for_user(&self, user: &UserId) -> Result<Vec<Bet>> {
        let mut conn = self.conn()?;
        let rows: Vec<BetRow> = bets::table
            .filter(bets::user_id.eq(user.as_str()))
            .order(bets::seq.asc())
            .select(BetRow::as_select())
            .load(&mut conn)?;
        rows.into_iter().map(BetRow::into_bet).collect()
    }
}

impl SettlementStore for SqliteWagerStore {
    async fn settle(&self, id: &PollId, winner: Choice) -> Result<Settlement> {
        let mut conn = self.conn()?;
        conn.immediate_transaction(|conn| {
            let poll = resolve_in(conn, id, winner)?;

            let bets = load_poll_bets(conn, id)?;
            let plan = PayoutPlan::compute(id, winner, &bets);

            for (user, amount) in plan.credits() {
                credit_in(conn, &user, amount)?;
            }

            Ok(Settlement { poll, plan })
        })
    }
}
