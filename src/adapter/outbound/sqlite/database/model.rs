//! Database model types for Diesel ORM.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{bets, polls, user_points};
use crate::domain::{
    balance::Balance,
    bet::Bet,
    id::{BetId, PollId, UserId},
    poll::{Choice, Poll, PollStatus},
};
use crate::error::{Error, Result};

/// Database row for a ledger account.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = user_points)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BalanceRow {
    pub user_id: String,
    pub points: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl BalanceRow {
    pub fn into_balance(self) -> Balance {
        Balance::new(UserId::from(self.user_id), self.points)
    }
}

/// Database row for a poll (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = polls)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PollRow {
    pub seq: i64,
    pub id: String,
    pub title: String,
    pub option_a: String,
    pub option_b: String,
    pub creator_id: String,
    pub status: String,
    pub total_points_a: i64,
    pub total_points_b: i64,
    pub created_at: String,
    pub resolved_at: Option<String>,
}

impl PollRow {
    pub fn into_poll(self) -> Result<Poll> {
        let status: PollStatus = self.status.parse().map_err(Error::Parse)?;
        let resolved_at = self.resolved_at.as_deref().map(parse_timestamp).transpose()?;

        Ok(Poll::restore(
            PollId::from(self.id),
            self.title,
            self.option_a,
            self.option_b,
            UserId::from(self.creator_id),
            status,
            self.total_points_a,
            self.total_points_b,
            parse_timestamp(&self.created_at)?,
            resolved_at,
        ))
    }
}

/// Database row for a poll (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = polls)]
pub struct NewPollRow {
    pub id: String,
    pub title: String,
    pub option_a: String,
    pub option_b: String,
    pub creator_id: String,
    pub status: String,
    pub total_points_a: i64,
    pub total_points_b: i64,
    pub created_at: String,
    pub resolved_at: Option<String>,
}

impl From<&Poll> for NewPollRow {
    fn from(poll: &Poll) -> Self {
        Self {
            id: poll.id().to_string(),
            title: poll.title().to_string(),
            option_a: poll.option_a().to_string(),
            option_b: poll.option_b().to_string(),
            creator_id: poll.creator_id().to_string(),
            status: poll.status().as_str().to_string(),
            total_points_a: poll.total_points_a(),
            total_points_b: poll.total_points_b(),
            created_at: poll.created_at().to_rfc3339(),
            resolved_at: poll.resolved_at().map(|t| t.to_rfc3339()),
        }
    }
}

/// Database row for a bet (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = bets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BetRow {
    pub seq: i64,
    pub id: String,
    pub user_id: String,
    pub poll_id: String,
    pub amount: i64,
    pub choice: String,
    pub placed_at: String,
}

impl BetRow {
    pub fn into_bet(self) -> Result<Bet> {
        let choice: Choice = self.choice.parse().map_err(Error::Parse)?;
        Ok(Bet::restore(
            BetId::from(self.id),
            UserId::from(self.user_id),
            PollId::from(self.poll_id),
            self.amount,
            choice,
            parse_timestamp(&self.placed_at)?,
        ))
    }
}

/// Database row for a bet (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = bets)]
pub struct NewBetRow {
    pub id: String,
    pub user_id: String,
    pub poll_id: String,
    pub amount: i64,
    pub choice: String,
    pub placed_at: String,
}

impl From<&Bet> for NewBetRow {
    fn from(bet: &Bet) -> Self {
        Self {
            id: bet.id().to_string(),
            user_id: bet.user_id().to_string(),
            poll_id: bet.poll_id().to_string(),
            amount: bet.amount(),
            choice: bet.choice().as_str().to_string(),
            placed_at: bet.placed_at().to_rfc3339(),
        }
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Parse(e.to_string()))
}
