//! Binary-outcome polls and their lifecycle.
//!
//! A poll starts [`PollStatus::Active`] and moves to exactly one of the
//! resolved states. Resolved states are terminal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::balance::Points;
use super::error::DomainError;
use super::id::{PollId, UserId};

/// One side of a binary poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
}

impl Choice {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            other => Err(format!("unknown choice '{other}'")),
        }
    }
}

/// Lifecycle status of a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PollStatus {
    Active,
    ResolvedA,
    ResolvedB,
}

impl PollStatus {
    /// The terminal status for a given winning side.
    #[must_use]
    pub const fn resolved(winner: Choice) -> Self {
        match winner {
            Choice::A => Self::ResolvedA,
            Choice::B => Self::ResolvedB,
        }
    }

    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    /// The winning side, if resolved.
    #[must_use]
    pub const fn winner(self) -> Option<Choice> {
        match self {
            Self::Active => None,
            Self::ResolvedA => Some(Choice::A),
            Self::ResolvedB => Some(Choice::B),
        }
    }

    /// Stable name used in storage and output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::ResolvedA => "RESOLVED_A",
            Self::ResolvedB => "RESOLVED_B",
        }
    }
}

impl fmt::Display for PollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PollStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "RESOLVED_A" => Ok(Self::ResolvedA),
            "RESOLVED_B" => Ok(Self::ResolvedB),
            other => Err(format!("unknown poll status '{other}'")),
        }
    }
}

/// A binary-outcome poll that users wager on.
///
/// Totals are the running sums of bet amounts per side. They are kept in
/// step with the bet records by the stores and can be recomputed from
/// bets with [`PoolTotals`](super::payout::PoolTotals).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    id: PollId,
    title: String,
    option_a: String,
    option_b: String,
    creator_id: UserId,
    status: PollStatus,
    total_points_a: Points,
    total_points_b: Points,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl Poll {
    /// Create a new active poll with zero totals.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyField`] if the title or either option
    /// label is blank.
    pub fn try_new(
        creator_id: UserId,
        title: impl Into<String>,
        option_a: impl Into<String>,
        option_b: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let title = non_blank(title.into(), "title")?;
        let option_a = non_blank(option_a.into(), "option_a")?;
        let option_b = non_blank(option_b.into(), "option_b")?;

        Ok(Self {
            id: PollId::generate(),
            title,
            option_a,
            option_b,
            creator_id,
            status: PollStatus::Active,
            total_points_a: 0,
            total_points_b: 0,
            created_at: Utc::now(),
            resolved_at: None,
        })
    }

    /// Rebuild a poll from persisted fields.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn restore(
        id: PollId,
        title: String,
        option_a: String,
        option_b: String,
        creator_id: UserId,
        status: PollStatus,
        total_points_a: Points,
        total_points_b: Points,
        created_at: DateTime<Utc>,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            title,
            option_a,
            option_b,
            creator_id,
            status,
            total_points_a,
            total_points_b,
            created_at,
            resolved_at,
        }
    }

    pub fn id(&self) -> &PollId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn option_a(&self) -> &str {
        &self.option_a
    }

    pub fn option_b(&self) -> &str {
        &self.option_b
    }

    /// Label of the given side.
    pub fn label(&self, choice: Choice) -> &str {
        match choice {
            Choice::A => &self.option_a,
            Choice::B => &self.option_b,
        }
    }

    pub fn creator_id(&self) -> &UserId {
        &self.creator_id
    }

    pub fn status(&self) -> PollStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn total_points_a(&self) -> Points {
        self.total_points_a
    }

    pub fn total_points_b(&self) -> Points {
        self.total_points_b
    }

    /// Stored total for one side.
    pub fn total_for(&self, choice: Choice) -> Points {
        match choice {
            Choice::A => self.total_points_a,
            Choice::B => self.total_points_b,
        }
    }

    /// Sum of both sides. Stakes that would overflow the pool are rejected
    /// on entry, so this never saturates for stored polls.
    pub fn total_pool(&self) -> Points {
        self.total_points_a.saturating_add(self.total_points_b)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    pub fn is_created_by(&self, user: &UserId) -> bool {
        &self.creator_id == user
    }

    /// Fail unless the poll accepts bets.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PollNotActive`] for a resolved poll.
    pub fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(DomainError::PollNotActive {
                poll: self.id.to_string(),
                status: self.status,
            })
        }
    }

    /// Record a stake on one side.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::PointsOverflow`] if the side or the whole pool
    /// would exceed `Points::MAX`; the totals are left unchanged.
    pub(crate) fn add_stake(&mut self, choice: Choice, amount: Points) -> Result<(), DomainError> {
        let overflow = || DomainError::pool_overflow(&self.id);
        let (side, other) = match choice {
            Choice::A => (self.total_points_a, self.total_points_b),
            Choice::B => (self.total_points_b, self.total_points_a),
        };
        let side = side.checked_add(amount).ok_or_else(overflow)?;
        side.checked_add(other).ok_or_else(overflow)?;
        match choice {
            Choice::A => self.total_points_a = side,
            Choice::B => self.total_points_b = side,
        }
        Ok(())
    }

    /// Transition ACTIVE to the resolved state for `winner`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::AlreadyResolved`] if the poll is not active;
    /// the poll is left unchanged.
    pub fn resolve(&mut self, winner: Choice, at: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::AlreadyResolved {
                poll: self.id.to_string(),
                status: self.status,
            });
        }
        self.status = PollStatus::resolved(winner);
        self.resolved_at = Some(at);
        Ok(())
    }
}

fn non_blank(value: String, field: &'static str) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}
