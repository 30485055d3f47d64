//! Builders for domain primitives used across tests.

use crate::domain::{
    balance::Points,
    bet::Bet,
    id::{PollId, UserId},
    poll::{Choice, Poll},
};

/// Create a [`UserId`] from a string.
pub fn user(id: &str) -> UserId {
    UserId::new(id)
}

/// Create a [`PollId`] from a string.
pub fn poll_id(id: &str) -> PollId {
    PollId::new(id)
}

/// An active poll created by `creator` with options "Yes" and "No".
///
/// # Panics
/// Panics if `title` is blank.
pub fn poll(creator: &str, title: &str) -> Poll {
    Poll::try_new(user(creator), title, "Yes", "No").expect("valid poll")
}

/// A bet of `amount` by `user_id` on `choice` in `poll`.
///
/// # Panics
/// Panics if `amount` is not positive.
pub fn bet(user_id: &str, poll: &PollId, amount: Points, choice: Choice) -> Bet {
    Bet::try_new(user(user_id), poll.clone(), amount, choice).expect("valid bet")
}

/// The three bets of the reference example: 100 on A, 100 on B, 50 on A.
pub fn reference_bets(poll: &PollId) -> Vec<Bet> {
    vec![
        bet("user1", poll, 100, Choice::A),
        bet("user2", poll, 100, Choice::B),
        bet("user3", poll, 50, Choice::A),
    ]
}
