//! Wagerbook - points-based pari-mutuel prediction polls.
//!
//! Users hold point balances, create two-option polls, stake points on
//! either side, and the poll creator resolves the poll. All stakes form one
//! pool that is split among the winning bets in proportion to their stake,
//! rounded down.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Pure types and the payout computation
//! - [`port`] - Store traits the application depends on
//! - [`adapter`] - SQLite and in-memory stores, plus the CLI
//! - [`application`] - Use cases and per-entity write serialization
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `testkit` - Expose fixtures in [`testkit`] to integration tests
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use wagerbook::adapter::outbound::memory::MemoryWagerStore;
//! use wagerbook::application::wager::service::WagerService;
//! use wagerbook::domain::id::UserId;
//! use wagerbook::domain::poll::Choice;
//!
//! # #[tokio::main]
//! # async fn main() -> wagerbook::error::Result<()> {
//! let service = WagerService::new(Arc::new(MemoryWagerStore::new()), 500);
//! let carol = UserId::new("carol");
//! let poll = service.create_poll(&carol, "Rain?", "Yes", "No").await?;
//! service.place_bet(&UserId::new("dave"), poll.id(), 100, Choice::A).await?;
//! let settlement = service.resolve_poll(&carol, poll.id(), Choice::A).await?;
//! assert_eq!(settlement.plan.distributed(), 100);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
