//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!            ┌─────────────────────────┐
//!   CLI ───▶ │   Application           │
//!            │   (WagerService)        │
//!            └───────────┬─────────────┘
//!                        │ WagerStore
//!            ┌───────────┴─────────────┐
//!            ▼                         ▼
//!      ┌───────────┐            ┌─────────────┐
//!      │  Memory   │            │   SQLite    │
//!      │  Adapter  │            │   Adapter   │
//!      └───────────┘            └─────────────┘
//! ```

pub mod outbound;

