//! Poll, bet and balance use cases.

pub mod lock;
pub mod service;

