//! SQLite persistence adapter.
//!
//! Provides a SQLite-backed implementation of every store port using
//! Diesel ORM. Mutating operations run inside `BEGIN IMMEDIATE`
//! transactions so concurrent writers are serialized by SQLite itself.

pub mod database;
pub mod store;

