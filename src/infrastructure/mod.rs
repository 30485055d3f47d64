//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic: configuration, default paths, and runtime wiring.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for the wager service
//! - [`config`] - Configuration loading and validation
//! - [`paths`] - Default file locations

pub mod bootstrap;
pub mod config;
pub mod paths;
