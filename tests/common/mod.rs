//! Common test utilities for LabMix CLI tests.
//!
//! Provides `TestEnv` (isolated data directory plus CLI runner) and
//! fixture helpers for seeding an inventory.

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
