//! Integration test suite for puff
//!
//! End-to-end tests against a mock GitHub API. No network access is needed.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **install**: catalog and free-form installs, idempotence, failure isolation
//! - **update**: updating everything installed
//! - **remove**: confirmed and declined removals
//! - **cli**: the `puff` binary driven with `assert_cmd`

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod install;
mod remove;
mod update;
