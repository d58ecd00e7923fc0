//! Core types shared across puff.
//!
//! Currently this is the error model: [`PuffError`] for the typed failures the
//! release pipeline returns, and [`ErrorContext`] / [`user_friendly_error`] for
//! turning any error into a message with a suggestion.

pub mod error;

pub use error::{ErrorContext, PuffError, user_friendly_error};

/// Result alias used by the release pipeline.
pub type Result<T, E = PuffError> = std::result::Result<T, E>;
