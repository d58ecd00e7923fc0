//! Error handling for puff
//!
//! This module provides the typed error enum used by the release pipeline and
//! the user-facing error reporting used by the CLI. The system follows two
//! principles:
//! 1. **Strongly-typed errors** so callers can tell a rate-limited API apart
//!    from a stale asset pattern or a broken archive
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`PuffError`] - Enumerated error kinds for every failure in the pipeline
//! - [`ErrorContext`] - Wrapper that adds details and a suggestion for display
//!
//! # Error Categories
//!
//! - **Network**: [`PuffError::NetworkError`], [`PuffError::ApiError`],
//!   [`PuffError::TruncatedDownload`]
//! - **Release data**: [`PuffError::DecodeError`], [`PuffError::NoMatchingAsset`]
//! - **Archives**: [`PuffError::ArchiveError`], [`PuffError::BinaryNotFoundInArchive`]
//! - **Disk state**: [`PuffError::PersistenceError`]
//! - **Input and configuration**: [`PuffError::InvalidRepoPath`],
//!   [`PuffError::InvalidPattern`], [`PuffError::ConfigError`]
//!
//! The core never recovers from these locally. Every error carries the
//! repository path, URL, file path or status code needed to render a precise
//! message, and the outermost caller decides whether a failure is fatal.
//!
//! # Examples
//!
//! ```rust,no_run
//! use puff_cli::core::{PuffError, user_friendly_error};
//!
//! let err = PuffError::ApiError {
//!     url: "https://api.github.com/repos/pgulb/plasma/releases/latest".to_string(),
//!     status: 404,
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(err));
//! ctx.display(); // Shows colored error with suggestion
//! ```

use colored::Colorize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// The main error type for puff operations.
///
/// All fields are owned strings or integers so the error can be cloned,
/// logged, and moved across the per-repository boundary of batch operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuffError {
    /// Transport-level failure or timeout on an HTTP call.
    #[error("Network error while requesting {url}: {reason}")]
    NetworkError {
        /// URL that was being requested
        url: String,
        /// Underlying transport error message
        reason: String,
    },

    /// The hosting API answered with a non-success status.
    #[error("GitHub returned HTTP {status} for {url}")]
    ApiError {
        /// URL that was requested
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The release document could not be decoded.
    #[error("Failed to decode release data from {url}: {reason}")]
    DecodeError {
        /// URL the document came from
        url: String,
        /// Decoder error message
        reason: String,
    },

    /// No release asset satisfied the selection criteria.
    #[error("No release asset of '{repo}' matches {criteria}")]
    NoMatchingAsset {
        /// Repository path (owner/name)
        repo: String,
        /// Human-readable description of the pattern or fragments used
        criteria: String,
    },

    /// The downloaded archive does not contain the expected binary.
    #[error("Binary '{binary}' not found in archive {archive}")]
    BinaryNotFoundInArchive {
        /// Expected binary base name
        binary: String,
        /// Asset file name of the archive
        archive: String,
    },

    /// The downloaded archive could not be decompressed or read.
    #[error("Failed to read archive {archive}: {reason}")]
    ArchiveError {
        /// Asset file name of the archive
        archive: String,
        /// Decompression or tar error message
        reason: String,
    },

    /// The response body was shorter or longer than advertised.
    #[error("Incomplete download from {url}: expected {expected} bytes, got {received}")]
    TruncatedDownload {
        /// Download URL
        url: String,
        /// Bytes announced by `Content-Length`
        expected: u64,
        /// Bytes actually received
        received: u64,
    },

    /// Reading or writing the metadata document or a binary failed.
    #[error("Failed to {operation} {path}: {reason}")]
    PersistenceError {
        /// Short verb phrase, e.g. "write binary"
        operation: String,
        /// File or directory involved
        path: String,
        /// Underlying I/O or serialization error message
        reason: String,
    },

    /// The repository reference is not of the form `owner/name`.
    #[error("Invalid repository path '{path}', expected owner/name")]
    InvalidRepoPath {
        /// The rejected input
        path: String,
    },

    /// A catalog selection pattern is not a valid regular expression.
    #[error("Invalid asset pattern for '{repo}': {reason}")]
    InvalidPattern {
        /// Repository path of the catalog entry
        repo: String,
        /// Regex compiler message
        reason: String,
    },

    /// Configuration could not be loaded.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// Any other failure, rendered verbatim.
    #[error("{message}")]
    Other {
        /// Full error message including the cause chain
        message: String,
    },
}

impl PuffError {
    /// Build a [`PuffError::PersistenceError`] from an I/O (or serde) error.
    pub fn persistence(
        operation: impl Into<String>,
        path: &Path,
        reason: impl fmt::Display,
    ) -> Self {
        Self::PersistenceError {
            operation: operation.into(),
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`PuffError::NetworkError`] from a transport error.
    pub fn network(url: &str, reason: impl fmt::Display) -> Self {
        Self::NetworkError {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// Wraps a [`PuffError`] with optional details and a suggestion for how to
/// resolve it. Used by `main` to print errors in the terminal.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PuffError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without details or suggestion.
    #[must_use]
    pub const fn new(error: PuffError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known [`PuffError`] kinds get tailored suggestions; anything else is
/// reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(puff_error) = error.downcast_ref::<PuffError>() {
        return create_error_context(puff_error.clone());
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(PuffError::Other {
        message,
    })
}

fn create_error_context(error: PuffError) -> ErrorContext {
    match &error {
        PuffError::NetworkError { .. } => ErrorContext::new(error)
            .with_suggestion("Check your internet connection and re-run the command")
            .with_details("The request failed or timed out before a response was received"),

        PuffError::ApiError { status, .. } => {
            let suggestion = match status {
                401 => "Your GitHub token was rejected. Replace the token stored in the gh_pat file or set PUFF_GITHUB_TOKEN",
                403 | 429 => "GitHub rate limit reached or access denied. Configure a personal access token or wait before retrying",
                404 => "Check that the repository path is correct and that it has at least one published release",
                _ => "GitHub may be having problems. Re-run the command later",
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        PuffError::DecodeError { .. } => ErrorContext::new(error)
            .with_details("The response was not a valid GitHub release document"),

        PuffError::NoMatchingAsset { repo, .. } => {
            let suggestion = format!(
                "Look at the assets of the latest release of {repo} and retry with different name fragments; for featured repositories the built-in pattern may be stale"
            );
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        PuffError::BinaryNotFoundInArchive { .. } => ErrorContext::new(error)
            .with_details("The archive was downloaded but no entry is named after the repository")
            .with_suggestion("The project may ship its binary under a different name; pick a non-archive asset if one exists"),

        PuffError::TruncatedDownload { .. } => ErrorContext::new(error)
            .with_suggestion("The connection was interrupted. Re-run the command to download again"),

        PuffError::PersistenceError { .. } => ErrorContext::new(error).with_suggestion(
            match cfg!(windows) {
                true => "Check that the puff config directory is writable",
                false => "Check permissions of the puff config directory with 'ls -la'",
            },
        ),

        PuffError::InvalidRepoPath { .. } => ErrorContext::new(error)
            .with_suggestion("Use the GitHub path of the repository, for example 'pgulb/plasma'"),

        _ => ErrorContext::new(error),
    }
}
