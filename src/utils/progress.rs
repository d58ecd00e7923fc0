//! Progress indicators for downloads.
//!
//! Thin wrapper over `indicatif` so every puff progress bar shares one look
//! and one switch to turn it off.
//!
//! # Environment Variables
//!
//! - `PUFF_NO_PROGRESS`: Set to any value to hide all progress indicators
//!
//! # Examples
//!
//! ```rust
//! use puff_cli::utils::progress::ProgressBar;
//!
//! let progress = ProgressBar::new_download(Some(1024), "plasma");
//! progress.set_position(512);
//! progress.finish_and_clear();
//! ```

use crate::constants::ENV_NO_PROGRESS;
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

/// Checks if progress bars should be disabled.
///
/// Progress bars are hidden when `PUFF_NO_PROGRESS` is set to any value.
/// `--no-progress` works separately: the CLI asks the release client for
/// hidden bars instead.
fn is_progress_disabled() -> bool {
    std::env::var(ENV_NO_PROGRESS).is_ok()
}

/// A progress bar with consistent styling.
#[derive(Debug, Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Progress bar for a download.
    ///
    /// With a known total the bar shows a percentage and byte counts; without
    /// one it degrades to a spinner showing bytes received so far.
    pub fn new_download(total: Option<u64>, prefix: impl Into<String>) -> Self {
        let bar = if is_progress_disabled() {
            IndicatifBar::hidden()
        } else {
            match total {
                Some(len) => {
                    let bar = IndicatifBar::new(len);
                    bar.set_style(ProgressStyle::download());
                    bar
                }
                None => {
                    let bar = IndicatifBar::new_spinner();
                    bar.set_style(ProgressStyle::download_unknown());
                    bar.enable_steady_tick(Duration::from_millis(100));
                    bar
                }
            }
        };
        bar.set_prefix(prefix.into());
        Self {
            inner: bar,
        }
    }

    /// A progress bar that never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    /// Sets the absolute position.
    pub fn set_position(&self, pos: u64) {
        self.inner.set_position(pos);
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Whether this bar is drawn at all.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.inner.is_hidden()
    }

    /// Finish and remove the bar from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

/// Shared progress styles.
pub struct ProgressStyle;

impl ProgressStyle {
    /// Style for downloads with a known size.
    ///
    /// ```text
    /// plasma [━━━━━━━━━━━━━━━━╸━━━━━━━] 64% 2.1 MiB/3.3 MiB (00:05)
    /// ```
    pub fn download() -> IndicatifStyle {
        IndicatifStyle::default_bar()
            .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {percent}% {bytes}/{total_bytes} ({eta})")
            .map(|style| style.progress_chars("━╸━"))
            .unwrap_or_else(|_| IndicatifStyle::default_bar())
    }

    /// Style for downloads without a `Content-Length`.
    pub fn download_unknown() -> IndicatifStyle {
        IndicatifStyle::default_spinner()
            .template("{prefix:.bold.cyan} {spinner:.cyan} {bytes} ({bytes_per_sec})")
            .unwrap_or_else(|_| IndicatifStyle::default_spinner())
    }
}
