//! Utility modules shared by the release pipeline and the CLI.
//!
//! - [`fs`]: atomic writes, permission handling and directory creation
//! - [`progress`]: download progress bars built on `indicatif`

pub mod fs;
pub mod progress;

pub use fs::{atomic_write, ensure_dir};
pub use progress::{ProgressBar, ProgressStyle};
