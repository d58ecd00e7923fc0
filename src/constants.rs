//! Global constants used throughout the puff codebase.
//!
//! File names of the on-disk layout, environment variable names, and network
//! defaults live here so the setup code, the metadata store and the tests all
//! agree on them.

use std::time::Duration;

/// Name of the tool's own executable.
///
/// Installing a repository whose binary has this name is a self-update and
/// goes through a temp-file-and-rename write.
pub const SELF_BINARY_NAME: &str = "puff";

/// Version of the running binary, sent in the `User-Agent` header.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default GitHub REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Timeout for a whole HTTP request, connection and body included (600 seconds).
///
/// Large release assets are read fully into memory, so this is generous.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(600);

/// Directory name under the user config dir.
pub const CONFIG_DIR_NAME: &str = "puff";

/// Sub-directory holding installed binaries.
pub const BIN_DIR_NAME: &str = "bin";

/// Installation metadata document.
pub const METADATA_FILE_NAME: &str = "metadata.json";

/// File holding the GitHub personal access token.
pub const TOKEN_FILE_NAME: &str = "gh_pat";

/// Marker written once the user has answered the PATH prompt.
pub const PATH_ASKED_FILE_NAME: &str = "path_asked";

/// Log file written by the tracing subscriber.
pub const LOG_FILE_NAME: &str = "puff.log";

/// Optional settings file.
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Overrides the config directory location.
pub const ENV_CONFIG_DIR: &str = "PUFF_CONFIG_DIR";

/// Overrides the token stored in [`TOKEN_FILE_NAME`].
pub const ENV_GITHUB_TOKEN: &str = "PUFF_GITHUB_TOKEN";

/// Set to any value to hide progress bars.
pub const ENV_NO_PROGRESS: &str = "PUFF_NO_PROGRESS";

/// Shell startup files offered for the PATH export line.
pub const SHELL_RC_FILES: &[&str] = &[".bashrc", ".zshrc"];
