//! GitHub release resolution and asset download.
//!
//! [`ReleaseClient`] talks to the `releases/latest` endpoint of the GitHub
//! REST API and downloads asset payloads. Every call is a plain sequential
//! request: one resolve, then at most one download per repository.
//!
//! # Authentication
//!
//! A personal access token raises the API rate limit. It is sent as
//! `Authorization: Bearer <token>` on both resolution and download requests.
//! An empty token means anonymous access and no header is sent at all.
//!
//! # Errors
//!
//! - transport failures and timeouts become [`PuffError::NetworkError`]
//! - non-2xx responses become [`PuffError::ApiError`] with the status code
//! - malformed release documents become [`PuffError::DecodeError`]
//!
//! Nothing is retried; batch callers decide what to do with a failure.

pub mod download;
pub mod models;
pub mod selection;

pub use models::{LatestRelease, Release, ReleaseAsset};
pub use selection::{select_by_fragments, select_by_pattern};

use crate::catalog::{CatalogEntry, RepoRef};
use crate::constants::{DEFAULT_API_BASE_URL, DEFAULT_HTTP_TIMEOUT, TOOL_VERSION};
use crate::core::{PuffError, Result};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::{debug, info};

const GITHUB_JSON: &str = "application/vnd.github+json";

/// Settings for building a [`ReleaseClient`].
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API base URL without trailing slash
    pub api_base_url: String,
    /// Personal access token; empty for anonymous access
    pub token: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// Draw a progress bar while downloading
    pub show_progress: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token: String::new(),
            timeout: DEFAULT_HTTP_TIMEOUT,
            show_progress: true,
        }
    }
}

/// Client for the GitHub releases API.
#[derive(Debug, Clone)]
pub struct ReleaseClient {
    http: Client,
    api_base_url: String,
    token: String,
    show_progress: bool,
}

impl ReleaseClient {
    /// Build a client from options.
    ///
    /// # Errors
    ///
    /// [`PuffError::ConfigError`] if the HTTP client cannot be initialized.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let http = Client::builder()
            .timeout(options.timeout)
            .user_agent(format!("puff/{TOOL_VERSION}"))
            .build()
            .map_err(|e| PuffError::ConfigError {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            api_base_url: options.api_base_url.trim_end_matches('/').to_string(),
            token: options.token,
            show_progress: options.show_progress,
        })
    }

    /// URL of the latest-release endpoint for `owner/name`.
    #[must_use]
    pub fn latest_release_url(&self, path: &str) -> String {
        format!("{}/repos/{}/releases/latest", self.api_base_url, path)
    }

    /// Whether a token is configured.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Resolve a featured repository using its selection pattern.
    ///
    /// # Errors
    ///
    /// Any request error, or [`PuffError::NoMatchingAsset`] if no asset of the
    /// latest release matches the entry's pattern.
    pub async fn resolve_catalog(&self, entry: &CatalogEntry) -> Result<Release> {
        let latest = self.latest_release(entry.repo()).await?;
        let asset = select_by_pattern(entry.repo().path(), &latest.assets, entry.pattern())?;
        info!("Resolved {} {} to asset {}", entry.repo(), latest.version, asset.name);
        Ok(latest.release_for(asset))
    }

    /// Fetch the latest release of a free-form repository.
    ///
    /// Returns the whole asset list; the caller picks one, typically with
    /// [`select_by_fragments`].
    ///
    /// # Errors
    ///
    /// [`PuffError::NetworkError`], [`PuffError::ApiError`] or
    /// [`PuffError::DecodeError`].
    pub async fn resolve_freeform(&self, repo: &RepoRef) -> Result<LatestRelease> {
        let latest = self.latest_release(repo).await?;
        info!("Latest release of {} is {} with {} assets", repo, latest.version, latest.assets.len());
        Ok(latest)
    }

    async fn latest_release(&self, repo: &RepoRef) -> Result<LatestRelease> {
        let url = self.latest_release_url(repo.path());
        debug!("GET {}", url);

        let response = self
            .request(&url)
            .header(ACCEPT, GITHUB_JSON)
            .send()
            .await
            .map_err(|e| PuffError::network(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PuffError::ApiError {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| PuffError::network(&url, e))?;
        serde_json::from_slice(&body).map_err(|e| PuffError::DecodeError {
            url,
            reason: e.to_string(),
        })
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let request = self.http.get(url);
        if self.is_authenticated() {
            request.bearer_auth(&self.token)
        } else {
            request
        }
    }
}
