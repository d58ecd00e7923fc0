//! Asset payload download.

use super::ReleaseClient;
use super::models::file_name_from_url;
use crate::core::{PuffError, Result};
use crate::utils::progress::ProgressBar;
use reqwest::header::ACCEPT;
use tracing::{debug, info};

/// Upper bound for the buffer reserved up front from `Content-Length`.
const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

impl ReleaseClient {
    /// Download an asset into memory.
    ///
    /// Progress is reported as a percentage of `Content-Length` when the
    /// server sends one. The payload is returned only when the number of bytes
    /// received equals the announced length.
    ///
    /// # Errors
    ///
    /// - [`PuffError::NetworkError`] on transport failure or timeout, including
    ///   a connection closed before `Content-Length` bytes arrived
    /// - [`PuffError::ApiError`] on a non-2xx status
    /// - [`PuffError::TruncatedDownload`] if the body was read to its end but
    ///   its length still differs from `Content-Length`
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!("Downloading {}", url);

        let mut response = self
            .request(url)
            .header(ACCEPT, "application/octet-stream")
            .send()
            .await
            .map_err(|e| PuffError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PuffError::ApiError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let expected = response.content_length();
        let progress = if self.show_progress {
            ProgressBar::new_download(expected, file_name_from_url(url))
        } else {
            ProgressBar::hidden()
        };

        let capacity = expected.unwrap_or(0).min(MAX_PREALLOCATION);
        let mut payload = Vec::with_capacity(usize::try_from(capacity).unwrap_or(0));

        loop {
            let chunk = match response.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    progress.finish_and_clear();
                    return Err(PuffError::network(url, e));
                }
            };
            payload.extend_from_slice(&chunk);
            progress.set_position(payload.len() as u64);
        }
        progress.finish_and_clear();

        let received = payload.len() as u64;
        if let Some(expected) = expected {
            if received != expected {
                return Err(PuffError::TruncatedDownload {
                    url: url.to_string(),
                    expected,
                    received,
                });
            }
        }

        info!("Downloaded {} bytes from {}", received, url);
        Ok(payload)
    }
}
