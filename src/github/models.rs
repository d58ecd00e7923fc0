//! Data shapes exchanged with the GitHub releases API.

use serde::{Deserialize, Deserializer, Serialize};

/// One downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseAsset {
    /// File name as shown on the release page
    pub name: String,
    /// Direct download URL
    #[serde(rename = "browser_download_url")]
    pub download_url: String,
}

/// The subset of `GET /repos/{owner}/{name}/releases/latest` puff reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestRelease {
    /// Release tag, used as the opaque version string
    #[serde(rename = "tag_name")]
    pub version: String,
    /// Assets in the order the API lists them; `null` decodes as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assets: Vec<ReleaseAsset>,
}

impl LatestRelease {
    /// Names of all assets, in listed order.
    #[must_use]
    pub fn asset_names(&self) -> Vec<&str> {
        self.assets.iter().map(|a| a.name.as_str()).collect()
    }

    /// Pair the release version with one chosen asset.
    #[must_use]
    pub fn release_for(&self, asset: &ReleaseAsset) -> Release {
        Release::new(self.version.clone(), asset)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ReleaseAsset>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ReleaseAsset>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A resolved installable unit: version plus the chosen asset.
///
/// Built fresh on every resolution and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Opaque version identifier, compared only for equality
    pub version: String,
    /// Download URL of the chosen asset
    pub download_url: String,
    /// File name of the chosen asset, used to detect archives
    pub asset_name: String,
}

impl Release {
    /// Create a release from a version and the chosen asset.
    #[must_use]
    pub fn new(version: impl Into<String>, asset: &ReleaseAsset) -> Self {
        let asset_name = if asset.name.is_empty() {
            file_name_from_url(&asset.download_url).to_string()
        } else {
            asset.name.clone()
        };
        Self {
            version: version.into(),
            download_url: asset.download_url.clone(),
            asset_name,
        }
    }
}

/// Final path segment of a URL, ignoring any query string or fragment.
#[must_use]
pub fn file_name_from_url(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    without_query.rsplit('/').next().unwrap_or(without_query)
}
