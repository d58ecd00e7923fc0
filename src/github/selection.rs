//! Choosing one asset out of a release.
//!
//! Two strategies, both first-match in the order the API lists assets:
//!
//! - **Pattern**: featured repositories carry a regular expression; the first
//!   asset whose name matches it wins.
//! - **Fragments**: free-form repositories are disambiguated by user-supplied
//!   name fragments with AND semantics. An asset qualifies only if every
//!   fragment is a case-sensitive substring of its name.
//!
//! When several assets qualify the earliest one is taken. The API does not
//! document its ordering, so ambiguous fragments can pick a different asset
//! between releases.

use super::models::ReleaseAsset;
use crate::core::{PuffError, Result};
use regex::Regex;
use tracing::debug;

/// First asset whose name matches `pattern`.
///
/// # Errors
///
/// [`PuffError::NoMatchingAsset`] if nothing matches.
pub fn select_by_pattern<'a>(
    repo: &str,
    assets: &'a [ReleaseAsset],
    pattern: &Regex,
) -> Result<&'a ReleaseAsset> {
    let chosen = assets.iter().find(|a| pattern.is_match(&a.name));
    debug!("pattern {} over {} assets of {}: {:?}", pattern, assets.len(), repo, chosen.map(|a| &a.name));
    chosen.ok_or_else(|| PuffError::NoMatchingAsset {
        repo: repo.to_string(),
        criteria: format!("pattern '{pattern}'"),
    })
}

/// First asset whose name contains every fragment.
///
/// # Errors
///
/// [`PuffError::NoMatchingAsset`] if no asset contains all fragments.
pub fn select_by_fragments<'a, S: AsRef<str>>(
    repo: &str,
    assets: &'a [ReleaseAsset],
    fragments: &[S],
) -> Result<&'a ReleaseAsset> {
    let chosen = assets.iter().find(|a| contains_all(&a.name, fragments));
    debug!("fragments over {} assets of {}: {:?}", assets.len(), repo, chosen.map(|a| &a.name));
    chosen.ok_or_else(|| PuffError::NoMatchingAsset {
        repo: repo.to_string(),
        criteria: describe_fragments(fragments),
    })
}

/// Whether `name` contains every fragment (case-sensitive).
#[must_use]
pub fn contains_all<S: AsRef<str>>(name: &str, fragments: &[S]) -> bool {
    fragments.iter().all(|f| name.contains(f.as_ref()))
}

fn describe_fragments<S: AsRef<str>>(fragments: &[S]) -> String {
    let quoted: Vec<String> = fragments.iter().map(|f| format!("'{}'", f.as_ref())).collect();
    format!("name fragments [{}]", quoted.join(", "))
}
