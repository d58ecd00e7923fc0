//! Repository references and the catalog of featured repositories.
//!
//! A [`RepoRef`] identifies a release source by its GitHub `owner/name` path.
//! Featured repositories additionally carry an asset selection pattern: a
//! regular expression matched against release asset names, because a single
//! release usually ships binaries for many OS/architecture combinations.
//!
//! The catalog is plain data compiled into the binary ([`FEATURED`]) and
//! turned into an immutable [`Catalog`] once at startup. Construction compiles
//! every pattern, so an invalid expression is reported before any network
//! request is made.
//!
//! # Examples
//!
//! ```rust
//! use puff_cli::catalog::{Catalog, RepoRef};
//!
//! # fn example() -> Result<(), puff_cli::core::PuffError> {
//! let catalog = Catalog::featured()?;
//! let repo = RepoRef::parse("pgulb/plasma")?;
//!
//! assert_eq!(repo.binary_name(), "plasma");
//! assert!(catalog.find(repo.path()).is_some());
//! # Ok(())
//! # }
//! ```

use crate::core::{PuffError, Result};
use regex::Regex;
use std::fmt;

/// Compiled-in description of a featured repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedRepo {
    /// GitHub path, `owner/name`
    pub path: &'static str,
    /// One-line description shown by `puff list`
    pub description: &'static str,
    /// Regular expression selecting the asset to install
    pub pattern: &'static str,
}

/// Repositories puff knows how to install without asking questions.
pub const FEATURED: &[FeaturedRepo] = &[
    FeaturedRepo {
        path: "pgulb/plasma",
        description: "Docker container controller with own HTTP API",
        pattern: r"\blinux-amd64\b",
    },
    FeaturedRepo {
        path: "pgulb/puff",
        description: "puff itself, for self-updates",
        pattern: r"^puff[-_]linux[-_]amd64(\.tar\.gz)?$",
    },
];

/// A validated `owner/name` repository reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    path: String,
    description: Option<String>,
}

impl RepoRef {
    /// Parse user input into a repository reference.
    ///
    /// Accepts `owner/name` as well as `https://github.com/owner/name` URLs.
    /// Surrounding whitespace and a trailing slash are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PuffError::InvalidRepoPath`] unless the input has exactly two
    /// non-empty segments.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let stripped = trimmed
            .strip_prefix("https://github.com/")
            .or_else(|| trimmed.strip_prefix("http://github.com/"))
            .or_else(|| trimmed.strip_prefix("github.com/"))
            .unwrap_or(trimmed)
            .trim_end_matches('/');

        let mut segments = stripped.split('/');
        match (segments.next(), segments.next(), segments.next()) {
            (Some(owner), Some(name), None)
                if is_valid_segment(owner) && is_valid_segment(name) =>
            {
                Ok(Self {
                    path: format!("{owner}/{name}"),
                    description: None,
                })
            }
            _ => Err(PuffError::InvalidRepoPath {
                path: input.to_string(),
            }),
        }
    }

    /// Attach a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The `owner/name` path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Name of the installed binary: the final path segment.
    #[must_use]
    pub fn binary_name(&self) -> &str {
        binary_name_from_path(&self.path)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Final segment of a repository path, used as the installed file name.
#[must_use]
pub fn binary_name_from_path(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// A featured repository with its compiled selection pattern.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    repo: RepoRef,
    pattern: Regex,
}

impl CatalogEntry {
    /// The repository reference.
    #[must_use]
    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    /// The compiled asset selection pattern.
    #[must_use]
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

/// Immutable set of featured repositories.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog, compiling every selection pattern.
    ///
    /// # Errors
    ///
    /// - [`PuffError::InvalidRepoPath`] if an entry path is not `owner/name`
    /// - [`PuffError::InvalidPattern`] if a pattern does not compile
    pub fn new(featured: &[FeaturedRepo]) -> Result<Self> {
        let entries = featured
            .iter()
            .map(|f| {
                let repo = RepoRef::parse(f.path)?.with_description(f.description);
                let pattern = Regex::new(f.pattern).map_err(|e| PuffError::InvalidPattern {
                    repo: f.path.to_string(),
                    reason: e.to_string(),
                })?;
                Ok(CatalogEntry {
                    repo,
                    pattern,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            entries,
        })
    }

    /// The compiled-in [`FEATURED`] catalog.
    ///
    /// # Errors
    ///
    /// Fails only if the compiled-in table is broken, which the test suite
    /// guards against.
    pub fn featured() -> Result<Self> {
        Self::new(FEATURED)
    }

    /// Look up a catalog entry by exact repository path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.repo.path() == path)
    }

    /// Iterate over the entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    /// Number of featured repositories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
