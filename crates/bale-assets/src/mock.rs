//! Mock finder for testing.
//!
//! Provides [`MockFinder`] for unit tests that need a virtual asset tree
//! without touching the filesystem.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::finder::{Finder, FinderError, validate_logical};

/// In-memory finder keyed by logical path.
///
/// Locations are synthesized under a `/mock` prefix so dependency bookkeeping
/// and diagnostics have something to show.
///
/// # Example
///
/// ```
/// use bale_assets::{Finder, MockFinder};
///
/// let finder = MockFinder::new()
///     .with_file("js/app.js", "//= require lib\n")
///     .with_file("js/lib.js", "var lib;");
///
/// assert_eq!(finder.read("js/lib.js").unwrap(), "var lib;");
/// ```
#[derive(Debug, Default)]
pub struct MockFinder {
    files: HashMap<String, String>,
}

impl MockFinder {
    /// Create an empty mock finder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with the given logical path and contents.
    #[must_use]
    pub fn with_file(mut self, logical: impl Into<String>, contents: impl Into<String>) -> Self {
        self.files.insert(logical.into(), contents.into());
        self
    }

    fn location(logical: &str) -> PathBuf {
        PathBuf::from(format!("/mock/{logical}"))
    }
}

impl Finder for MockFinder {
    fn find(&self, logical: &str) -> Result<PathBuf, FinderError> {
        validate_logical(logical)?;
        if self.files.contains_key(logical) {
            Ok(Self::location(logical))
        } else {
            Err(FinderError::not_found(logical))
        }
    }

    fn list(&self, dir: &str) -> Result<Vec<(String, PathBuf)>, FinderError> {
        validate_logical(dir)?;
        let entries = self
            .files
            .keys()
            .filter(|logical| {
                let parent = logical.rfind('/').map_or("", |idx| &logical[..idx]);
                parent == dir
            })
            .map(|logical| (logical.clone(), Self::location(logical)))
            .collect();
        Ok(entries)
    }

    fn read(&self, logical: &str) -> Result<String, FinderError> {
        validate_logical(logical)?;
        self.files
            .get(logical)
            .cloned()
            .ok_or_else(|| FinderError::not_found(logical))
    }
}
