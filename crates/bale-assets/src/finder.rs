//! Finder trait and error type.
//!
//! A [`Finder`] maps logical paths inside the virtual asset tree to backing
//! content. Implementations handle backend-specific details; consumers only
//! see logical paths and opaque locations.

use std::path::{Path, PathBuf};

/// Error from a finder operation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FinderError {
    /// No backing file exists for the logical path.
    #[error("asset not found: {path}")]
    NotFound {
        /// The logical path that was looked up.
        path: String,
    },

    /// The logical path is not addressable (absolute, or escaping the tree).
    #[error("invalid logical path: {path}")]
    InvalidPath {
        /// The offending logical path.
        path: String,
    },

    /// Backing I/O failed for a path that does exist.
    #[error("failed to read {}", path.display())]
    Io {
        /// Location that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl FinderError {
    /// Create a not-found error for a logical path.
    #[must_use]
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Whether this error is the distinguishable missing-asset condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the lookup failed because the path cannot name an asset at
    /// all - missing, or not addressable inside the tree.
    ///
    /// The directive processor contains unresolvable paths at the directive
    /// boundary; backend I/O failures propagate as structural.
    #[must_use]
    pub fn is_unresolvable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidPath { .. })
    }
}

/// Locator abstraction over the virtual asset tree.
///
/// All path parameters are *logical* paths: `/`-separated, relative to the
/// tree root (e.g. `"js/app.js"`). Returned locations are backend-specific
/// (absolute filesystem paths for [`FsFinder`](crate::FsFinder)) and are used
/// for diagnostics and dependency bookkeeping only.
pub trait Finder: Send + Sync {
    /// Locate a single asset.
    ///
    /// # Errors
    ///
    /// [`FinderError::NotFound`] when no backing file exists;
    /// [`FinderError::InvalidPath`] when the path cannot address the tree.
    fn find(&self, logical: &str) -> Result<PathBuf, FinderError>;

    /// List the regular files directly inside a logical directory.
    ///
    /// Returns `(logical_path, location)` pairs in no guaranteed order;
    /// callers sort. A missing directory is an empty listing, not an error.
    ///
    /// # Errors
    ///
    /// [`FinderError::InvalidPath`] when the path cannot address the tree.
    fn list(&self, dir: &str) -> Result<Vec<(String, PathBuf)>, FinderError>;

    /// Read an asset's raw text.
    ///
    /// # Errors
    ///
    /// [`FinderError::NotFound`] when the asset does not exist,
    /// [`FinderError::Io`] when it exists but cannot be read.
    fn read(&self, logical: &str) -> Result<String, FinderError>;
}

/// Reject logical paths that are absolute or escape the tree root.
///
/// Shared by backends; called after lexical normalization so only genuinely
/// escaping `..` segments remain.
pub(crate) fn validate_logical(logical: &str) -> Result<(), FinderError> {
    let escapes = Path::new(logical)
        .components()
        .any(|c| !matches!(c, std::path::Component::Normal(_) | std::path::Component::CurDir));
    if escapes {
        return Err(FinderError::InvalidPath {
            path: logical.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        assert!(FinderError::not_found("a.js").is_not_found());
        assert!(
            !FinderError::InvalidPath {
                path: "../a.js".to_owned()
            }
            .is_not_found()
        );
    }

    #[test]
    fn test_is_unresolvable() {
        assert!(FinderError::not_found("a.js").is_unresolvable());
        assert!(
            FinderError::InvalidPath {
                path: "../a.js".to_owned()
            }
            .is_unresolvable()
        );
        let io = FinderError::Io {
            path: "/tree/a.js".into(),
            source: std::io::Error::other("disk"),
        };
        assert!(!io.is_unresolvable());
    }

    #[test]
    fn test_validate_logical_accepts_tree_paths() {
        assert!(validate_logical("js/app.js").is_ok());
        assert!(validate_logical("app.js").is_ok());
        assert!(validate_logical("").is_ok());
    }

    #[test]
    fn test_validate_logical_rejects_escapes() {
        assert!(validate_logical("../etc/passwd").is_err());
        assert!(validate_logical("/etc/passwd").is_err());
    }

    #[test]
    fn test_display_includes_path() {
        let err = FinderError::not_found("js/app.js");
        assert_eq!(err.to_string(), "asset not found: js/app.js");
    }
}
