//! Filesystem finder.
//!
//! Provides [`FsFinder`], an ordered multi-root search over real directories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::finder::{Finder, FinderError, validate_logical};

/// Filesystem-backed finder.
///
/// Searches an ordered list of root directories; for both lookup and listing
/// the first root containing a given logical path wins, so earlier roots
/// shadow later ones (application assets over vendored ones).
///
/// # Example
///
/// ```ignore
/// use bale_assets::{Finder, FsFinder};
///
/// let finder = FsFinder::with_roots(["app/static", "vendor/static"]);
/// let location = finder.find("js/app.js")?;
/// ```
#[derive(Debug, Clone)]
pub struct FsFinder {
    roots: Vec<PathBuf>,
}

impl FsFinder {
    /// Create a finder over a single root directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![root.into()],
        }
    }

    /// Create a finder over several roots, searched in order.
    #[must_use]
    pub fn with_roots<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    /// The configured roots, in search order.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}

impl Finder for FsFinder {
    fn find(&self, logical: &str) -> Result<PathBuf, FinderError> {
        validate_logical(logical)?;
        for root in &self.roots {
            let candidate = root.join(logical);
            if candidate.is_file() {
                tracing::debug!(logical, location = %candidate.display(), "asset located");
                return Ok(candidate);
            }
        }
        Err(FinderError::not_found(logical))
    }

    fn list(&self, dir: &str) -> Result<Vec<(String, PathBuf)>, FinderError> {
        validate_logical(dir)?;
        let mut seen: Vec<String> = Vec::new();
        let mut entries = Vec::new();
        for root in &self.roots {
            let Ok(dir_entries) = fs::read_dir(root.join(dir)) else {
                continue;
            };
            for entry in dir_entries.filter_map(Result::ok) {
                if !entry.file_type().is_ok_and(|t| t.is_file()) {
                    continue;
                }
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') || seen.contains(&name) {
                    continue;
                }
                let logical = if dir.is_empty() {
                    name.clone()
                } else {
                    format!("{dir}/{name}")
                };
                seen.push(name);
                entries.push((logical, entry.path()));
            }
        }
        Ok(entries)
    }

    fn read(&self, logical: &str) -> Result<String, FinderError> {
        let location = self.find(logical)?;
        read_text(&location)
    }
}

fn read_text(location: &Path) -> Result<String, FinderError> {
    fs::read_to_string(location).map_err(|source| FinderError::Io {
        path: location.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    fn tree(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (path, contents) in files {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_find_in_single_root() {
        let root = tree(&[("js/app.js", "var app;")]);
        let finder = FsFinder::new(root.path());

        let location = finder.find("js/app.js").unwrap();
        assert_eq!(location, root.path().join("js/app.js"));
    }

    #[test]
    fn test_find_missing_is_not_found() {
        let root = tree(&[]);
        let finder = FsFinder::new(root.path());

        let err = finder.find("nope.js").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_rejects_escaping_path() {
        let root = tree(&[]);
        let finder = FsFinder::new(root.path());

        assert!(matches!(
            finder.find("../outside.js"),
            Err(FinderError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_first_root_shadows_second() {
        let first = tree(&[("app.js", "first")]);
        let second = tree(&[("app.js", "second"), ("only.js", "second only")]);
        let finder = FsFinder::with_roots([first.path(), second.path()]);

        assert_eq!(finder.read("app.js").unwrap(), "first");
        assert_eq!(finder.read("only.js").unwrap(), "second only");
    }

    #[test]
    fn test_list_direct_children_only() {
        let root = tree(&[
            ("lib/a.js", ""),
            ("lib/b.js", ""),
            ("lib/nested/c.js", ""),
            ("top.js", ""),
        ]);
        let finder = FsFinder::new(root.path());

        let mut listed: Vec<String> = finder
            .list("lib")
            .unwrap()
            .into_iter()
            .map(|(logical, _)| logical)
            .collect();
        listed.sort();
        assert_eq!(listed, ["lib/a.js", "lib/b.js"]);
    }

    #[test]
    fn test_list_root_directory() {
        let root = tree(&[("top.js", ""), ("lib/a.js", "")]);
        let finder = FsFinder::new(root.path());

        let listed = finder.list("").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].0, "top.js");
    }

    #[test]
    fn test_list_skips_hidden_files() {
        let root = tree(&[("lib/.hidden.js", ""), ("lib/a.js", "")]);
        let finder = FsFinder::new(root.path());

        let listed = finder.list("lib").unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].0, "lib/a.js");
    }

    #[test]
    fn test_list_merges_roots_without_duplicates() {
        let first = tree(&[("lib/a.js", "first")]);
        let second = tree(&[("lib/a.js", "second"), ("lib/b.js", "")]);
        let finder = FsFinder::with_roots([first.path(), second.path()]);

        let mut listed = finder.list("lib").unwrap();
        listed.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(listed.len(), 2);
        assert!(listed[0].1.starts_with(first.path()));
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let root = tree(&[]);
        let finder = FsFinder::new(root.path());

        assert!(finder.list("no/such/dir").unwrap().is_empty());
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let root = tree(&[]);
        let finder = FsFinder::new(root.path());

        assert!(finder.read("nope.js").unwrap_err().is_not_found());
    }
}
