//! Logical asset attributes.
//!
//! An [`AssetAttributes`] value describes one logical path inside the asset
//! tree: its normalized path, its extension chain, and the suffix chain that
//! determines which processors apply and which sibling assets a directory
//! include matches.

/// Lexically normalize a `/`-separated logical path.
///
/// Collapses `.` and `..` segments without touching the filesystem. Leading
/// `..` segments that would escape the tree root are kept; backends decide
/// whether to reject them.
///
/// # Example
///
/// ```
/// use bale_assets::normalize;
///
/// assert_eq!(normalize("js/../css/./site.css"), "css/site.css");
/// assert_eq!(normalize("lib//util.js"), "lib/util.js");
/// ```
#[must_use]
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), None | Some(&"..")) {
                    segments.push("..");
                } else {
                    segments.pop();
                }
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Every dot-suffix of the basename, in order.
///
/// `js/app.js.coffee` yields `[".js", ".coffee"]`.
fn extensions_of(path: &str) -> Vec<String> {
    let basename = path.rsplit('/').next().unwrap_or(path);
    let mut extensions = Vec::new();
    if basename.is_empty() {
        return extensions;
    }
    // Skip the stem: everything before the first dot past position 0 is not
    // an extension, and a leading dot (dotfile) is part of the stem.
    let mut rest = basename;
    while let Some(idx) = rest[1..].find('.').map(|i| i + 1) {
        rest = &rest[idx..];
        let end = rest[1..].find('.').map_or(rest.len(), |i| i + 1);
        extensions.push(rest[..end].to_owned());
    }
    extensions
}

/// Immutable description of one logical asset path.
///
/// Derived from the path string and the environment's extension registries;
/// recreated on every resolution, never cached across registry changes.
///
/// The *suffix chain* starts at the format extension - the rightmost
/// extension registered as a mimetype and not claimed by a compiler - and
/// runs to the end of the basename. When no extension qualifies the whole
/// extension chain is the suffix. `app.js.coffee` (with `.js` registered and
/// `.coffee` a compiler extension) has the suffix `[".js", ".coffee"]`, while
/// `jquery.min.js` has just `[".js"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetAttributes {
    path: String,
    extensions: Vec<String>,
    suffix_start: usize,
    path_without_suffix: String,
}

impl AssetAttributes {
    /// Build attributes from a normalized path and the index of the format
    /// extension within `extensions`.
    pub(crate) fn from_parts(path: String, extensions: Vec<String>, suffix_start: usize) -> Self {
        let suffix_len: usize = extensions[suffix_start..].iter().map(String::len).sum();
        let path_without_suffix = path[..path.len() - suffix_len].to_owned();
        Self {
            path,
            extensions,
            suffix_start,
            path_without_suffix,
        }
    }

    /// Derive attributes for `path`, consulting the given registry callbacks.
    ///
    /// `is_format` reports whether an extension has a registered mimetype;
    /// `is_compiler` whether a compiler claims it.
    pub(crate) fn derive(
        path: &str,
        is_format: impl Fn(&str) -> bool,
        is_compiler: impl Fn(&str) -> bool,
    ) -> Self {
        let path = normalize(path);
        let extensions = extensions_of(&path);
        let suffix_start = extensions
            .iter()
            .rposition(|ext| is_format(ext) && !is_compiler(ext))
            .unwrap_or(0);
        Self::from_parts(path, extensions, suffix_start)
    }

    /// The normalized logical path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All extensions of the basename, in order.
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// The suffix chain, from the format extension to the end.
    #[must_use]
    pub fn suffix(&self) -> &[String] {
        &self.extensions[self.suffix_start..]
    }

    /// The suffix chain joined into a single string (e.g. `".js.coffee"`).
    #[must_use]
    pub fn suffix_string(&self) -> String {
        self.suffix().concat()
    }

    /// The format extension, when the asset has any extension at all.
    #[must_use]
    pub fn format_extension(&self) -> Option<&str> {
        self.extensions.get(self.suffix_start).map(String::as_str)
    }

    /// Extensions past the format extension, each a candidate compiler stage.
    #[must_use]
    pub fn compiler_extensions(&self) -> &[String] {
        match self.extensions.get(self.suffix_start + 1..) {
            Some(rest) => rest,
            None => &[],
        }
    }

    /// The path with the suffix chain stripped; used as a module or template
    /// name by downstream compilers.
    #[must_use]
    pub fn path_without_suffix(&self) -> &str {
        &self.path_without_suffix
    }

    /// The logical directory containing this asset (`""` at the tree root).
    #[must_use]
    pub fn logical_dir(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => "",
        }
    }

    /// Candidate logical paths a locator should try, in order: the path
    /// itself, then the `index` file of the directory module it may name.
    #[must_use]
    pub fn search_paths(&self) -> Vec<String> {
        let mut paths = vec![self.path.clone()];
        let stem = self
            .path_without_suffix
            .rsplit('/')
            .next()
            .unwrap_or(&self.path_without_suffix);
        if stem != "index" && !self.path_without_suffix.is_empty() {
            paths.push(format!(
                "{}/index{}",
                self.path_without_suffix,
                self.suffix_string()
            ));
        }
        paths
    }
}
