//! The environment: finder plus extension registries.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;

use crate::attributes::AssetAttributes;
use crate::finder::{Finder, FinderError};
use crate::processor::{Compiler, Processor};

/// Registry hub for one asset tree.
///
/// Owns the [`Finder`] and three registries:
///
/// - *mimetypes*: extension → mimetype; a registered extension is a format
///   extension candidate during attribute derivation
/// - *compilers*: extension → [`Compiler`]; a claimed extension extends the
///   suffix chain instead of terminating it, and its compiler runs during
///   rendering. Extensions may also be declared without an implementation
///   (configuration-side), affecting derivation only.
/// - *processors*: format extension → ordered processors applied to every
///   asset of that format (the directive processor registers here)
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use bale_assets::{Environment, FsFinder};
///
/// let mut env = Environment::new(Arc::new(FsFinder::new("app/static")));
/// env.register_mimetype(".js", "application/javascript");
/// env.register_processor(".js", Arc::new(DirectivesProcessor));
/// ```
pub struct Environment {
    finder: Arc<dyn Finder>,
    mimetypes: HashMap<String, String>,
    compiler_extensions: HashSet<String>,
    compilers: HashMap<String, Arc<dyn Compiler>>,
    processors: HashMap<String, Vec<Arc<dyn Processor>>>,
}

impl Environment {
    /// Create an environment over a finder, with empty registries.
    #[must_use]
    pub fn new(finder: Arc<dyn Finder>) -> Self {
        Self {
            finder,
            mimetypes: HashMap::new(),
            compiler_extensions: HashSet::new(),
            compilers: HashMap::new(),
            processors: HashMap::new(),
        }
    }

    /// The finder backing this environment.
    #[must_use]
    pub fn finder(&self) -> &dyn Finder {
        self.finder.as_ref()
    }

    /// Register a mimetype for an extension (e.g. `".js"`).
    pub fn register_mimetype(&mut self, extension: impl Into<String>, mimetype: impl Into<String>) {
        self.mimetypes.insert(extension.into(), mimetype.into());
    }

    /// Register a compiler for the extension it claims (e.g. `".coffee"`).
    pub fn register_compiler(&mut self, extension: impl Into<String>, compiler: Arc<dyn Compiler>) {
        let extension = extension.into();
        self.compiler_extensions.insert(extension.clone());
        self.compilers.insert(extension, compiler);
    }

    /// Declare an extension as compiler-claimed without wiring an
    /// implementation. Derivation treats it like a compiled dialect; assets
    /// carrying it pass through rendering untranslated until a compiler is
    /// registered.
    pub fn register_compiler_extension(&mut self, extension: impl Into<String>) {
        self.compiler_extensions.insert(extension.into());
    }

    /// Append a processor for a format extension. Processors run in
    /// registration order.
    pub fn register_processor(
        &mut self,
        extension: impl Into<String>,
        processor: Arc<dyn Processor>,
    ) {
        self.processors
            .entry(extension.into())
            .or_default()
            .push(processor);
    }

    /// The registered mimetype for an extension.
    #[must_use]
    pub fn mimetype(&self, extension: &str) -> Option<&str> {
        self.mimetypes.get(extension).map(String::as_str)
    }

    /// The compiler claiming an extension, when one is wired.
    #[must_use]
    pub fn compiler(&self, extension: &str) -> Option<&Arc<dyn Compiler>> {
        self.compilers.get(extension)
    }

    /// The processors registered for a format extension.
    #[must_use]
    pub fn processors_for(&self, extension: &str) -> &[Arc<dyn Processor>] {
        self.processors
            .get(extension)
            .map_or(&[], Vec::as_slice)
    }

    /// Derive [`AssetAttributes`] for a logical path. Pure; consults only the
    /// registries.
    #[must_use]
    pub fn attributes(&self, path: &str) -> AssetAttributes {
        AssetAttributes::derive(
            path,
            |ext| self.mimetypes.contains_key(ext),
            |ext| self.compiler_extensions.contains(ext),
        )
    }

    /// Locate the asset described by `attributes`.
    ///
    /// Tries each of the attribute's search paths in order; when an index
    /// variant wins, the returned attributes are re-derived for it.
    ///
    /// # Errors
    ///
    /// [`FinderError::NotFound`] when no candidate exists; other finder
    /// errors propagate unchanged.
    pub fn find(
        &self,
        attributes: &AssetAttributes,
    ) -> Result<(AssetAttributes, PathBuf), FinderError> {
        for candidate in attributes.search_paths() {
            match self.finder.find(&candidate) {
                Ok(location) => {
                    let found = if candidate == attributes.path() {
                        attributes.clone()
                    } else {
                        self.attributes(&candidate)
                    };
                    return Ok((found, location));
                }
                Err(err) if err.is_not_found() => {}
                Err(err) => return Err(err),
            }
        }
        Err(FinderError::not_found(attributes.path()))
    }

    /// List the assets directly inside `dir` whose suffix chain equals
    /// `suffix` exactly. Partially overlapping chains do not match.
    ///
    /// Ordering is unspecified; callers sort. Listing failures shrink to an
    /// empty result.
    #[must_use]
    pub fn list(&self, dir: &str, suffix: &[String]) -> Vec<(AssetAttributes, PathBuf)> {
        let entries = match self.finder.list(dir) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(dir, error = %err, "directory listing failed");
                return Vec::new();
            }
        };
        entries
            .into_iter()
            .filter_map(|(logical, location)| {
                let attributes = self.attributes(&logical);
                (attributes.suffix() == suffix).then_some((attributes, location))
            })
            .collect()
    }

    /// Read an asset's raw text through the finder.
    ///
    /// # Errors
    ///
    /// Propagates the finder's [`FinderError`].
    pub fn read(&self, logical: &str) -> Result<String, FinderError> {
        self.finder.read(logical)
    }
}
