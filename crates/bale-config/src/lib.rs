//! Configuration management for bale.
//!
//! Parses `bale.toml` files with serde and provides auto-discovery in parent
//! directories. A loaded [`Config`] builds a ready
//! [`Environment`](bale_assets::Environment): filesystem finder over the
//! configured roots, mimetype and compiler-extension registries filled, and
//! the directive processor registered for every configured format extension.
//!
//! ```toml
//! [assets]
//! roots = ["app/static", "vendor/static"]
//!
//! [assets.mimetypes]
//! ".js" = "application/javascript"
//! ".css" = "text/css"
//!
//! [assets.compilers]
//! ".coffee" = "application/javascript"
//! ```
//!
//! Root entries support `~` and `${VAR}` expansion; relative roots resolve
//! against the directory holding the config file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bale_assets::{Environment, FsFinder, Processor};
use bale_directives::DirectivesProcessor;
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "bale.toml";

/// Error from loading or applying configuration.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("failed to parse {}", path.display())]
    Parse {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A root entry failed `~`/`${VAR}` expansion.
    #[error("failed to expand `{value}`: {reason}")]
    Expand {
        /// The entry as written.
        value: String,
        /// Why expansion failed.
        reason: String,
    },
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Asset tree configuration.
    pub assets: AssetsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// The `[assets]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Root directories searched in order; earlier roots shadow later ones.
    pub roots: Vec<String>,
    /// Extension → mimetype; every entry is a format extension candidate.
    pub mimetypes: BTreeMap<String, String>,
    /// Extension → result mimetype for compiled dialects. Declaring an
    /// extension here affects suffix derivation; wiring the actual compiler
    /// implementation happens in code.
    pub compilers: BTreeMap<String, String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            roots: vec!["assets".to_owned()],
            mimetypes: BTreeMap::from([
                (".js".to_owned(), "application/javascript".to_owned()),
                (".css".to_owned(), "text/css".to_owned()),
            ]),
            compilers: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file cannot be read,
    /// [`ConfigError::Parse`] when it is not valid for the schema.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Search `start` and its ancestors for a `bale.toml` and load the first
    /// one found. Returns `Ok(None)` when no ancestor has one.
    ///
    /// # Errors
    ///
    /// Propagates [`Config::load`] errors for the file that was found.
    pub fn discover(start: &Path) -> Result<Option<Self>, ConfigError> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Self::load(&candidate).map(Some);
            }
        }
        Ok(None)
    }

    /// The directory config-relative paths resolve against.
    fn base_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new("."))
    }

    /// Build an [`Environment`] from this configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Expand`] when a root entry references an unset
    /// environment variable.
    pub fn build_environment(&self) -> Result<Environment, ConfigError> {
        let mut roots = Vec::with_capacity(self.assets.roots.len());
        for entry in &self.assets.roots {
            let expanded = shellexpand::full(entry).map_err(|err| ConfigError::Expand {
                value: entry.clone(),
                reason: err.to_string(),
            })?;
            let root = PathBuf::from(expanded.as_ref());
            roots.push(if root.is_absolute() {
                root
            } else {
                self.base_dir().join(root)
            });
        }

        let mut env = Environment::new(Arc::new(FsFinder::with_roots(roots)));
        let directives: Arc<dyn Processor> = Arc::new(DirectivesProcessor::new());
        for (extension, mimetype) in &self.assets.mimetypes {
            env.register_mimetype(extension, mimetype);
            env.register_processor(extension, Arc::clone(&directives));
        }
        for extension in self.assets.compilers.keys() {
            env.register_compiler_extension(extension);
        }
        Ok(env)
    }
}
