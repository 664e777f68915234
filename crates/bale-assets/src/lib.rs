//! Asset model for the bale preprocessing pipeline.
//!
//! This crate provides everything the directive processor consumes to resolve
//! and render dependencies:
//!
//! - [`AssetAttributes`] - logical path, extension chain, and suffix chain of
//!   an asset, derived from the environment's extension registries
//! - [`Finder`] trait with [`FsFinder`] (multi-root filesystem search) and
//!   [`MockFinder`] (in-memory, behind the `mock` feature) backends
//! - [`Environment`] - the registry hub tying the finder, mimetypes,
//!   compilers, and processors together
//! - [`Asset`] - a located asset that renders to fully processed text,
//!   re-entering the registered processors for its own content
//! - [`RenderContext`] and [`CallChain`] - shared per-pipeline state threaded
//!   through every recursive resolution
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bale_assets::{Asset, CallChain, Environment, FsFinder, RenderContext};
//!
//! let mut env = Environment::new(Arc::new(FsFinder::new("app/static")));
//! env.register_mimetype(".js", "application/javascript");
//!
//! let attributes = env.attributes("app.js");
//! let (attributes, location) = env.find(&attributes)?;
//! let text = Asset::new(attributes, location).render(
//!     &env,
//!     &mut RenderContext::new(),
//!     &mut CallChain::new(),
//! )?;
//! ```

mod asset;
mod attributes;
mod context;
mod environment;
mod finder;
mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod processor;

pub use asset::{Asset, RenderError};
pub use attributes::{AssetAttributes, normalize};
pub use context::{CallChain, RenderContext};
pub use environment::Environment;
pub use finder::{Finder, FinderError};
pub use fs::FsFinder;
#[cfg(feature = "mock")]
pub use mock::MockFinder;
pub use processor::{Compiler, Processor};
