//! Processor and compiler traits.
//!
//! The seams the environment dispatches through while rendering an asset.
//! The directive processor implements [`Processor`]; dialect translators
//! (template-to-script and similar) implement [`Compiler`] on top of it.

use crate::asset::RenderError;
use crate::attributes::AssetAttributes;
use crate::context::{CallChain, RenderContext};
use crate::environment::Environment;

/// A source-to-source transformation stage.
///
/// Registered on the [`Environment`] per format extension and invoked by
/// [`Asset::render`](crate::Asset::render). Implementations must pass `ctx`
/// and `calls` down unchanged into any nested resolution they trigger, so
/// cross-file state stays visible to the whole pipeline.
pub trait Processor: Send + Sync {
    /// Transform `source` for the asset described by `attributes`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] for structural failures; per-fragment error
    /// containment is an implementation concern.
    fn process(
        &self,
        env: &Environment,
        attributes: &AssetAttributes,
        source: &str,
        ctx: &mut RenderContext,
        calls: &mut CallChain,
    ) -> Result<String, RenderError>;
}

/// A processor that translates one source dialect into another.
///
/// Registering a compiler for an extension also changes attribute
/// derivation: the claimed extension no longer terminates a suffix chain
/// (`app.js.coffee` keeps the `.js.coffee` suffix instead of ending at
/// `.coffee`).
pub trait Compiler: Processor {
    /// Mimetype of the compiled result (e.g. `"application/javascript"`).
    fn result_mimetype(&self) -> &str;
}
