//! A located asset and its rendering pipeline.

use std::path::{Path, PathBuf};

use crate::attributes::AssetAttributes;
use crate::context::{CallChain, RenderContext};
use crate::environment::Environment;
use crate::finder::FinderError;

/// Error from rendering an asset.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// The finder failed while locating or reading content.
    #[error(transparent)]
    Finder(#[from] FinderError),

    /// The asset is already being rendered further up the call chain.
    #[error("circular dependency: {chain}")]
    Circular {
        /// The in-progress chain, ending at the re-entered path.
        chain: String,
    },
}

/// A located asset.
///
/// Pairs the derived [`AssetAttributes`] with the backing location reported
/// by the finder. Rendering demands the fully processed text: raw content is
/// read, every processor registered for the format extension runs in order,
/// then every wired compiler for the compiler extensions, outermost dialect
/// first. Nothing is cached at this layer; each render re-reads and
/// re-processes.
#[derive(Debug, Clone)]
pub struct Asset {
    attributes: AssetAttributes,
    location: PathBuf,
}

impl Asset {
    /// Wrap a located asset.
    #[must_use]
    pub fn new(attributes: AssetAttributes, location: PathBuf) -> Self {
        Self {
            attributes,
            location,
        }
    }

    /// The asset's attributes.
    #[must_use]
    pub fn attributes(&self) -> &AssetAttributes {
        &self.attributes
    }

    /// The backing location.
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Render the asset to fully processed text.
    ///
    /// The asset's logical path is held on `calls` for the duration of the
    /// render; re-entering an in-progress path fails with
    /// [`RenderError::Circular`] instead of recursing, leaving the caller to
    /// contain or propagate the cycle.
    ///
    /// # Errors
    ///
    /// [`RenderError::Circular`] on re-entry, otherwise whatever the finder
    /// or a processor raises.
    pub fn render(
        &self,
        env: &Environment,
        ctx: &mut RenderContext,
        calls: &mut CallChain,
    ) -> Result<String, RenderError> {
        let path = self.attributes.path();
        if calls.contains(path) {
            let chain = format!("{} -> {}", calls.chain(), path);
            return Err(RenderError::Circular { chain });
        }

        calls.push(path);
        let result = self.render_stages(env, ctx, calls);
        calls.pop();

        let text = result?;
        ctx.record_dependency(&self.location);
        tracing::debug!(path, bytes = text.len(), "asset rendered");
        Ok(text)
    }

    fn render_stages(
        &self,
        env: &Environment,
        ctx: &mut RenderContext,
        calls: &mut CallChain,
    ) -> Result<String, RenderError> {
        let mut text = env.read(self.attributes.path())?;

        if let Some(format) = self.attributes.format_extension() {
            for processor in env.processors_for(format) {
                text = processor.process(env, &self.attributes, &text, ctx, calls)?;
            }
        }

        for extension in self.attributes.compiler_extensions().iter().rev() {
            if let Some(compiler) = env.compiler(extension) {
                text = compiler.process(env, &self.attributes, &text, ctx, calls)?;
            }
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use crate::mock::MockFinder;
    use crate::processor::{Compiler, Processor};

    use super::*;

    /// Wraps its input so stage order is observable.
    struct Tag(&'static str);

    impl Processor for Tag {
        fn process(
            &self,
            _env: &Environment,
            _attributes: &AssetAttributes,
            source: &str,
            _ctx: &mut RenderContext,
            _calls: &mut CallChain,
        ) -> Result<String, RenderError> {
            Ok(format!("{}({source})", self.0))
        }
    }

    impl Compiler for Tag {
        fn result_mimetype(&self) -> &str {
            "application/javascript"
        }
    }

    fn env(files: &[(&str, &str)]) -> Environment {
        let mut finder = MockFinder::new();
        for (path, contents) in files {
            finder = finder.with_file(*path, *contents);
        }
        let mut env = Environment::new(Arc::new(finder));
        env.register_mimetype(".js", "application/javascript");
        env
    }

    fn locate(env: &Environment, path: &str) -> Asset {
        let attributes = env.attributes(path);
        let (attributes, location) = env.find(&attributes).unwrap();
        Asset::new(attributes, location)
    }

    #[test]
    fn test_render_without_stages_is_raw_text() {
        let env = env(&[("app.js", "var app;")]);
        let asset = locate(&env, "app.js");

        let text = asset
            .render(&env, &mut RenderContext::new(), &mut CallChain::new())
            .unwrap();
        assert_eq!(text, "var app;");
    }

    #[test]
    fn test_processors_then_compilers_innermost_first() {
        let mut env = env(&[("app.js.a.b", "src")]);
        env.register_processor(".js", Arc::new(Tag("proc")));
        env.register_compiler(".a", Arc::new(Tag("a")));
        env.register_compiler(".b", Arc::new(Tag("b")));

        let asset = locate(&env, "app.js.a.b");
        let text = asset
            .render(&env, &mut RenderContext::new(), &mut CallChain::new())
            .unwrap();

        // Directive-style processors see the raw source; compilers run from
        // the outermost dialect extension inward.
        assert_eq!(text, "a(b(proc(src)))");
    }

    #[test]
    fn test_render_records_dependency() {
        let env = env(&[("app.js", "var app;")]);
        let asset = locate(&env, "app.js");
        let mut ctx = RenderContext::new();

        asset.render(&env, &mut ctx, &mut CallChain::new()).unwrap();
        assert_eq!(ctx.dependencies(), [PathBuf::from("/mock/app.js")]);
    }

    #[test]
    fn test_render_refuses_reentry() {
        let env = env(&[("app.js", "var app;")]);
        let asset = locate(&env, "app.js");
        let mut calls = CallChain::new();
        calls.push("app.js");

        let err = asset
            .render(&env, &mut RenderContext::new(), &mut calls)
            .unwrap_err();
        assert!(matches!(err, RenderError::Circular { .. }));
        assert_eq!(err.to_string(), "circular dependency: app.js -> app.js");
    }

    #[test]
    fn test_call_chain_unwinds_after_render() {
        let env = env(&[("app.js", "var app;")]);
        let asset = locate(&env, "app.js");
        let mut calls = CallChain::new();

        asset
            .render(&env, &mut RenderContext::new(), &mut calls)
            .unwrap();
        assert!(!calls.contains("app.js"));
    }
}
