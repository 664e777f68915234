//! Directive dispatch and assembly.

use bale_assets::{
    Asset, AssetAttributes, CallChain, Environment, Processor, RenderContext, RenderError,
    normalize,
};

use crate::header;
use crate::parser::{self, Directive};

/// A directive-local failure.
///
/// Scope is one directive line: the dispatcher logs the error, omits the
/// directive's fragment, and moves on. Only structural failures (backend
/// I/O, pipeline misconfiguration) abort assembly.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DirectiveError {
    /// A directive received the wrong number of arguments.
    #[error("line {line}: `{name}` expects {expected} (got {got})")]
    Arity {
        /// Directive name.
        name: &'static str,
        /// 0-based header line.
        line: usize,
        /// Human description of the expected arity.
        expected: &'static str,
        /// Number of arguments actually given.
        got: usize,
    },

    /// A required path has no backing asset.
    #[error("line {line}: required path not found: {path}")]
    NotFound {
        /// 0-based header line.
        line: usize,
        /// The path argument as written.
        path: String,
    },

    /// A required asset is already being rendered further up the chain.
    #[error("line {line}: circular dependency: {chain}")]
    Circular {
        /// 0-based header line.
        line: usize,
        /// The in-progress chain, ending at the re-entered path.
        chain: String,
    },

    /// The directive name is not part of the grammar.
    #[error("line {line}: unknown directive `{name}`")]
    Unknown {
        /// 0-based header line.
        line: usize,
        /// The unrecognized name.
        name: String,
    },
}

/// Outcome of handling one directive.
enum Failure {
    /// Contained at the dispatch boundary.
    Directive(DirectiveError),
    /// Propagates to the caller.
    Structural(RenderError),
}

impl From<DirectiveError> for Failure {
    fn from(err: DirectiveError) -> Self {
        Self::Directive(err)
    }
}

/// The directive processor.
///
/// Splits a source into comment header and body, resolves the header's
/// directives depth-first against the environment, and joins the rendered
/// fragments into the final text. Stateless; register one instance per
/// format extension.
///
/// Directive table:
///
/// | Directive | Arity | Effect |
/// |---|---|---|
/// | `require <path>` | 1 | append the target asset, fully rendered |
/// | `require_directory <path>` | 1 | append every suffix-matching asset directly in the directory, lexically ascending |
/// | `require_self` | 0 | place this asset's own body here |
///
/// Failures are contained per directive; see [`DirectiveError`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectivesProcessor;

impl DirectivesProcessor {
    /// Create a directives processor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Processor for DirectivesProcessor {
    fn process(
        &self,
        env: &Environment,
        attributes: &AssetAttributes,
        source: &str,
        ctx: &mut RenderContext,
        calls: &mut CallChain,
    ) -> Result<String, RenderError> {
        let (header, body) = header::split(source);
        if header.is_empty() {
            return Ok(format!("{}\n", body.trim()));
        }

        let mut run = Run {
            env,
            attributes,
            body,
            ctx,
            calls,
        };
        let assembled = run.assemble(header)?;
        Ok(format!("{assembled}\n"))
    }
}

/// Per-call state for one asset's directive pass.
struct Run<'a> {
    env: &'a Environment,
    attributes: &'a AssetAttributes,
    body: &'a str,
    ctx: &'a mut RenderContext,
    calls: &'a mut CallChain,
}

impl Run<'_> {
    fn assemble(&mut self, header: &str) -> Result<String, RenderError> {
        let mut fragments: Vec<String> = Vec::new();
        let mut has_require_self = false;

        for directive in parser::parse_header(header) {
            let result = self.dispatch(&directive, &mut fragments, &mut has_require_self);
            if let Err(failure) = result {
                match failure {
                    Failure::Directive(err) => {
                        tracing::warn!(asset = self.attributes.path(), %err, "directive skipped");
                    }
                    Failure::Structural(err) => return Err(err),
                }
            }
        }

        if !has_require_self {
            fragments.push(self.body.trim().to_owned());
        }
        Ok(fragments.join("\n\n").trim().to_owned())
    }

    fn dispatch(
        &mut self,
        directive: &Directive,
        fragments: &mut Vec<String>,
        has_require_self: &mut bool,
    ) -> Result<(), Failure> {
        match directive.name() {
            "require" => self.require(directive, fragments),
            "require_directory" => self.require_directory(directive, fragments),
            "require_self" => {
                self.require_self(directive, fragments)?;
                *has_require_self = true;
                Ok(())
            }
            name => Err(DirectiveError::Unknown {
                line: directive.line(),
                name: name.to_owned(),
            }
            .into()),
        }
    }

    fn require(&mut self, directive: &Directive, fragments: &mut Vec<String>) -> Result<(), Failure> {
        let path = single_argument("require", directive)?;
        let attributes = self.env.attributes(&self.relative_path(path, false));

        let (attributes, location) = match self.env.find(&attributes) {
            Ok(found) => found,
            Err(err) if err.is_unresolvable() => {
                return Err(DirectiveError::NotFound {
                    line: directive.line(),
                    path: path.to_owned(),
                }
                .into());
            }
            Err(err) => return Err(Failure::Structural(err.into())),
        };

        self.append(Asset::new(attributes, location), directive.line(), fragments)
    }

    fn require_directory(
        &mut self,
        directive: &Directive,
        fragments: &mut Vec<String>,
    ) -> Result<(), Failure> {
        let path = single_argument("require_directory", directive)?;
        let dir = self.relative_path(path, true);

        let mut entries = self.env.list(&dir, self.attributes.suffix());
        entries.sort_by(|a, b| a.0.path().cmp(b.0.path()));

        for (attributes, location) in entries {
            self.append(Asset::new(attributes, location), directive.line(), fragments)?;
        }
        Ok(())
    }

    fn require_self(
        &mut self,
        directive: &Directive,
        fragments: &mut Vec<String>,
    ) -> Result<(), Failure> {
        if !directive.args().is_empty() {
            return Err(DirectiveError::Arity {
                name: "require_self",
                line: directive.line(),
                expected: "no arguments",
                got: directive.args().len(),
            }
            .into());
        }
        fragments.push(self.body.trim().to_owned());
        Ok(())
    }

    /// Render an asset and append its stripped text as one fragment.
    fn append(
        &mut self,
        asset: Asset,
        line: usize,
        fragments: &mut Vec<String>,
    ) -> Result<(), Failure> {
        match asset.render(self.env, self.ctx, self.calls) {
            Ok(text) => {
                fragments.push(text.trim().to_owned());
                Ok(())
            }
            Err(RenderError::Circular { chain }) => {
                Err(DirectiveError::Circular { line, chain }.into())
            }
            Err(RenderError::Finder(err)) if err.is_unresolvable() => Err(DirectiveError::NotFound {
                line,
                path: asset.attributes().path().to_owned(),
            }
            .into()),
            Err(err) => Err(Failure::Structural(err)),
        }
    }

    /// Resolve a directive path argument against this asset's directory.
    ///
    /// File references get the current asset's suffix chain appended, so
    /// `require foo` from `app.js.coffee` looks up `foo.js.coffee`.
    /// Directory references stay bare; suffix filtering happens at listing.
    fn relative_path(&self, require_path: &str, is_directory: bool) -> String {
        let joined = match self.attributes.logical_dir() {
            "" => require_path.to_owned(),
            dir => format!("{dir}/{require_path}"),
        };
        let normalized = normalize(&joined);
        if is_directory {
            normalized
        } else {
            format!("{normalized}{}", self.attributes.suffix_string())
        }
    }
}

fn single_argument<'a>(
    name: &'static str,
    directive: &'a Directive,
) -> Result<&'a str, DirectiveError> {
    match directive.args() {
        [path] => Ok(path.as_str()),
        args => Err(DirectiveError::Arity {
            name,
            line: directive.line(),
            expected: "exactly one argument",
            got: args.len(),
        }),
    }
}
