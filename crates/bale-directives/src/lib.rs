//! Comment-header directive processing for the bale pipeline.
//!
//! A source asset may open with a comment header carrying directives:
//!
//! ```text
//! /*
//!  *= require vendor/jquery
//!  *= require_directory ui
//!  *= require_self
//!  */
//! var app = {};
//! ```
//!
//! [`DirectivesProcessor`] splits the header from the body, parses the
//! directive lines, resolves each `require`, `require_directory`, and
//! `require_self` against the environment, and assembles the rendered
//! fragments into a single output body. Dependency order follows directive
//! placement; without an explicit `require_self`, the asset's own body lands
//! last.
//!
//! Resolution is depth-first and synchronous: every required asset is fully
//! rendered (including its own nested directives) before the next directive
//! is considered. A failing directive - wrong arity, unknown name, missing
//! target, or a dependency cycle - is contained to that directive: its
//! fragment is omitted, a warning is logged, and assembly continues.
//!
//! The processor implements [`Processor`](bale_assets::Processor), so it is
//! registered on an [`Environment`](bale_assets::Environment) per format
//! extension and re-entered through [`Asset`](bale_assets::Asset) rendering
//! for nested content.

mod header;
mod parser;
mod processor;

pub use processor::{DirectiveError, DirectivesProcessor};
