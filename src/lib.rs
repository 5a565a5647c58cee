//! Markdown reference documentation for service IR.
//!
//! For each interface the [`closure`] module collects the types, enums and
//! unions reachable from its method signatures, and [`render::Document`]
//! turns that closure and the methods into one linked document.
pub mod banner;
pub mod casing;
pub mod closure;
pub mod generate;
pub mod ir;
pub mod render;

pub use closure::{Closure, Direction};
pub use generate::{GenerateError, Options, OutputFile, generate, write_files};
pub use ir::{LoadError, Service};
pub use render::Document;
