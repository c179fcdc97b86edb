//! Core engine for filtering OpenAPI 3.x documents.
//!
//! Given a parsed document and a set of path/operation/tag criteria,
//! [`filter`] produces a new document containing the selected operations
//! plus the transitive closure of every component they reference, so the
//! result stays self-consistent. Loading, serialization and the CLI live
//! in `oaf-cli`; this crate is a pure function over in-memory documents.

pub mod error;
pub mod filter;
pub mod parse;
pub mod validate;

pub use error::{FilterError, ParseError, RefError, ValidateError};
pub use filter::refs::ComponentKind;
pub use filter::FilterOptions;
pub use parse::spec::OpenApiSpec;

/// Filter `spec` down to the operations selected by `options`, carrying
/// along every component they transitively reference.
pub fn filter(spec: &OpenApiSpec, options: &FilterOptions) -> Result<OpenApiSpec, FilterError> {
    filter::apply(spec, options)
}
