// src/document/mod.rs
// =============================================================================
// Turning a repository into one markdown document.
//
// - convert: the pipeline (parse -> branch -> tree -> contents -> render)
// - render:  blank-line filtering and the markdown layout
// =============================================================================

mod convert;
mod render;

pub use convert::{convert, ConversionResult};
