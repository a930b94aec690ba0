//! Foundation types shared across the compiler pipeline.

pub mod source;
pub mod span;

pub use source::SourceFile;
pub use span::Span;
