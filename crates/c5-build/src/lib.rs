//! # c5-build
//!
//! Turns HTML documents into a concrete5 theme.
//!
//! [`ThemeBuild`] drives one build across many documents that share a
//! fragment namespace. Generated files go to an [`OutputSink`]; the splicing
//! helpers in [`splice`] do the offset arithmetic against each document's
//! original text.

pub mod build;
pub mod sink;
pub mod splice;

pub use build::{BuildState, DocumentStatus, ProcessedDocument, ThemeBuild};
pub use sink::{Diagnostic, MemorySink, OutputSink};
pub use splice::{excise_fragments, splice_regions, substitute_regions};
