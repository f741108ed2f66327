//! # c5-core
//!
//! Core types and error taxonomy for the c5t theme compiler.
//!
//! This crate provides the types shared by the parser, the code generators and
//! the build orchestrator:
//! - [`Region`]: one recognized `<c5-area>` occurrence in a document
//! - [`Fragment`] and [`FragmentRegistry`]: comment-delimited spans that are
//!   extracted into their own files, possibly across documents
//! - [`C5Error`]: the validation failures raised while transforming a document

pub mod errors;
pub mod fragment;
pub mod region;

pub use errors::{C5Error, HandleRole};
pub use fragment::{Fragment, FragmentEnd, FragmentRegistry};
pub use region::Region;
