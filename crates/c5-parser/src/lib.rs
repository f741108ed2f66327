//! # c5-parser
//!
//! Locates the two markup conventions the theme compiler understands:
//! - `<c5-area name="...">` tags, captured as [`Region`](c5_core::Region)s
//! - `<!-- C5 Begin <label> -->` / `<!-- C5 End <label> -->` comment pairs,
//!   recorded into a [`FragmentRegistry`](c5_core::FragmentRegistry)
//!
//! Traversal is written against the narrow [`MarkupNode`] capability so it does
//! not depend on the concrete parser. The bundled adapter implements it for
//! ast-grep's tree-sitter HTML nodes.

pub mod markers;
pub mod markup;
pub mod regions;
pub mod validate;

pub use markers::{Marker, MarkerKind, find_fragment_markers, parse_marker};
pub use markup::{HtmlAttr, MarkupNode, MarkupTree, NodeKind, parse_markup};
pub use regions::{REGION_TAG, find_regions, parse_regions};
