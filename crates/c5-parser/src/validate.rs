//! Structural validation of captured region tags.
//!
//! Fragment marker validation (unmatched or re-opened labels) lives in
//! [`FragmentRegistry`](c5_core::FragmentRegistry), where the open/close
//! state is kept.

use std::ops::Range;

use c5_core::{C5Error, Region};

use crate::markup::HtmlAttr;

/// Build a [`Region`] from a `<c5-area>` tag's attributes.
///
/// `grid`, `global` and `editable` are `true` only for the exact value
/// `"true"`. `editable` defaults to `true` when the attribute is absent.
///
/// # Errors
/// Returns [`C5Error::InvalidRegion`] when `name` is missing or blank.
pub fn region_from_tag(attrs: &[HtmlAttr], span: Range<usize>) -> Result<Region, C5Error> {
    let mut region = Region {
        name: String::new(),
        is_global: false,
        uses_grid: false,
        is_editable: true,
        start_offset: span.start,
        end_offset: span.end,
    };

    for (name, value) in attrs {
        let value = value.as_deref().unwrap_or_default();
        match name.to_ascii_lowercase().as_str() {
            "name" => value.trim().clone_into(&mut region.name),
            "grid" => region.uses_grid = value == "true",
            "global" => region.is_global = value == "true",
            "editable" => region.is_editable = value == "true",
            _ => {}
        }
    }

    if region.name.is_empty() {
        return Err(C5Error::InvalidRegion);
    }
    Ok(region)
}
