//! A recognized `<c5-area>` tag occurrence.

use std::ops::Range;

/// One display area found in a single document.
///
/// Offsets are byte offsets into the source text the region was parsed from
/// and cover the whole element, start tag through end tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub is_global: bool,
    pub uses_grid: bool,
    pub is_editable: bool,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl Region {
    /// Byte range of the element in its source text.
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }
}
