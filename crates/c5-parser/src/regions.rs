//! Region discovery: depth-first search for `<c5-area>` tags.

use c5_core::{C5Error, Region};

use crate::markup::{MarkupNode, NodeKind, parse_markup};
use crate::validate::region_from_tag;

/// Tag name of a display area.
pub const REGION_TAG: &str = "c5-area";

/// Collect every region under `root`, in document order.
///
/// A matched tag is captured whole; its descendants are not searched.
///
/// # Errors
/// Returns [`C5Error::InvalidRegion`] for the first tag without a name.
pub fn find_regions<N: MarkupNode>(root: &N) -> Result<Vec<Region>, C5Error> {
    let mut regions = Vec::new();
    collect_regions(root, &mut regions)?;
    Ok(regions)
}

/// Parse `source` and collect its regions.
///
/// # Errors
/// See [`find_regions`].
pub fn parse_regions(source: &str) -> Result<Vec<Region>, C5Error> {
    let tree = parse_markup(source);
    find_regions(&tree.root())
}

fn collect_regions<N: MarkupNode>(node: &N, regions: &mut Vec<Region>) -> Result<(), C5Error> {
    if is_region(node) {
        let region = region_from_tag(&node.attributes(), node.byte_range())?;
        tracing::debug!(name = %region.name, start = region.start_offset, "region found");
        regions.push(region);
        return Ok(());
    }

    for child in &node.child_nodes() {
        collect_regions(child, regions)?;
    }
    Ok(())
}

fn is_region<N: MarkupNode>(node: &N) -> bool {
    node.node_kind() == NodeKind::Element
        && node
            .tag_name()
            .is_some_and(|tag| tag.eq_ignore_ascii_case(REGION_TAG))
}
