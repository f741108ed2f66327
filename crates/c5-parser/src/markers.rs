//! Fragment marker discovery.
//!
//! Markers are HTML comments of the form `C5 Begin <label>` and
//! `C5 End <label>`. Leading hyphens and whitespace are ignored, the `C5`,
//! `Begin` and `End` keywords match case-insensitively, and trailing hyphens
//! are stripped from the label. A label ends at the end of its line; a
//! comment with more text on following lines is not a marker. Labels
//! themselves compare case-sensitively.

use std::sync::LazyLock;

use c5_core::{C5Error, FragmentRegistry};
use regex::Regex;

use crate::markup::{MarkupNode, NodeKind};

static MARKER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^C5\s+(Begin|End)\s+(.*)$").expect("marker pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Begin,
    End,
}

/// A recognized fragment marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub kind: MarkerKind,
    pub label: String,
}

/// Recognize a marker from comment text (without `<!--`/`-->`).
#[must_use]
pub fn parse_marker(comment: &str) -> Option<Marker> {
    let text = comment
        .trim_start_matches(|c: char| c == '-' || c.is_whitespace())
        .trim_end();
    let captures = MARKER_PATTERN.captures(text)?;

    let kind = if captures[1].eq_ignore_ascii_case("begin") {
        MarkerKind::Begin
    } else {
        MarkerKind::End
    };
    let label = captures[2].trim_end_matches(|c: char| c == '-' || c.is_whitespace());
    if label.is_empty() {
        return None;
    }

    Some(Marker {
        kind,
        label: label.to_string(),
    })
}

/// Record every begin/end marker under `root` into `registry`.
///
/// `source` is the text `root` was parsed from and `document` its logical
/// name. Returns the number of markers seen.
///
/// # Errors
/// Returns [`C5Error::UnmatchedEndMarker`] for an end-marker with no open
/// fragment and [`C5Error::DuplicateStartMarker`] when a label is opened twice.
pub fn find_fragment_markers<N: MarkupNode>(
    root: &N,
    source: &str,
    document: &str,
    registry: &mut FragmentRegistry,
) -> Result<usize, C5Error> {
    let mut seen = 0;
    collect_markers(root, source, document, registry, &mut seen)?;
    Ok(seen)
}

fn collect_markers<N: MarkupNode>(
    node: &N,
    source: &str,
    document: &str,
    registry: &mut FragmentRegistry,
    seen: &mut usize,
) -> Result<(), C5Error> {
    if node.node_kind() == NodeKind::Comment {
        if let Some(marker) = node.comment_data().as_deref().and_then(parse_marker) {
            let span = node.byte_range();
            match marker.kind {
                MarkerKind::Begin => registry.open(&marker.label, document, source, span)?,
                MarkerKind::End => registry.close(&marker.label, document, source, span)?,
            }
            *seen += 1;
        }
        return Ok(());
    }

    for child in &node.child_nodes() {
        collect_markers(child, source, document, registry, seen)?;
    }
    Ok(())
}
