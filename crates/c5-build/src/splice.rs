//! Offset-based splicing against one immutable source text.
//!
//! All offsets come from a parse of the exact `source` passed in. Nothing is
//! ever spliced into an already-spliced string.

use std::ops::Range;

use c5_codegen::{include_directive, region_code};
use c5_core::{C5Error, Fragment, Region};
use c5_parser::parse_regions;

/// Replace every `<c5-area>` element in `source` with its area code.
///
/// Text without regions comes back unchanged.
///
/// # Errors
/// Returns [`C5Error::InvalidRegion`] for a region without a name.
pub fn substitute_regions(source: &str) -> Result<String, C5Error> {
    let regions = parse_regions(source)?;
    Ok(splice_regions(source, &regions))
}

/// Splice area code over `regions`, which must be in document order and
/// parsed from `source`.
#[must_use]
pub fn splice_regions(source: &str, regions: &[Region]) -> String {
    let replacements: Vec<_> = regions
        .iter()
        .map(|region| (region.span(), region_code(region)))
        .collect();
    splice(source, &replacements)
}

/// Replace each fragment's markers (and everything between them) in
/// `document` with an include directive.
///
/// Fragments are taken in the order given. A span that overlaps an earlier
/// one is left alone.
#[must_use]
pub fn excise_fragments<'a>(
    source: &str,
    document: &str,
    fragments: impl IntoIterator<Item = &'a Fragment>,
) -> String {
    let mut replacements: Vec<(Range<usize>, String)> = fragments
        .into_iter()
        .filter_map(|fragment| {
            let span = fragment.excision_span(document, source.len())?;
            Some((span, include_directive(fragment)))
        })
        .collect();
    replacements.sort_by_key(|(span, _)| span.start);

    let mut kept: Vec<(Range<usize>, String)> = Vec::with_capacity(replacements.len());
    for (span, directive) in replacements {
        if kept.last().is_some_and(|(prev, _)| span.start < prev.end) {
            tracing::warn!(
                document,
                start = span.start,
                end = span.end,
                "overlapping fragment skipped"
            );
            continue;
        }
        kept.push((span, directive));
    }

    splice(source, &kept)
}

fn splice(source: &str, replacements: &[(Range<usize>, String)]) -> String {
    if replacements.is_empty() {
        return source.to_string();
    }

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for (span, text) in replacements {
        out.push_str(source.get(cursor..span.start).unwrap_or_default());
        out.push_str(text);
        cursor = span.end.max(cursor);
    }
    out.push_str(source.get(cursor..).unwrap_or_default());
    out
}
