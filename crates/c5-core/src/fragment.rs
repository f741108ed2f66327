//! Fragments and the build-scoped fragment registry.
//!
//! A fragment is opened by a `C5 Begin <label>` comment and closed by a
//! matching `C5 End <label>` comment. Both markers may live in different
//! documents of the same build, so the registry outlives any single document
//! and is owned by the build orchestrator.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::errors::C5Error;

/// Directory fragment output paths are rooted in.
pub const FRAGMENT_DIR: &str = "elements";

/// Where a fragment was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentEnd {
    pub document: String,
    /// Start of the end-marker comment; the content stops here.
    pub content_end_offset: usize,
    /// End of the end-marker comment.
    pub end_marker_offset: usize,
}

/// A named span of markup delimited by begin/end comment markers.
///
/// Start offsets refer to `start_document`, end offsets to `end.document`.
/// A fragment is open until `end` is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub name: String,
    pub output_path: String,
    pub start_document: String,
    /// Start of the begin-marker comment.
    pub start_marker_offset: usize,
    /// End of the begin-marker comment; the content starts here.
    pub content_start_offset: usize,
    pub end: Option<FragmentEnd>,
    /// Every document that referenced this fragment during the build.
    pub source_documents: BTreeSet<String>,
    content: String,
}

impl Fragment {
    fn opened(label: &str, document: &str, source: &str, marker: Range<usize>) -> Self {
        // Until the end-marker shows up the content is everything after the
        // begin-marker; a cross-document close appends the closing prefix.
        let content = source.get(marker.end..).unwrap_or_default().to_string();
        Self {
            name: label.to_string(),
            output_path: Self::output_path_for(label),
            start_document: document.to_string(),
            start_marker_offset: marker.start,
            content_start_offset: marker.end,
            end: None,
            source_documents: BTreeSet::from([document.to_string()]),
            content,
        }
    }

    fn close(&mut self, document: &str, source: &str, marker: Range<usize>) {
        self.content = if document == self.start_document {
            source
                .get(self.content_start_offset..marker.start)
                .unwrap_or_default()
                .to_string()
        } else {
            let mut joined = std::mem::take(&mut self.content);
            joined.push_str(source.get(..marker.start).unwrap_or_default());
            joined
        };
        self.end = Some(FragmentEnd {
            document: document.to_string(),
            content_end_offset: marker.start,
            end_marker_offset: marker.end,
        });
        self.source_documents.insert(document.to_string());
    }

    /// Output path derived from a label: `elements/<label>` with whitespace
    /// replaced by underscores.
    #[must_use]
    pub fn output_path_for(label: &str) -> String {
        let stem: String = label
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        format!("{FRAGMENT_DIR}/{stem}")
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// The verbatim markup between the two markers.
    ///
    /// # Errors
    /// Returns [`C5Error::UnmatchedStartMarker`] while the fragment is open.
    pub fn content(&self) -> Result<&str, C5Error> {
        if self.is_open() {
            return Err(C5Error::UnmatchedStartMarker {
                label: self.name.clone(),
            });
        }
        Ok(&self.content)
    }

    /// Whether one of this fragment's markers (for its latest open/close
    /// cycle) lives in `document`.
    #[must_use]
    pub fn has_marker_in(&self, document: &str) -> bool {
        self.start_document == document
            || self.end.as_ref().is_some_and(|end| end.document == document)
    }

    /// Byte range of `document` that the include directive replaces.
    ///
    /// `None` while the fragment is open or when none of its markers live in
    /// `document`. A begin-marker without its end in the same document runs
    /// to the end of the text; an end-marker without its begin starts at 0.
    #[must_use]
    pub fn excision_span(&self, document: &str, source_len: usize) -> Option<Range<usize>> {
        let end = self.end.as_ref()?;
        match (self.start_document == document, end.document == document) {
            (true, true) => Some(self.start_marker_offset..end.end_marker_offset),
            (true, false) => Some(self.start_marker_offset..source_len),
            (false, true) => Some(0..end.end_marker_offset),
            (false, false) => None,
        }
    }
}

/// Build-scoped store of fragments, in the order they were opened.
#[derive(Debug, Clone, Default)]
pub struct FragmentRegistry {
    fragments: Vec<Fragment>,
}

impl FragmentRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a begin-marker.
    ///
    /// `marker` is the byte range of the comment in `source`.
    ///
    /// # Errors
    /// Returns [`C5Error::DuplicateStartMarker`] when `label` is already open.
    pub fn open(
        &mut self,
        label: &str,
        document: &str,
        source: &str,
        marker: Range<usize>,
    ) -> Result<(), C5Error> {
        if self.find_open(label).is_some() {
            return Err(C5Error::DuplicateStartMarker {
                label: label.to_string(),
            });
        }
        tracing::debug!(label, document, offset = marker.start, "fragment opened");
        self.fragments
            .push(Fragment::opened(label, document, source, marker));
        Ok(())
    }

    /// Record an end-marker, closing the open fragment with the same label.
    ///
    /// Earlier closed entries with that label are replaced; their source
    /// documents carry over to the new entry.
    ///
    /// # Errors
    /// Returns [`C5Error::UnmatchedEndMarker`] when no fragment with `label`
    /// is open.
    pub fn close(
        &mut self,
        label: &str,
        document: &str,
        source: &str,
        marker: Range<usize>,
    ) -> Result<(), C5Error> {
        if self.find_open(label).is_none() {
            return Err(C5Error::UnmatchedEndMarker {
                label: label.to_string(),
            });
        }

        let mut inherited = BTreeSet::new();
        self.fragments.retain(|f| {
            if f.name == label && !f.is_open() {
                inherited.extend(f.source_documents.iter().cloned());
                false
            } else {
                true
            }
        });

        let index = self.find_open(label).ok_or_else(|| C5Error::UnmatchedEndMarker {
            label: label.to_string(),
        })?;
        let fragment = &mut self.fragments[index];
        fragment.close(document, source, marker);
        fragment.source_documents.extend(inherited);
        tracing::debug!(label, document, "fragment closed");
        Ok(())
    }

    fn find_open(&self, label: &str) -> Option<usize> {
        self.fragments
            .iter()
            .position(|f| f.name == label && f.is_open())
    }

    /// Latest entry registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.fragments.iter().rev().find(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter()
    }

    /// Closed fragments referenced by `document`.
    pub fn closed_for<'a>(&'a self, document: &'a str) -> impl Iterator<Item = &'a Fragment> {
        self.fragments
            .iter()
            .filter(move |f| !f.is_open() && f.source_documents.contains(document))
    }

    pub fn open_fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter().filter(|f| f.is_open())
    }

    /// Whether `document` opened a fragment that is still waiting for its
    /// end-marker.
    #[must_use]
    pub fn has_open_from(&self, document: &str) -> bool {
        self.open_fragments().any(|f| f.start_document == document)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
    }
}
