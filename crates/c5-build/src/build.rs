//! The build orchestrator.
//!
//! A [`ThemeBuild`] is driven by three lifecycle signals from the outside
//! build tool: [`ThemeBuild::document_ready`] per input document,
//! [`ThemeBuild::document_finalized`] once the tool is done with a document,
//! and [`ThemeBuild::build_complete`] when no documents remain.
//!
//! ```text
//! Idle ──document_ready──▶ Collecting ──build_complete──▶ Finalizing ──▶ Done
//!                              ▲                                          │
//!                              └──────────────document_ready──────────────┘
//! ```
//!
//! The fragment registry and the theme-emitted flag live here and are reset
//! whenever a new build starts.

use std::collections::BTreeMap;

use c5_codegen::{
    DEFAULT_PAGE_FILE, THEME_FILE_NAME, ThemeRenderer, fragment_file_name, page_file_name,
    with_preamble,
};
use c5_config::BuildConfig;
use c5_core::{C5Error, FragmentRegistry};
use c5_parser::{find_fragment_markers, parse_markup};

use crate::sink::OutputSink;
use crate::splice::{excise_fragments, substitute_regions};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BuildState {
    #[default]
    Idle,
    Collecting,
    Finalizing,
    Done,
}

/// What happened to one input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    /// The primary page, skipped by configuration.
    Skipped,
    Transformed,
    /// Left a fragment open; rendered as soon as a later document closes it,
    /// or when the build completes.
    Deferred,
    /// Reported to the sink and passed through untouched.
    Failed,
}

/// The document as handed back to the build tool.
///
/// Unchanged input unless `delete_source_html` renamed it to its generated
/// page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub name: String,
    pub html: String,
}

impl ProcessedDocument {
    fn passthrough(name: &str, html: &str) -> Self {
        Self {
            name: name.to_string(),
            html: html.to_string(),
        }
    }
}

#[derive(Debug)]
struct DocumentEntry {
    status: DocumentStatus,
    /// Source of a deferred document.
    source: Option<String>,
    finalized: bool,
}

impl DocumentEntry {
    const fn new(status: DocumentStatus) -> Self {
        Self {
            status,
            source: None,
            finalized: false,
        }
    }
}

/// Outputs of one document, flushed only if the whole document succeeds.
#[derive(Debug, Default)]
struct Staged {
    outputs: Vec<(String, String)>,
    /// Fragment file name and the raw content it was rendered from.
    fragments: Vec<(String, String)>,
    theme: bool,
    processed: Option<ProcessedDocument>,
}

/// Build-scoped orchestrator state.
#[derive(Debug)]
pub struct ThemeBuild {
    config: BuildConfig,
    theme: ThemeRenderer,
    state: BuildState,
    registry: FragmentRegistry,
    emitted: BTreeMap<String, String>,
    theme_emitted: bool,
    documents: BTreeMap<String, DocumentEntry>,
    deferred: Vec<String>,
}

impl ThemeBuild {
    /// # Errors
    /// Returns [`C5Error::InvalidHandle`] when the configured theme or package
    /// handle is invalid. Nothing has been processed at that point.
    pub fn new(config: BuildConfig) -> Result<Self, C5Error> {
        let theme = ThemeRenderer::new(config.theme_options())?;
        Ok(Self {
            config,
            theme,
            state: BuildState::Idle,
            registry: FragmentRegistry::new(),
            emitted: BTreeMap::new(),
            theme_emitted: false,
            documents: BTreeMap::new(),
            deferred: Vec::new(),
        })
    }

    #[must_use]
    pub const fn state(&self) -> BuildState {
        self.state
    }

    #[must_use]
    pub const fn config(&self) -> &BuildConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &FragmentRegistry {
        &self.registry
    }

    #[must_use]
    pub fn status(&self, document: &str) -> Option<DocumentStatus> {
        self.documents.get(document).map(|entry| entry.status)
    }

    /// Transform one document.
    ///
    /// Failures are reported to `sink` and leave the document as given.
    pub fn document_ready<S: OutputSink>(
        &mut self,
        name: &str,
        html: &str,
        sink: &mut S,
    ) -> ProcessedDocument {
        if matches!(self.state, BuildState::Idle | BuildState::Done) {
            self.reset();
            self.state = BuildState::Collecting;
            tracing::debug!("build started");
        }

        let passthrough = ProcessedDocument::passthrough(name, html);
        if self.config.is_skipped(name) {
            tracing::debug!(document = name, "primary page skipped");
            self.documents
                .insert(name.to_string(), DocumentEntry::new(DocumentStatus::Skipped));
            return passthrough;
        }

        let mut registry = self.registry.clone();
        let tree = parse_markup(html);
        if let Err(err) = find_fragment_markers(&tree.root(), html, name, &mut registry) {
            self.fail(name, &err, sink);
            return passthrough;
        }

        if registry.has_open_from(name) {
            tracing::debug!(document = name, "open fragment, deferring until it closes");
            self.registry = registry;
            self.documents.insert(
                name.to_string(),
                DocumentEntry {
                    source: Some(html.to_string()),
                    ..DocumentEntry::new(DocumentStatus::Deferred)
                },
            );
            self.deferred.push(name.to_string());
            self.render_resolved(sink);
            return passthrough;
        }

        match self.render(name, html, &registry) {
            Ok(staged) => {
                self.registry = registry;
                let processed = self.commit(name, staged, sink).unwrap_or(passthrough);
                self.render_resolved(sink);
                processed
            }
            Err(err) => {
                self.fail(name, &err, sink);
                passthrough
            }
        }
    }

    /// The build tool is done with `name`.
    ///
    /// Removes the HTML artifact of a skipped page, and of a transformed page
    /// when `delete_source_html` is set.
    pub fn document_finalized<S: OutputSink>(&mut self, name: &str, sink: &mut S) {
        let delete_html = self.config.delete_source_html;
        let Some(entry) = self.documents.get_mut(name) else {
            tracing::debug!(document = name, "finalized a document this build never saw");
            return;
        };
        entry.finalized = true;
        match entry.status {
            DocumentStatus::Skipped => sink.remove_output(name),
            DocumentStatus::Transformed if delete_html => sink.remove_output(name),
            DocumentStatus::Transformed | DocumentStatus::Deferred | DocumentStatus::Failed => {}
        }
    }

    /// No documents remain: render deferred documents, then discard the
    /// build-scoped state.
    pub fn build_complete<S: OutputSink>(&mut self, sink: &mut S) {
        if self.state != BuildState::Collecting {
            tracing::debug!(state = ?self.state, "no build in progress");
            return;
        }
        self.state = BuildState::Finalizing;

        for name in std::mem::take(&mut self.deferred) {
            self.render_deferred(&name, sink);
        }

        for fragment in self.registry.open_fragments() {
            tracing::warn!(
                label = %fragment.name,
                document = %fragment.start_document,
                "fragment never closed"
            );
        }

        self.state = BuildState::Done;
        tracing::debug!(documents = self.documents.len(), "build complete");
        self.clear();
    }

    /// Render the deferred documents whose fragments are all closed now.
    ///
    /// Runs right after the closing document commits, so a later
    /// re-registration of the same label cannot move the markers away.
    fn render_resolved<S: OutputSink>(&mut self, sink: &mut S) {
        let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.deferred)
            .into_iter()
            .partition(|name| !self.registry.has_open_from(name));
        self.deferred = waiting;
        for name in ready {
            self.render_deferred(&name, sink);
        }
    }

    fn render_deferred<S: OutputSink>(&mut self, name: &str, sink: &mut S) {
        let Some(source) = self
            .documents
            .get_mut(name)
            .and_then(|entry| entry.source.take())
        else {
            return;
        };

        match self.render(name, &source, &self.registry) {
            Ok(staged) => {
                tracing::debug!(document = name, "deferred document rendered");
                self.commit(name, staged, sink);
                let finalized = self.documents.get(name).is_some_and(|e| e.finalized);
                if finalized && self.config.delete_source_html {
                    sink.remove_output(name);
                }
            }
            Err(err) => self.fail(name, &err, sink),
        }
    }

    fn render(
        &self,
        name: &str,
        source: &str,
        registry: &FragmentRegistry,
    ) -> Result<Staged, C5Error> {
        let mut staged = Staged::default();

        if let Some(open) = registry.open_fragments().find(|f| f.has_marker_in(name)) {
            return Err(C5Error::UnmatchedStartMarker {
                label: open.name.clone(),
            });
        }

        for fragment in registry.closed_for(name) {
            let content = fragment.content()?;
            let file = fragment_file_name(fragment);
            if self.emitted.get(&file).is_some_and(|done| done == content) {
                continue;
            }
            let body = with_preamble(&substitute_regions(content)?);
            staged.fragments.push((file.clone(), content.to_string()));
            staged.outputs.push((file, body));
        }

        if !self.theme_emitted {
            staged
                .outputs
                .push((THEME_FILE_NAME.to_string(), self.theme.render()));
            staged.theme = true;
        }

        let excised = excise_fragments(source, name, registry.iter());
        let body = with_preamble(&substitute_regions(&excised)?);

        let is_default = self.config.is_default_page(name);
        if self.config.delete_source_html {
            let page = if is_default {
                DEFAULT_PAGE_FILE.to_string()
            } else {
                page_file_name(name)
            };
            staged.processed = Some(ProcessedDocument {
                name: page.clone(),
                html: body.clone(),
            });
            staged.outputs.push((page, body));
        } else {
            if is_default {
                staged
                    .outputs
                    .push((DEFAULT_PAGE_FILE.to_string(), body.clone()));
            }
            staged.outputs.push((page_file_name(name), body));
        }

        Ok(staged)
    }

    fn commit<S: OutputSink>(
        &mut self,
        name: &str,
        staged: Staged,
        sink: &mut S,
    ) -> Option<ProcessedDocument> {
        for (output, content) in staged.outputs {
            tracing::debug!(document = name, output = %output, "output registered");
            sink.register_output(&output, content);
        }
        self.emitted.extend(staged.fragments);
        self.theme_emitted |= staged.theme;

        self.documents
            .entry(name.to_string())
            .and_modify(|entry| entry.status = DocumentStatus::Transformed)
            .or_insert_with(|| DocumentEntry::new(DocumentStatus::Transformed));
        staged.processed
    }

    fn fail<S: OutputSink>(&mut self, name: &str, err: &C5Error, sink: &mut S) {
        tracing::warn!(document = name, error = %err, "document left untransformed");
        sink.report_error(name, err);
        self.documents
            .entry(name.to_string())
            .and_modify(|entry| entry.status = DocumentStatus::Failed)
            .or_insert_with(|| DocumentEntry::new(DocumentStatus::Failed));
    }

    fn reset(&mut self) {
        self.clear();
        self.state = BuildState::Idle;
    }

    fn clear(&mut self) {
        self.registry.clear();
        self.emitted.clear();
        self.theme_emitted = false;
        self.documents.clear();
        self.deferred.clear();
    }
}
