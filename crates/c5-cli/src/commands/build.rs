use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use c5_build::{Diagnostic, MemorySink, OutputSink, ThemeBuild};
use serde::Serialize;

use crate::cli::{BuildArgs, GlobalFlags};
use crate::output::output;
use crate::walk::html_documents;

#[derive(Debug, Serialize)]
struct BuildResponse {
    input: String,
    out_dir: String,
    documents: usize,
    outputs: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

/// Handle `c5t build <input>`.
///
/// Successful outputs are written even when some documents fail; the
/// failures then turn into a non-zero exit.
pub fn handle(args: &BuildArgs, flags: &GlobalFlags, project_root: &Path) -> anyhow::Result<()> {
    let response = execute(args, project_root)?;
    if !flags.quiet {
        output(&response)?;
    }

    if !response.diagnostics.is_empty() {
        anyhow::bail!(
            "{} document(s) could not be transformed",
            response.diagnostics.len()
        );
    }
    Ok(())
}

fn execute(args: &BuildArgs, project_root: &Path) -> anyhow::Result<BuildResponse> {
    let mut config = super::load_config(project_root, args.config.as_deref())?;
    if args.skip_primary_page {
        config.skip_primary_page = true;
    }
    if args.delete_source_html {
        config.delete_source_html = true;
    }
    if let Some(page) = &args.default_page {
        config.default_page_name.clone_from(page);
    }

    let input = super::resolve(project_root, &args.input);
    let out_dir = super::resolve(project_root, &args.out_dir);
    anyhow::ensure!(
        input.is_dir(),
        "input directory '{}' does not exist",
        input.display()
    );

    let documents = html_documents(&input, &out_dir)?;
    tracing::debug!(count = documents.len(), input = %input.display(), "pages found");

    let mut build = ThemeBuild::new(config).context("invalid theme configuration")?;
    let mut sink = MemorySink::new();
    for document in &documents {
        let html = std::fs::read_to_string(&document.path)
            .with_context(|| format!("failed to read {}", document.path.display()))?;
        sink.register_output(&document.name, html.clone());
        build.document_ready(&document.name, &html, &mut sink);
        build.document_finalized(&document.name, &mut sink);
    }
    build.build_complete(&mut sink);

    let (outputs, diagnostics) = sink.into_parts();
    write_outputs(&out_dir, &outputs)?;

    Ok(BuildResponse {
        input: input.display().to_string(),
        out_dir: out_dir.display().to_string(),
        documents: documents.len(),
        outputs: outputs.into_keys().collect(),
        diagnostics,
    })
}

fn write_outputs(out_dir: &Path, outputs: &BTreeMap<String, String>) -> anyhow::Result<()> {
    for (name, content) in outputs {
        let path: PathBuf = out_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}
