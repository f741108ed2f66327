//! Input discovery for `c5t build`.
//!
//! Uses the `ignore` crate, so `.gitignore`d pages are left out.

use std::path::{Path, PathBuf};

use anyhow::Context;
use ignore::WalkBuilder;

/// One HTML page found under the input directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    /// Path relative to the input directory, `/`-separated.
    pub name: String,
    pub path: PathBuf,
}

/// Every `*.html` file under `root`, sorted by relative name.
///
/// Anything below `exclude` (the output directory) is skipped.
pub fn html_documents(root: &Path, exclude: &Path) -> anyhow::Result<Vec<HtmlDocument>> {
    let exclude = exclude.to_path_buf();
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .require_git(false)
        .filter_entry(move |entry| !entry.path().starts_with(&exclude))
        .build();

    let mut documents = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) || !is_html(entry.path()) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        documents.push(HtmlDocument {
            name,
            path: path.to_path_buf(),
        });
    }

    documents.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(documents)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}
