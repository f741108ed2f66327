pub mod build;
pub mod theme;

use std::path::{Path, PathBuf};

use anyhow::Context;
use c5_config::BuildConfig;

/// Load the layered config for `project_root`, honoring `--config`.
fn load_config(project_root: &Path, config: Option<&str>) -> anyhow::Result<BuildConfig> {
    let explicit = config.map(|path| resolve(project_root, path));
    BuildConfig::load_with_dotenv(project_root, explicit.as_deref())
        .context("failed to load c5t configuration")
}

/// `path` relative to the project root unless it is absolute.
fn resolve(project_root: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
