use std::path::Path;

use anyhow::Context;

use crate::cli::ThemeArgs;

/// Handle `c5t theme`.
pub fn handle(args: &ThemeArgs, project_root: &Path) -> anyhow::Result<()> {
    let config = super::load_config(project_root, args.config.as_deref())?;
    let source =
        c5_codegen::render(&config.theme_options()).context("invalid theme configuration")?;
    print!("{source}");
    Ok(())
}
