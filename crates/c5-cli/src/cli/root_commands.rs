use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Compile a directory of HTML pages into a theme.
    Build(BuildArgs),
    /// Print the generated page_theme.php.
    Theme(ThemeArgs),
}

/// Arguments for `c5t build`.
#[derive(Clone, Debug, Args)]
pub struct BuildArgs {
    /// Directory holding the HTML pages
    pub input: String,

    /// Directory the theme is written to
    #[arg(short, long = "out-dir", default_value = "dist")]
    pub out_dir: String,

    /// Config file to use instead of <project>/c5t.toml
    #[arg(long)]
    pub config: Option<String>,

    /// Produce no output for the default page
    #[arg(long)]
    pub skip_primary_page: bool,

    /// Keep only the generated PHP, not the source HTML
    #[arg(long)]
    pub delete_source_html: bool,

    /// Page that is also emitted as default.php
    #[arg(long)]
    pub default_page: Option<String>,
}

/// Arguments for `c5t theme`.
#[derive(Clone, Debug, Args)]
pub struct ThemeArgs {
    /// Config file to use instead of <project>/c5t.toml
    #[arg(long)]
    pub config: Option<String>,
}
