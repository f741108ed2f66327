use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::GlobalFlags;
pub use root_commands::{BuildArgs, Commands, ThemeArgs};

/// Top-level CLI parser for the `c5t` binary.
#[derive(Debug, Parser)]
#[command(
    name = "c5t",
    version,
    about = "c5t - compile annotated HTML into a concrete5 theme"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root path (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            quiet: self.quiet,
            verbose: self.verbose,
            project: self.project.clone(),
        }
    }
}
