//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - resolve: Resolve command arguments
//! - list: List command arguments
//! - fetch: Fetch command arguments
//! - cache: Cache command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod cache;
pub mod fetch;
pub mod list;
pub mod resolve;

pub use cache::{CacheArgs, CacheSubcommand};
pub use fetch::FetchArgs;
pub use list::ListArgs;
pub use resolve::ResolveArgs;

/// ivyfetch - dependency resolution against Ivy-style repositories
#[derive(Parser, Debug)]
#[command(
    name = "ivyfetch",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Resolve module dependencies from HTTP and file repositories",
    long_about = "ivyfetch resolves the dependencies declared by workspace modules against an \
                  ordered chain of HTTP and file repositories, settles revision conflicts and \
                  retrieves artifacts into a local cache.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  ivyfetch resolve                      \x1b[90m# Resolve every workspace module\x1b[0m\n   \
                  ivyfetch resolve app --json           \x1b[90m# Library roots of one module as JSON\x1b[0m\n   \
                  ivyfetch list https://repo/org.acme/  \x1b[90m# List a repository directory\x1b[0m\n   \
                  ivyfetch fetch file:///repo/a.jar a.jar \x1b[90m# Download one resource\x1b[0m\n   \
                  ivyfetch cache                        \x1b[90m# Show cache statistics\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Workspace directory (defaults to searching upward from the current directory)
    #[arg(long, short = 'w', global = true, env = "IVYFETCH_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve workspace modules and print their library roots
    Resolve(ResolveArgs),

    /// List the children of a repository directory
    List(ListArgs),

    /// Download one resource from a repository
    Fetch(FetchArgs),

    /// Manage the artifact cache
    #[command(name = "cache")]
    Cache(CacheArgs),

    /// Show version information
    #[command(hide = true)]
    Version,
}
