use clap::Parser;
use std::path::PathBuf;

/// Arguments for the fetch command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Download an artifact:\n    ivyfetch fetch https://repo.example.org/ivy/org.acme/core/1.0/core-1.0.jar core.jar")]
pub struct FetchArgs {
    /// Resource location (http://, https:// or file:)
    pub location: String,

    /// Local destination file
    pub destination: PathBuf,

    /// Do not show a progress bar
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
