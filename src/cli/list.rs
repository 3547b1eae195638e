use clap::Parser;

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List revisions of a module over HTTP:\n    ivyfetch list https://repo.example.org/ivy/org.acme/core/\n\n\
                  List a local repository directory:\n    ivyfetch list file:///opt/repo/org.acme/")]
pub struct ListArgs {
    /// Directory location (http://, https:// or file:)
    pub location: String,
}
