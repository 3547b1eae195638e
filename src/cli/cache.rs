use clap::{Parser, Subcommand};

/// Arguments for cache command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show cache statistics:\n    ivyfetch cache\n\n\
                  List cached modules:\n    ivyfetch cache list\n\n\
                  Clear the whole cache:\n    ivyfetch cache clear\n\n\
                  Remove one module:\n    ivyfetch cache clear --only org.acme#core")]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: Option<CacheSubcommand>,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheSubcommand {
    /// List cached modules
    List,

    /// Clear cached modules
    Clear(ClearCacheArgs),
}

/// Arguments for cache clear command
#[derive(Parser, Debug)]
pub struct ClearCacheArgs {
    /// Remove only one module, given as organisation#name
    #[arg(long)]
    pub only: Option<String>,
}
