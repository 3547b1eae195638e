use clap::Parser;

/// Arguments for the resolve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Resolve every module of the workspace:\n    ivyfetch resolve\n\n\
                  Resolve one module:\n    ivyfetch resolve app\n\n\
                  Print library roots as JSON:\n    ivyfetch resolve app --json\n\n\
                  Resolve on the current thread regardless of settings:\n    ivyfetch resolve --foreground")]
pub struct ResolveArgs {
    /// Module to resolve (all modules when omitted)
    pub module: Option<String>,

    /// Print library roots as JSON
    #[arg(long)]
    pub json: bool,

    /// Ignore resolve_in_background and resolve on the current thread
    #[arg(long)]
    pub foreground: bool,
}
