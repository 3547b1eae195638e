//! ivyfetch - dependency resolution and artifact retrieval
//!
//! Resolves the dependencies declared by workspace modules against an ordered
//! chain of HTTP and filesystem repositories, settles revision conflicts and
//! retrieves primary and auxiliary artifacts into a local cache.

use clap::Parser;

mod cache;
mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod logging;
mod path_utils;
mod progress;
mod repository;
mod resolver;
mod session;
#[cfg(test)]
mod test_fixtures;
mod workspace;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Resolve(args) => commands::resolve::run(cli.workspace, args),
        Commands::List(args) => commands::list::run(args),
        Commands::Fetch(args) => commands::fetch::run(args),
        Commands::Cache(args) => commands::cache::run(cli.workspace, args),
        Commands::Version => commands::version::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
