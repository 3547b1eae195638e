//! Fetch command implementation

use crate::cli::FetchArgs;
use crate::error::Result;
use crate::progress::ProgressObserver;
use crate::repository::{NoopObserver, Repository, TransferObserver};

/// Run fetch command
pub fn run(args: FetchArgs) -> Result<()> {
    let repository = Repository::open("cli", args.location.as_str())?;

    let progress = ProgressObserver::new();
    let observer: &dyn TransferObserver = if args.quiet { &NoopObserver } else { &progress };

    let resource = repository.get(&args.location, &args.destination, observer)?;
    let size = resource
        .content_length()
        .map(|len| format!(" ({len} bytes)"))
        .unwrap_or_default();
    println!(
        "Fetched {} -> {}{size}",
        resource.location(),
        args.destination.display()
    );

    Ok(())
}
