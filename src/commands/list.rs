//! List command implementation
//!
//! Prints the direct children of one repository directory, one location per
//! line.

use console::Style;

use crate::cli::ListArgs;
use crate::error::{Result, repository};
use crate::repository::Repository;

/// Run list command
pub fn run(args: ListArgs) -> Result<()> {
    let repo = Repository::open("cli", args.location.as_str())?;
    let children = repo
        .list(&args.location)?
        .ok_or_else(|| repository::unsupported("list", repo.kind()))?;

    if children.is_empty() {
        println!("No entries under {}", args.location);
        return Ok(());
    }

    let directory = Style::new().bold().cyan();
    for child in &children {
        if child.ends_with('/') {
            println!("{}", directory.apply_to(child));
        } else {
            println!("{child}");
        }
    }

    Ok(())
}
