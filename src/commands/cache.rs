//! Cache command implementation

use std::path::{Path, PathBuf};

use crate::cache;
use crate::cli::{CacheArgs, CacheSubcommand};
use crate::error::Result;

use super::helpers::cache_root;

pub fn run(workspace: Option<PathBuf>, args: CacheArgs) -> Result<()> {
    let root = cache_root(workspace)?;

    match args.command {
        Some(CacheSubcommand::List) => list_cached_modules(&root),
        Some(CacheSubcommand::Clear(clear_args)) => match clear_args.only {
            Some(coordinate) => clean_specific_module(&root, &coordinate),
            None => clean_all_cache(&root),
        },
        None => show_cache_stats(&root),
    }
}

fn print_stats(root: &Path) -> Result<cache::stats::CacheStats> {
    let stats = cache::cache_stats(root)?;

    println!("Cache Statistics:");
    println!("  Location: {}", root.display());
    println!("  Modules: {}", stats.modules);
    println!("  Revisions: {}", stats.revisions);
    println!("  Files: {}", stats.files);
    println!("  Size: {}", stats.formatted_size());

    Ok(stats)
}

fn show_cache_stats(root: &Path) -> Result<()> {
    let stats = print_stats(root)?;

    if stats.modules == 0 {
        println!("\nCache is empty.");
    } else {
        println!("\nRun 'ivyfetch cache list' to list cached modules.");
        println!("Run 'ivyfetch cache clear' to remove everything from cache.");
        println!("Run 'ivyfetch cache clear --only <org#name>' to remove one module.");
    }

    Ok(())
}

fn list_cached_modules(root: &Path) -> Result<()> {
    print_stats(root)?;
    println!();

    let modules = cache::list_cached_modules(root)?;
    if modules.is_empty() {
        println!("No cached modules.");
        return Ok(());
    }

    println!("Cached modules ({}):", modules.len());
    for module in &modules {
        println!(
            "  {} ({} revision{}, {})",
            module.name,
            module.revisions.len(),
            if module.revisions.len() == 1 { "" } else { "s" },
            module.formatted_size()
        );
        println!("    Revisions: {}", module.revisions.join(", "));
    }

    Ok(())
}

fn clean_all_cache(root: &Path) -> Result<()> {
    cache::clear_cache(root)?;
    println!("Cache cleared successfully.");
    Ok(())
}

fn clean_specific_module(root: &Path, coordinate: &str) -> Result<()> {
    cache::remove_cached_module(root, coordinate)?;
    println!("Removed cached module: {coordinate}");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use crate::test_fixtures::{create_temp_dir, create_test_files};

    #[test]
    fn test_show_cache_stats_empty() {
        let temp = create_temp_dir();
        assert!(show_cache_stats(temp.path()).is_ok());
    }

    #[test]
    fn test_clean_cache_all() {
        let temp = create_temp_dir();
        create_test_files(&temp, &[("cache/o/a/1/a-1.jar", "jar")]);
        let root = temp.path().join("cache");

        clean_all_cache(&root).expect("clear");
        assert!(!root.exists());
    }

    #[test]
    fn test_clean_specific_module_not_found() {
        let temp = create_temp_dir();
        let result = clean_specific_module(temp.path(), "org.acme#ghost");
        assert!(
            result
                .expect_err("missing module")
                .to_string()
                .contains("not found in cache")
        );
    }

    #[test]
    fn test_list_cached_modules() {
        let temp = create_temp_dir();
        create_test_files(&temp, &[("o/a/1/a-1.jar", "jar"), ("o/a/2/a-2.jar", "jar")]);
        assert!(list_cached_modules(temp.path()).is_ok());
    }
}
