//! Resolve command implementation
//!
//! Resolves one module (or every module) of the workspace and prints the
//! library roots of each resolved dependency.

use std::path::PathBuf;
use std::sync::Arc;

use console::{Style, Term};
use serde::Serialize;

use crate::cli::ResolveArgs;
use crate::domain::{LibraryRoot, ResolvedDependency};
use crate::error::Result;
use crate::logging::{MessageLogger, TracingLogger};
use crate::progress::ProgressObserver;
use crate::session::{InlineExecutor, Resolver, ThreadExecutor};
use crate::workspace::ModuleModel;

use super::helpers::workspace_root;

/// Resolution outcome of one module, as printed with `--json`
#[derive(Debug, Serialize)]
struct ModuleReport {
    module: String,
    dependencies: Vec<DependencyReport>,
}

#[derive(Debug, Serialize)]
struct DependencyReport {
    organisation: String,
    name: String,
    revision: String,
    conf: String,
    roots: Vec<LibraryRoot>,
}

impl From<&ResolvedDependency> for DependencyReport {
    fn from(resolved: &ResolvedDependency) -> Self {
        Self {
            organisation: resolved.revision.organisation().to_string(),
            name: resolved.revision.name().to_string(),
            revision: resolved.revision.revision.clone(),
            conf: resolved.declaration.conf.clone(),
            roots: resolved.library_roots(),
        }
    }
}

/// Run resolve command
pub fn run(workspace: Option<PathBuf>, args: ResolveArgs) -> Result<()> {
    let root = workspace_root(workspace)?;
    let model = Arc::new(ModuleModel::open(&root)?);

    let mut resolver = Resolver::new(Arc::clone(&model));
    if Term::stderr().is_term() {
        resolver = resolver.with_observer(Arc::new(ProgressObserver::new()));
    }

    let modules = match args.module {
        Some(name) => vec![name],
        None => model.read().module_names(),
    };

    let logger: Arc<dyn MessageLogger> = Arc::new(TracingLogger);
    let background = ThreadExecutor::default();
    let mut reports = Vec::with_capacity(modules.len());
    for module in modules {
        let task = if args.foreground {
            resolver.submit(&module, Arc::clone(&logger), &InlineExecutor)?
        } else {
            resolver.schedule(&module, Arc::clone(&logger), &background)?
        };
        let resolved = task.wait()?;
        reports.push(ModuleReport {
            module,
            dependencies: resolved.iter().map(DependencyReport::from).collect(),
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_reports(&reports);
    }
    Ok(())
}

fn print_reports(reports: &[ModuleReport]) {
    if reports.is_empty() {
        println!("No modules in workspace.");
        return;
    }

    let module_style = Style::new().bold().yellow();
    let coordinate_style = Style::new().bold();
    let dim = Style::new().dim();

    for report in reports {
        println!(
            "{} ({} dependenc{})",
            module_style.apply_to(&report.module),
            report.dependencies.len(),
            if report.dependencies.len() == 1 { "y" } else { "ies" }
        );
        for dependency in &report.dependencies {
            println!(
                "  {}#{};{} {}",
                coordinate_style.apply_to(&dependency.organisation),
                coordinate_style.apply_to(&dependency.name),
                dependency.revision,
                dim.apply_to(format!("[{}]", dependency.conf))
            );
            for root in &dependency.roots {
                println!("    {:<8} {}", root.root_type.to_string(), root.path.display());
            }
        }
        println!();
    }
}
