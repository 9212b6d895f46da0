//! One discovery pass over a project: find sources, build the include graph,
//! order it.

use crate::config::ProjectConfig;
use crate::graph::{self, DependencyGraph};
use crate::order::{self, BuildOrder};
use crate::scan::ScanWarning;
use anyhow::Result;
use colored::*;
use std::path::Path;

#[derive(Debug)]
pub struct Analysis {
    pub graph: DependencyGraph,
    pub order: BuildOrder,
    pub warnings: Vec<ScanWarning>,
}

impl Analysis {
    /// `true` when any ordered source is C++ by extension.
    pub fn has_cpp(&self) -> bool {
        self.order.files().iter().any(|f| is_cpp_source(f))
    }

    /// Print scan warnings and cycle diagnostics to stderr.
    pub fn report(&self) {
        for warning in &self.warnings {
            let effect = match warning {
                ScanWarning::Unlisted(..) => "sources under it were skipped",
                _ => "treated as having no includes",
            };
            eprintln!("   {} {} ({})", "⚠".yellow(), warning, effect);
        }
        for (from, to) in self.order.back_edges() {
            eprintln!(
                "   {} Include cycle: {} -> {} (build order is only partially valid)",
                "⚠".yellow(),
                from,
                to.bold()
            );
        }
    }
}

/// Analyse the project rooted at `project_dir`.
///
/// Unreadable files only produce warnings. Finding no sources at all is an
/// error and nothing is built.
pub fn analyze(project_dir: &Path, config: &ProjectConfig) -> Result<Analysis> {
    let src_root = config.src_root(project_dir);
    let (files, mut warnings) = graph::discover_sources(&src_root, &config.build.extensions)?;
    if files.is_empty() {
        anyhow::bail!(
            "No source files found in {} (looked for .{})",
            src_root.display(),
            config.build.extensions.join(", .")
        );
    }

    let (graph, scan_warnings) = graph::build_graph(&src_root, &files);
    warnings.extend(scan_warnings);
    let order = order::build_order(&graph);

    Ok(Analysis {
        graph,
        order,
        warnings,
    })
}

pub fn is_cpp_source(file: &str) -> bool {
    Path::new(file)
        .extension()
        .map(|ext| {
            let s = ext.to_string_lossy();
            ["cpp", "cc", "cxx", "c++", "C"].contains(&s.as_ref())
        })
        .unwrap_or(false)
}
