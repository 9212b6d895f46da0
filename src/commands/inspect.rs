//! `incmake order` and `incmake graph`.

use super::make::load_and_analyze;
use crate::ui::Table;
use anyhow::Result;
use colored::*;
use std::path::Path;

pub fn print_order(dir: &Path) -> Result<()> {
    let (config, analysis) = load_and_analyze(dir)?;

    println!(
        "{} Build order for {} ({} sources)",
        "📦".blue(),
        config.package.name.bold().cyan(),
        analysis.order.len()
    );

    let mut table = Table::new(&["#", "File", "Includes"]);
    for (i, file) in analysis.order.files().iter().enumerate() {
        let includes = analysis.graph.dependencies(file).unwrap_or_default();
        let shown = if includes.is_empty() {
            "-".dimmed().to_string()
        } else {
            includes
                .iter()
                .map(|inc| {
                    if analysis.graph.contains(inc) {
                        inc.green().to_string()
                    } else {
                        inc.dimmed().to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![(i + 1).to_string(), file.bold().to_string(), shown]);
    }
    table.print();

    if !analysis.order.is_complete() {
        println!(
            "{} Order ignores {} include edge(s) that form a cycle.",
            "!".yellow(),
            analysis.order.back_edges().len()
        );
    }
    Ok(())
}

pub fn print_graph(dir: &Path, json: bool) -> Result<()> {
    let (config, analysis) = load_and_analyze(dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis.graph.entries())?);
        return Ok(());
    }

    println!("{}", config.package.name.bold().cyan());
    let count = analysis.graph.len();
    for (i, (file, includes)) in analysis.graph.iter().enumerate() {
        let last_file = i + 1 == count;
        let (branch, indent) = if last_file {
            ("└──", "    ")
        } else {
            ("├──", "│   ")
        };
        println!("{} {}", branch, file.bold());

        for (j, token) in includes.iter().enumerate() {
            let prefix = if j + 1 == includes.len() { "└──" } else { "├──" };
            let label = if analysis.graph.contains(token) {
                token.green().to_string()
            } else {
                format!("{} {}", token, "(not a source)".dimmed())
            };
            println!("{}{} {}", indent, prefix, label);
        }
    }
    Ok(())
}
