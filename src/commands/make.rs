//! `incmake generate`, `build`, `run` and `clean`.

use crate::config::{ProjectConfig, load_config_from};
use crate::makefile::{self, GENERATED_HEADER, MAKEFILE};
use crate::project::{self, Analysis};
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

/// Load the config and analyse the project, printing any warnings.
pub fn load_and_analyze(dir: &Path) -> Result<(ProjectConfig, Analysis)> {
    let config = load_config_from(dir)?;
    let analysis = project::analyze(dir, &config)?;
    analysis.report();
    Ok((config, analysis))
}

pub fn generate(dir: &Path, to_stdout: bool) -> Result<()> {
    let (config, analysis) = load_and_analyze(dir)?;

    if to_stdout {
        print!("{}", makefile::generate(dir, &config, &analysis));
        return Ok(());
    }

    let path = makefile::write_makefile(dir, &config, &analysis)?;
    println!(
        "{} Wrote {} ({} sources)",
        "✓".green(),
        path.display(),
        analysis.order.len()
    );
    Ok(())
}

/// Regenerate the Makefile and run `make`. Returns the path of the binary.
pub fn build(dir: &Path) -> Result<PathBuf> {
    let start_time = Instant::now();
    let (config, analysis) = load_and_analyze(dir)?;
    makefile::write_makefile(dir, &config, &analysis)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""]),
    );
    pb.set_message(format!("Compiling {} sources...", analysis.order.len()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let output = Command::new("make")
        .arg("-f")
        .arg(MAKEFILE)
        .current_dir(dir)
        .output()
        .context("Failed to execute make - is it installed and on PATH?")?;

    if !output.status.success() {
        pb.finish_with_message(format!("{} Build failed", "x".red()));
        eprintln!("{}", String::from_utf8_lossy(&output.stdout));
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("make exited with {}", output.status);
    }

    pb.finish_and_clear();
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        println!("{} Compiler output:\n{}", "!".yellow(), stderr);
    }
    println!(
        "{} Build finished in {:.2?}",
        "✓".green(),
        start_time.elapsed()
    );

    Ok(dir.join(&config.build.build_dir).join(config.bin_name()))
}

pub fn build_and_run(dir: &Path, run_args: &[String]) -> Result<()> {
    let bin_path = build(dir)?;

    println!("{} Running...\n", "▶".green());
    let status = Command::new(&bin_path)
        .args(run_args)
        .current_dir(dir)
        .status()
        .with_context(|| format!("Failed to run {}", bin_path.display()))?;

    if !status.success() {
        anyhow::bail!("{} exited with {}", bin_path.display(), status);
    }
    Ok(())
}

/// Remove the build directory and the generated Makefile.
///
/// A `Makefile` that incmake did not write is left alone.
pub fn clean(dir: &Path) -> Result<()> {
    let config = load_config_from(dir)?;
    let mut cleaned = false;

    let build_path = dir.join(&config.build.build_dir);
    if build_path.exists() {
        fs::remove_dir_all(&build_path)
            .with_context(|| format!("Failed to remove {}", build_path.display()))?;
        cleaned = true;
    }

    let makefile_path = dir.join(MAKEFILE);
    if makefile_path.is_file() {
        let text = fs::read(&makefile_path)
            .with_context(|| format!("Failed to read {}", makefile_path.display()))?;
        if text.starts_with(GENERATED_HEADER.as_bytes()) {
            fs::remove_file(&makefile_path).context("Failed to remove Makefile")?;
            cleaned = true;
        } else {
            println!(
                "{} {} was not generated by incmake, leaving it in place",
                "!".yellow(),
                makefile_path.display()
            );
        }
    }

    if cleaned {
        println!("{} Clean complete.", "✓".green());
    } else {
        println!("{} Nothing to clean", "!".yellow());
    }
    Ok(())
}
