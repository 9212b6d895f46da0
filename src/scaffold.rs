//! Project scaffolding for `incmake new` and `incmake init`.
//!
//! Layout of a fresh project:
//!
//! ```text
//! <name>/
//! ├── incmake.toml
//! ├── .gitignore
//! ├── include/<name>.h
//! └── src/
//!     ├── main.c | main.cpp
//!     └── greeting.c | greeting.cpp
//! ```

use crate::config::{CONFIG_FILE, Lang, ProjectConfig};
use crate::makefile::MAKEFILE;
use crate::templates;
use anyhow::{Context, Result};
use colored::*;
use git2::Repository;
use std::fs;
use std::path::{Path, PathBuf};

/// Create `<parent>/<name>` with sources, config and optionally a git repository.
pub fn create_project(parent: &Path, name: &str, lang: Lang, init_git: bool) -> Result<PathBuf> {
    if name.trim().is_empty() {
        anyhow::bail!("Project name cannot be empty");
    }
    let path = parent.join(name);
    if path.exists() {
        anyhow::bail!("Directory '{}' already exists", path.display());
    }

    // Use only the final component as project name
    let project_name = Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string());

    fs::create_dir_all(&path).context("Failed to create project directory")?;
    let config = ProjectConfig::new(&project_name, lang);
    write_layout(&path, &config)?;
    fs::write(path.join(".gitignore"), gitignore(&config))?;

    if init_git && let Err(e) = Repository::init(&path) {
        eprintln!(
            "   {} Could not initialize git repository: {}",
            "⚠".yellow(),
            e.message()
        );
    }

    Ok(path)
}

/// Write `incmake.toml` into an existing directory, adding the starter
/// sources only if the source directory does not exist yet.
pub fn init_project(dir: &Path, lang: Lang) -> Result<ProjectConfig> {
    if dir.join(CONFIG_FILE).exists() {
        anyhow::bail!("Project already initialized ({} exists)", CONFIG_FILE);
    }

    let name = dir
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "app".to_string());
    let config = ProjectConfig::new(&name, lang);

    if dir.join(&config.build.src_dir).exists() {
        println!(
            "{} '{}' directory exists, skipping starter sources.",
            "!".yellow(),
            config.build.src_dir
        );
        fs::write(dir.join(CONFIG_FILE), config.to_toml()?)
            .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;
    } else {
        write_layout(dir, &config)?;
    }

    if !dir.join(".gitignore").exists() {
        fs::write(dir.join(".gitignore"), gitignore(&config))?;
    }

    Ok(config)
}

fn write_layout(dir: &Path, config: &ProjectConfig) -> Result<()> {
    let lang = config.package.lang;
    let src = dir.join(&config.build.src_dir);
    let include = dir.join(&config.build.include_dir);
    fs::create_dir_all(&src).context("Failed to create src")?;
    fs::create_dir_all(&include).context("Failed to create include")?;

    let template = templates::get_template(&config.package.name, lang);
    let ext = lang.source_extension();
    fs::write(src.join(format!("main.{}", ext)), &template.main)?;
    fs::write(src.join(format!("greeting.{}", ext)), &template.helper)?;
    fs::write(include.join(&template.header_name), &template.header)?;
    fs::write(dir.join(CONFIG_FILE), config.to_toml()?)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE))?;
    Ok(())
}

fn gitignore(config: &ProjectConfig) -> String {
    format!("{}/\n{}\n", config.build.build_dir, MAKEFILE)
}
