//! Makefile generation.
//!
//! The emitted Makefile compiles every discovered translation unit into
//! `$(OBJ_DIR)` in build order and links the objects into `$(TARGET)`.

use crate::config::ProjectConfig;
use crate::project::{self, Analysis};
use crate::toolchain::{self, Compilers};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const MAKEFILE: &str = "Makefile";

/// First line prefix of every Makefile incmake writes.
pub const GENERATED_HEADER: &str = "# Generated by incmake";

/// Per-source extra prerequisites (headers that exist on disk), keyed by source identity.
pub type HeaderDeps = HashMap<String, Vec<String>>;

/// Resolve include tokens of every graph file against the file's own
/// directory, then the include directory. Tokens that resolve to nothing are
/// left out.
pub fn header_prerequisites(
    project_dir: &Path,
    config: &ProjectConfig,
    analysis: &Analysis,
) -> HeaderDeps {
    let src_dir = Path::new(&config.build.src_dir);
    let include_dir = Path::new(&config.build.include_dir);
    let mut deps = HeaderDeps::new();

    for (file, tokens) in analysis.graph.iter() {
        let file_dir = src_dir
            .join(file)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| src_dir.to_path_buf());

        let mut found: Vec<String> = Vec::new();
        for token in tokens {
            let resolved = [file_dir.join(token), include_dir.join(token)]
                .into_iter()
                .map(|p| crate::graph::normalize_path(&p))
                .find(|p| project_dir.join(p).is_file());
            if let Some(path) = resolved {
                let path = make_path(&path);
                if !found.contains(&path) {
                    found.push(path);
                }
            }
        }
        deps.insert(file.to_string(), found);
    }
    deps
}

/// Render the Makefile text.
pub fn render_makefile(
    config: &ProjectConfig,
    compilers: &Compilers,
    analysis: &Analysis,
    header_deps: &HeaderDeps,
) -> String {
    let build = &config.build;
    let src_dir = build.src_dir.trim_end_matches('/');
    let mut out = String::new();

    let c_flags = compile_flags(build.c_std.as_deref(), &build.flags);
    let cxx_flags = compile_flags(build.cxx_std.as_deref(), &build.flags);
    let libs: Vec<String> = build.libs.iter().map(|l| format!("-l{}", l)).collect();
    let linker = if analysis.has_cpp() { "$(CXX)" } else { "$(CC)" };

    let _ = writeln!(
        out,
        "{} for {}. Do not edit by hand;",
        GENERATED_HEADER, config.package.name
    );
    let _ = writeln!(out, "# rerun `incmake generate` after adding or moving sources.");
    out.push('\n');
    let _ = writeln!(out, "CC := {}", compilers.cc);
    let _ = writeln!(out, "CXX := {}", compilers.cxx);
    let _ = writeln!(out, "CFLAGS := {}", c_flags);
    let _ = writeln!(out, "CXXFLAGS := {}", cxx_flags);
    let _ = writeln!(out, "CPPFLAGS := -I{}", build.include_dir);
    let _ = writeln!(out, "LDFLAGS := {}", build.ldflags.join(" "));
    let _ = writeln!(out, "LDLIBS := {}", libs.join(" "));
    out.push('\n');
    let _ = writeln!(out, "BUILD_DIR := {}", build.build_dir);
    let _ = writeln!(out, "OBJ_DIR := $(BUILD_DIR)/obj");
    let _ = writeln!(out, "TARGET := $(BUILD_DIR)/{}", config.bin_name());
    out.push('\n');

    out.push_str("OBJS :=");
    for file in analysis.order.files() {
        let _ = write!(out, " \\\n\t{}", object_path(file));
    }
    out.push_str("\n\n");

    out.push_str(".PHONY: all run clean\n\n");
    out.push_str("all: $(TARGET)\n\n");
    let _ = writeln!(out, "$(TARGET): $(OBJS)");
    out.push_str("\t@mkdir -p $(dir $@)\n");
    let _ = writeln!(out, "\t{} $(LDFLAGS) $(OBJS) -o $@ $(LDLIBS)", linker);
    out.push('\n');

    for file in analysis.order.files() {
        let mut prereqs = vec![format!("{}/{}", src_dir, file)];
        if let Some(headers) = header_deps.get(file) {
            prereqs.extend(headers.iter().cloned());
        }
        let recipe = if project::is_cpp_source(file) {
            "$(CXX) $(CPPFLAGS) $(CXXFLAGS)"
        } else {
            "$(CC) $(CPPFLAGS) $(CFLAGS)"
        };
        let _ = writeln!(out, "{}: {}", object_path(file), prereqs.join(" "));
        out.push_str("\t@mkdir -p $(dir $@)\n");
        let _ = writeln!(out, "\t{} -c $< -o $@", recipe);
        out.push('\n');
    }

    out.push_str("run: $(TARGET)\n");
    out.push_str("\t./$(TARGET)\n\n");
    out.push_str("clean:\n");
    out.push_str("\trm -rf $(BUILD_DIR)\n");

    out
}

/// Generate and write `<project_dir>/Makefile`, returning its path.
pub fn write_makefile(
    project_dir: &Path,
    config: &ProjectConfig,
    analysis: &Analysis,
) -> Result<PathBuf> {
    let text = generate(project_dir, config, analysis);
    let path = project_dir.join(MAKEFILE);
    fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Makefile text for the project, with compilers picked from the environment.
pub fn generate(project_dir: &Path, config: &ProjectConfig, analysis: &Analysis) -> String {
    let compilers = toolchain::select_compilers(config);
    let header_deps = header_prerequisites(project_dir, config, analysis);
    render_makefile(config, &compilers, analysis, &header_deps)
}

fn compile_flags(std: Option<&str>, flags: &[String]) -> String {
    std.map(toolchain::std_flag)
        .into_iter()
        .chain(flags.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `$(OBJ_DIR)/<file>.o`
///
/// The source extension stays in the name so `util.c` and `util.cpp` get
/// distinct objects.
pub fn object_path(file: &str) -> String {
    format!("$(OBJ_DIR)/{}.o", file)
}

fn make_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
