//! Source discovery and the include dependency graph.
//!
//! The graph maps each discovered source file (identified by its path relative
//! to the source root, `/`-separated) to the include tokens it references.
//! Tokens are stored exactly as written. Nothing maps a token back onto a
//! discovered file, so edges may point outside the node set.

use crate::scan::{self, ScanWarning};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Translation unit extensions picked up when the config does not say otherwise.
pub const DEFAULT_EXTENSIONS: &[&str] = &["c", "cpp"];

#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

/// One node of the graph as it appears in `incmake graph --json`.
#[derive(Debug, Serialize)]
pub struct GraphEntry<'a> {
    pub file: &'a str,
    pub includes: &'a [String],
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `file` with its include tokens.
    ///
    /// Re-inserting an existing file replaces its tokens but keeps its
    /// original position.
    pub fn insert(&mut self, file: impl Into<String>, includes: Vec<String>) {
        let file = file.into();
        match self.index.get(&file) {
            Some(&i) => self.entries[i].1 = includes,
            None => {
                self.index.insert(file.clone(), self.entries.len());
                self.entries.push((file, includes));
            }
        }
    }

    pub fn contains(&self, file: &str) -> bool {
        self.index.contains_key(file)
    }

    pub fn dependencies(&self, file: &str) -> Option<&[String]> {
        self.index
            .get(file)
            .map(|&i| self.entries[i].1.as_slice())
    }

    /// Files in discovery order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(file, _)| file.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(file, deps)| (file.as_str(), deps.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(file, token)` pairs whose token names no file in the graph.
    pub fn dangling(&self) -> Vec<(&str, &str)> {
        self.iter()
            .flat_map(|(file, deps)| {
                deps.iter()
                    .filter(move |token| !self.contains(token))
                    .map(move |token| (file, token.as_str()))
            })
            .collect()
    }

    pub fn entries(&self) -> Vec<GraphEntry<'_>> {
        self.iter()
            .map(|(file, includes)| GraphEntry { file, includes })
            .collect()
    }
}

/// Recursively list the sources under `src_root` whose extension is in `extensions`.
///
/// Entries are visited in file name order so two runs over the same tree
/// discover files in the same sequence. Directories that cannot be walked are
/// skipped and reported as [`ScanWarning::Unlisted`].
pub fn discover_sources(
    src_root: &Path,
    extensions: &[String],
) -> Result<(Vec<String>, Vec<ScanWarning>)> {
    if !src_root.is_dir() {
        anyhow::bail!("Source directory {} does not exist", src_root.display());
    }

    let mut files = Vec::new();
    let mut warnings = Vec::new();
    for entry in WalkDir::new(src_root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| src_root.to_path_buf());
                warnings.push(ScanWarning::Unlisted(path, err.into()));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(ext) = path.extension() else {
            continue;
        };
        if !extensions.iter().any(|e| ext.to_string_lossy() == e.as_str()) {
            continue;
        }
        let relative = path
            .strip_prefix(src_root)
            .with_context(|| format!("{} is outside {}", path.display(), src_root.display()))?;
        files.push(to_identity(relative));
    }
    Ok((files, warnings))
}

/// Build the graph for `files`, each relative to `src_root`.
///
/// Files that cannot be read are kept with no dependencies and reported in
/// the returned warnings.
pub fn build_graph<S: AsRef<str>>(
    src_root: &Path,
    files: &[S],
) -> (DependencyGraph, Vec<ScanWarning>) {
    let mut graph = DependencyGraph::new();
    let mut warnings = Vec::new();

    for file in files {
        let file = file.as_ref();
        let full_path = normalize_path(&src_root.join(file));
        let includes = match scan::scan_file(&full_path) {
            Ok(includes) => includes,
            Err(warning) => {
                warnings.push(warning);
                Vec::new()
            }
        };
        graph.insert(file, includes);
    }

    (graph, warnings)
}

/// Lexically clean a path: drop `.` components and fold `..` into its parent.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last = out.components().next_back();
                if matches!(last, Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn to_identity(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn exts() -> Vec<String> {
        DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_insert_keeps_discovery_order() {
        let mut graph = DependencyGraph::new();
        graph.insert("b.c", vec![]);
        graph.insert("a.c", vec!["b.c".to_string()]);
        graph.insert("b.c", vec!["x.h".to_string()]);

        assert_eq!(graph.files().collect::<Vec<_>>(), vec!["b.c", "a.c"]);
        assert_eq!(graph.dependencies("b.c").unwrap(), ["x.h"]);
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_dangling_edges() {
        let mut graph = DependencyGraph::new();
        graph.insert("a.c", vec!["b.c".to_string(), "ghost.h".to_string()]);
        graph.insert("b.c", vec![]);

        assert_eq!(graph.dangling(), vec![("a.c", "ghost.h")]);
    }

    #[test]
    fn test_discover_sources_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        write(&src, "main.c", "");
        write(&src, "net/socket.cpp", "");
        write(&src, "net/socket.h", "");
        write(&src, "app.c", "");
        write(&src, "README", "");

        let (files, warnings) = discover_sources(&src, &exts()).unwrap();
        assert_eq!(files, vec!["app.c", "main.c", "net/socket.cpp"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_discover_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.cc", "");
        write(dir.path(), "b.c", "");

        let (files, _) = discover_sources(dir.path(), &["cc".to_string()]).unwrap();
        assert_eq!(files, vec!["a.cc"]);
    }

    #[test]
    fn test_discover_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_sources(&dir.path().join("src"), &exts()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_reports_unlisted_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "main.c", "");
        write(dir.path(), "locked/hidden.c", "");
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = discover_sources(dir.path(), &exts());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let (files, warnings) = result.unwrap();
        assert_eq!(files, vec!["main.c"]);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], ScanWarning::Unlisted(_, _)));
        assert!(warnings[0].path().ends_with("locked"));
    }

    #[test]
    fn test_build_graph_records_tokens_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "main.c",
            "#include <stdio.h>\n#include \"util.h\"\n#include \"../lib/x.h\"\n",
        );
        write(dir.path(), "util.c", "#include \"util.h\"\n");

        let (files, _) = discover_sources(dir.path(), &exts()).unwrap();
        let (graph, warnings) = build_graph(dir.path(), &files);

        assert!(warnings.is_empty());
        assert_eq!(graph.files().collect::<Vec<_>>(), vec!["main.c", "util.c"]);
        assert_eq!(graph.dependencies("main.c").unwrap(), ["util.h", "../lib/x.h"]);
        assert_eq!(graph.dependencies("util.c").unwrap(), ["util.h"]);
    }

    #[test]
    fn test_build_graph_missing_file_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "main.c", "#include \"a.h\"\n");

        let (graph, warnings) = build_graph(dir.path(), &["main.c", "vanished.c"]);

        assert_eq!(graph.len(), 2);
        assert!(graph.dependencies("vanished.c").unwrap().is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], ScanWarning::Missing(_)));
        assert!(warnings[0].path().ends_with("vanished.c"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("src/./a/../b.c")), PathBuf::from("src/b.c"));
        assert_eq!(normalize_path(Path::new("../x/y.c")), PathBuf::from("../x/y.c"));
        assert_eq!(normalize_path(Path::new("/a/../../b")), PathBuf::from("/b"));
    }

    #[test]
    fn test_graph_entries_serialize() {
        let mut graph = DependencyGraph::new();
        graph.insert("main.c", vec!["util.h".to_string()]);

        let json = serde_json::to_string(&graph.entries()).unwrap();
        assert_eq!(json, r#"[{"file":"main.c","includes":["util.h"]}]"#);
    }
}
