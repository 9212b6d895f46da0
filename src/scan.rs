//! `#include` extraction.
//!
//! A directive is recognised per line with the pattern
//! `^\s*#\s*include\s*[<"]([^>"]+)[>"]`. The capture is kept verbatim: no path
//! normalisation, no extension inference. Standard library headers are
//! dropped, everything else is returned in file order, duplicates included.

use crate::headers::is_standard_header;
use regex::Regex;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*#\s*include\s*[<"]([^>"]+)[>"]"#).unwrap());

/// Input that could not contribute to the graph.
///
/// All variants are recoverable. A file that fails to scan is kept in the
/// graph with an empty dependency list; a directory that cannot be listed is
/// skipped along with everything under it.
#[derive(Debug)]
pub enum ScanWarning {
    /// The file was listed but no longer exists on disk.
    Missing(PathBuf),
    /// The file exists but reading it failed.
    Unreadable(PathBuf, io::Error),
    /// A directory under the source root could not be walked.
    Unlisted(PathBuf, io::Error),
}

impl ScanWarning {
    pub fn path(&self) -> &Path {
        match self {
            ScanWarning::Missing(path)
            | ScanWarning::Unreadable(path, _)
            | ScanWarning::Unlisted(path, _) => path,
        }
    }
}

impl fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanWarning::Missing(path) => write!(f, "{} not found", path.display()),
            ScanWarning::Unreadable(path, e) => {
                write!(f, "could not read {}: {}", path.display(), e)
            }
            ScanWarning::Unlisted(path, e) => {
                write!(f, "could not list {}: {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ScanWarning {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanWarning::Missing(_) => None,
            ScanWarning::Unreadable(_, e) | ScanWarning::Unlisted(_, e) => Some(e),
        }
    }
}

/// The raw include token on `line`, standard or not.
pub fn include_token(line: &str) -> Option<&str> {
    INCLUDE_RE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Project-local include tokens of `content`, in order of appearance.
pub fn extract_includes(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(include_token)
        .filter(|token| !is_standard_header(token))
        .map(str::to_string)
        .collect()
}

/// Read `path` and extract its project-local includes.
pub fn scan_file(path: &Path) -> Result<Vec<String>, ScanWarning> {
    let bytes = fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScanWarning::Missing(path.to_path_buf()),
        _ => ScanWarning::Unreadable(path.to_path_buf(), e),
    })?;

    // Sources in legacy encodings still carry ASCII directives
    let content = String::from_utf8_lossy(&bytes);
    Ok(extract_includes(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_include() {
        assert_eq!(extract_includes("#include \"local.h\"\n"), vec!["local.h"]);
    }

    #[test]
    fn test_standard_include_is_filtered() {
        assert!(extract_includes("#include <stdio.h>\n").is_empty());
        assert!(extract_includes("#include <vector>\n#include <cstdio>\n").is_empty());
    }

    #[test]
    fn test_angle_bracket_project_include() {
        assert_eq!(
            extract_includes("#include <SDL2/SDL.h>\n"),
            vec!["SDL2/SDL.h"]
        );
    }

    #[test]
    fn test_whitespace_variants() {
        let src = "  #include \"a.h\"\n\t# include<b.h>\n#   include   \"c/d.h\"\n";
        assert_eq!(extract_includes(src), vec!["a.h", "b.h", "c/d.h"]);
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let src = "#include \"z.h\"\n#include \"a.h\"\n#include \"z.h\"\n";
        assert_eq!(extract_includes(src), vec!["z.h", "a.h", "z.h"]);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let src = "#include\n#include local.h\n#include \"\"\n#define include \"x.h\"\n";
        assert!(extract_includes(src).is_empty());
    }

    #[test]
    fn test_directive_must_start_the_line() {
        let src = "int x; #include \"a.h\"\n// #include \"b.h\"\n";
        assert!(extract_includes(src).is_empty());
    }

    #[test]
    fn test_first_match_per_line_only() {
        let src = "#include \"a.h\" #include \"b.h\"\n";
        assert_eq!(extract_includes(src), vec!["a.h"]);
    }

    #[test]
    fn test_mismatched_delimiters_are_accepted() {
        // The closing delimiter may be either kind
        assert_eq!(extract_includes("#include <odd.h\"\n"), vec!["odd.h"]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let src = "#include \"a.h\"\r\n#include \"b.h\"\r\n";
        assert_eq!(extract_includes(src), vec!["a.h", "b.h"]);
    }

    #[test]
    fn test_include_token_returns_standard_names() {
        assert_eq!(include_token("#include <stdio.h>"), Some("stdio.h"));
        assert_eq!(include_token("int main() {}"), None);
    }

    #[test]
    fn test_scan_missing_file_is_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ghost.c");
        match scan_file(&path) {
            Err(ScanWarning::Missing(p)) => assert_eq!(p, path),
            other => panic!("Expected Missing warning, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_directory_is_unreadable_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("looks_like_source.c");
        fs::create_dir(&path).unwrap();

        let warning = scan_file(&path).unwrap_err();
        assert!(matches!(warning, ScanWarning::Unreadable(_, _)));
        assert_eq!(warning.path(), path);
        assert!(std::error::Error::source(&warning).is_some());
        assert!(warning.to_string().starts_with("could not read "));
    }

    #[test]
    fn test_scan_reads_non_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.c");
        let mut bytes = b"/* caf\xe9 */\n".to_vec();
        bytes.extend_from_slice(b"#include \"menu.h\"\n");
        fs::write(&path, bytes).unwrap();

        assert_eq!(scan_file(&path).unwrap(), vec!["menu.h"]);
    }
}
