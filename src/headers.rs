//! Standard library header tables.
//!
//! Includes that name a header from the C or C++ standard library never take
//! part in the project dependency graph. The tables below are matched exactly:
//! no case folding, no path separator translation, no aliasing between
//! `stdio.h` and `cstdio`.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Which standard library a header belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdLibrary {
    C,
    Cxx,
}

const C_HEADERS: &[&str] = &[
    "assert.h",
    "complex.h",
    "ctype.h",
    "errno.h",
    "fenv.h",
    "float.h",
    "inttypes.h",
    "iso646.h",
    "limits.h",
    "locale.h",
    "math.h",
    "setjmp.h",
    "signal.h",
    "stdalign.h",
    "stdarg.h",
    "stdatomic.h",
    "stdbit.h",
    "stdbool.h",
    "stdckdint.h",
    "stddef.h",
    "stdint.h",
    "stdio.h",
    "stdlib.h",
    "stdnoreturn.h",
    "string.h",
    "tgmath.h",
    "threads.h",
    "time.h",
    "uchar.h",
    "wchar.h",
    "wctype.h",
];

const CXX_HEADERS: &[&str] = &[
    // C compatibility headers
    "cassert",
    "ccomplex",
    "cctype",
    "cerrno",
    "cfenv",
    "cfloat",
    "cinttypes",
    "ciso646",
    "climits",
    "clocale",
    "cmath",
    "csetjmp",
    "csignal",
    "cstdalign",
    "cstdarg",
    "cstdbool",
    "cstddef",
    "cstdint",
    "cstdio",
    "cstdlib",
    "cstring",
    "ctgmath",
    "ctime",
    "cuchar",
    "cwchar",
    "cwctype",
    // Library headers
    "algorithm",
    "any",
    "array",
    "atomic",
    "barrier",
    "bit",
    "bitset",
    "charconv",
    "chrono",
    "codecvt",
    "compare",
    "complex",
    "concepts",
    "condition_variable",
    "coroutine",
    "deque",
    "exception",
    "execution",
    "expected",
    "filesystem",
    "flat_map",
    "flat_set",
    "format",
    "forward_list",
    "fstream",
    "functional",
    "future",
    "generator",
    "initializer_list",
    "iomanip",
    "ios",
    "iosfwd",
    "iostream",
    "istream",
    "iterator",
    "latch",
    "limits",
    "list",
    "locale",
    "map",
    "mdspan",
    "memory",
    "memory_resource",
    "mutex",
    "new",
    "numbers",
    "numeric",
    "optional",
    "ostream",
    "print",
    "queue",
    "random",
    "ranges",
    "ratio",
    "regex",
    "scoped_allocator",
    "semaphore",
    "set",
    "shared_mutex",
    "source_location",
    "span",
    "spanstream",
    "sstream",
    "stack",
    "stacktrace",
    "stdexcept",
    "stdfloat",
    "stop_token",
    "streambuf",
    "string",
    "string_view",
    "strstream",
    "syncstream",
    "system_error",
    "text_encoding",
    "thread",
    "tuple",
    "type_traits",
    "typeindex",
    "typeinfo",
    "unordered_map",
    "unordered_set",
    "utility",
    "valarray",
    "variant",
    "vector",
    "version",
];

static C_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| C_HEADERS.iter().copied().collect());

static CXX_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| CXX_HEADERS.iter().copied().collect());

/// Report which standard library, if any, provides `name`.
pub fn classify(name: &str) -> Option<StdLibrary> {
    if C_SET.contains(name) {
        Some(StdLibrary::C)
    } else if CXX_SET.contains(name) {
        Some(StdLibrary::Cxx)
    } else {
        None
    }
}

pub fn is_standard_header(name: &str) -> bool {
    classify(name).is_some()
}

/// Every header name known to the classifier, C library first.
pub fn known_headers() -> impl Iterator<Item = &'static str> {
    C_HEADERS.iter().chain(CXX_HEADERS.iter()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry_is_standard() {
        for name in known_headers() {
            assert!(is_standard_header(name), "{name} should be standard");
        }
    }

    #[test]
    fn test_project_header_is_not_standard() {
        assert!(!is_standard_header("myproject/foo.h"));
        assert!(!is_standard_header("local.h"));
        assert!(!is_standard_header(""));
    }

    #[test]
    fn test_tables_are_disjoint() {
        for name in C_HEADERS {
            assert!(!CXX_SET.contains(name), "{name} is in both tables");
        }
    }

    #[test]
    fn test_classify_library() {
        assert_eq!(classify("stdio.h"), Some(StdLibrary::C));
        assert_eq!(classify("cstdio"), Some(StdLibrary::Cxx));
        assert_eq!(classify("vector"), Some(StdLibrary::Cxx));
        assert_eq!(classify("SDL.h"), None);
    }

    #[test]
    fn test_match_is_exact() {
        assert!(!is_standard_header("STDIO.H"));
        assert!(!is_standard_header("Vector"));
        assert!(!is_standard_header(" stdio.h"));
        assert!(!is_standard_header("sys/stdio.h"));
        assert!(!is_standard_header("stdio"));
    }
}
