//! Compiler selection and language standard flags.
//!
//! The generated Makefile pins concrete compilers. Each one comes from the
//! first source that names it: `incmake.toml`, then `CC`/`CXX`, then the first
//! compiler found on `PATH`, then the POSIX names `cc`/`c++`.

use crate::config::ProjectConfig;
use std::process::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilers {
    pub cc: String,
    pub cxx: String,
}

/// Resolve the C and C++ compilers for `config`.
pub fn select_compilers(config: &ProjectConfig) -> Compilers {
    select_with(config, |var| std::env::var(var).ok(), is_command_available)
}

fn select_with(
    config: &ProjectConfig,
    env: impl Fn(&str) -> Option<String>,
    available: impl Fn(&str) -> bool,
) -> Compilers {
    let pick = |configured: &Option<String>, var: &str, candidates: &[&str], fallback: &str| {
        if let Some(compiler) = configured {
            return compiler.clone();
        }
        if let Some(compiler) = env(var).filter(|c| !c.trim().is_empty()) {
            return compiler;
        }
        candidates
            .iter()
            .find(|&&c| available(c))
            .map(|c| c.to_string())
            .unwrap_or_else(|| fallback.to_string())
    };

    Compilers {
        cc: pick(&config.build.cc, "CC", &["clang", "gcc"], "cc"),
        cxx: pick(&config.build.cxx, "CXX", &["clang++", "g++"], "c++"),
    }
}

fn is_command_available(cmd: &str) -> bool {
    Command::new(cmd).arg("--version").output().is_ok()
}

/// GCC/Clang `-std=` flag for an edition name, with aliases folded.
pub fn std_flag(edition: &str) -> String {
    let normalized = edition.trim().to_lowercase();
    let edition_clean = normalized.strip_prefix("-std=").unwrap_or(&normalized);

    let canonical = match edition_clean {
        "c89" | "c90" => "c89",
        "c17" | "c18" => "c17",
        "c23" | "c2x" => "c23",
        "c++98" | "c++03" => "c++03",
        "c++11" | "c++0x" => "c++11",
        "c++14" | "c++1y" => "c++14",
        "c++17" | "c++1z" => "c++17",
        "c++20" | "c++2a" => "c++20",
        "c++23" | "c++2b" => "c++23",
        "c++26" | "c++2c" => "c++26",
        "gnu89" | "gnu90" => "gnu89",
        "gnu17" | "gnu18" => "gnu17",
        "gnu23" | "gnu2x" => "gnu23",
        "gnu++98" | "gnu++03" => "gnu++03",
        "gnu++11" | "gnu++0x" => "gnu++11",
        "gnu++14" | "gnu++1y" => "gnu++14",
        "gnu++17" | "gnu++1z" => "gnu++17",
        "gnu++20" | "gnu++2a" => "gnu++20",
        "gnu++23" | "gnu++2b" => "gnu++23",
        "gnu++26" | "gnu++2c" => "gnu++26",
        other => other,
    };
    format!("-std={}", canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Lang;

    #[test]
    fn test_configured_compiler_wins() {
        let mut config = ProjectConfig::new("app", Lang::C);
        config.build.cc = Some("tcc".to_string());

        let compilers = select_with(&config, |_| Some("gcc-13".to_string()), |_| true);
        assert_eq!(compilers.cc, "tcc");
        assert_eq!(compilers.cxx, "gcc-13");
    }

    #[test]
    fn test_env_before_path() {
        let config = ProjectConfig::new("app", Lang::Cpp);
        let env = |var: &str| (var == "CXX").then(|| "g++-14".to_string());

        let compilers = select_with(&config, env, |c| c == "gcc");
        assert_eq!(compilers.cxx, "g++-14");
        assert_eq!(compilers.cc, "gcc");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let config = ProjectConfig::new("app", Lang::C);
        let compilers = select_with(&config, |_| Some("  ".to_string()), |c| c == "clang");
        assert_eq!(compilers.cc, "clang");
    }

    #[test]
    fn test_posix_fallback() {
        let config = ProjectConfig::new("app", Lang::C);
        let compilers = select_with(&config, |_| None, |_| false);
        assert_eq!(
            compilers,
            Compilers {
                cc: "cc".to_string(),
                cxx: "c++".to_string()
            }
        );
    }

    #[test]
    fn test_std_flag_c_standards() {
        assert_eq!(std_flag("c89"), "-std=c89");
        assert_eq!(std_flag("c99"), "-std=c99");
        assert_eq!(std_flag("c11"), "-std=c11");
        assert_eq!(std_flag("c18"), "-std=c17");
        assert_eq!(std_flag("c2x"), "-std=c23");
    }

    #[test]
    fn test_std_flag_cpp_aliases() {
        assert_eq!(std_flag("c++0x"), "-std=c++11");
        assert_eq!(std_flag("c++1z"), "-std=c++17");
        assert_eq!(std_flag("C++20"), "-std=c++20");
        assert_eq!(std_flag("gnu++2b"), "-std=gnu++23");
    }

    #[test]
    fn test_std_flag_strip_prefix() {
        assert_eq!(std_flag("-std=c++20"), "-std=c++20");
        assert_eq!(std_flag("c++latest"), "-std=c++latest");
    }
}
