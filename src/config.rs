use crate::graph::DEFAULT_EXTENSIONS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "incmake.toml";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    pub package: PackageConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageConfig {
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub lang: Lang,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    C,
    #[default]
    Cpp,
}

impl Lang {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "c" => Some(Lang::C),
            "cpp" | "c++" | "cxx" => Some(Lang::Cpp),
            _ => None,
        }
    }

    pub fn source_extension(self) -> &'static str {
        match self {
            Lang::C => "c",
            Lang::Cpp => "cpp",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BuildConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cxx: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_std: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cxx_std: Option<String>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ldflags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bin: Option<String>,
    #[serde(default = "default_src_dir")]
    pub src_dir: String,
    #[serde(default = "default_include_dir")]
    pub include_dir: String,
    #[serde(default = "default_build_dir")]
    pub build_dir: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            cc: None,
            cxx: None,
            c_std: None,
            cxx_std: None,
            flags: Vec::new(),
            ldflags: Vec::new(),
            libs: Vec::new(),
            bin: None,
            src_dir: default_src_dir(),
            include_dir: default_include_dir(),
            build_dir: default_build_dir(),
            extensions: default_extensions(),
        }
    }
}

impl ProjectConfig {
    /// Fresh config for a new project, with language-appropriate defaults.
    pub fn new(name: &str, lang: Lang) -> Self {
        let mut build = BuildConfig {
            flags: vec!["-Wall".to_string(), "-Wextra".to_string()],
            ..BuildConfig::default()
        };
        match lang {
            Lang::C => build.c_std = Some("c17".to_string()),
            Lang::Cpp => build.cxx_std = Some("c++17".to_string()),
        }
        Self {
            package: PackageConfig {
                name: name.to_string(),
                version: default_version(),
                lang,
            },
            build,
        }
    }

    pub fn bin_name(&self) -> &str {
        self.build.bin.as_deref().unwrap_or(&self.package.name)
    }

    pub fn src_root(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.build.src_dir)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize incmake.toml")
    }
}

/// Load `incmake.toml` from the current directory.
pub fn load_config() -> Result<ProjectConfig> {
    load_config_from(Path::new("."))
}

pub fn load_config_from(dir: &Path) -> Result<ProjectConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Err(anyhow::anyhow!(
            "{} not found in {}.\n\n\
            💡 Tip: Run 'incmake init' to create one, or 'incmake new <name>' for a new project.",
            CONFIG_FILE,
            dir.display()
        ));
    }
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {} - check file permissions", path.display()))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<ProjectConfig> {
    toml::from_str(content).context(
        "Failed to parse incmake.toml - check for syntax errors (missing quotes, brackets)",
    )
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_src_dir() -> String {
    "src".to_string()
}

fn default_include_dir() -> String {
    "include".to_string()
}

fn default_build_dir() -> String {
    "build".to_string()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}
