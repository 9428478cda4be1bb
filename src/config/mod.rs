//! Harness configuration (gild.toml)
//!
//! Every key is optional. The defaults reproduce the classic setup: run
//! `grun qbasic program -tree ../<test>` from `build/`, keep golden files
//! next to the test inputs and compare with `diff -du`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "gild.toml";

/// Placeholder replaced with the test name in parser arguments
pub const TEST_PLACEHOLDER: &str = "{test}";

/// Harness configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// External parser invocation
    pub parser: ParserConfig,

    /// Golden file layout
    pub golden: GoldenConfig,

    /// Diff backend
    pub diff: DiffConfig,

    /// Gild prompt
    pub gild: GildConfig,

    /// Rendering options
    pub render: RenderConfig,
}

/// How to invoke the external parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserConfig {
    /// Program to run
    pub program: String,

    /// Arguments; `{test}` is replaced with the test name
    pub args: Vec<String>,

    /// Directory the parser runs in
    pub working_dir: PathBuf,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            program: "grun".to_string(),
            args: vec![
                "qbasic".to_string(),
                "program".to_string(),
                "-tree".to_string(),
                format!("../{}", TEST_PLACEHOLDER),
            ],
            working_dir: PathBuf::from("build"),
        }
    }
}

impl ParserConfig {
    /// Arguments for one test, with the placeholder substituted
    pub fn args_for(&self, test: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(TEST_PLACEHOLDER, test))
            .collect()
    }
}

/// Where golden files live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GoldenConfig {
    /// Directory holding golden files
    pub dir: PathBuf,

    /// File extension, without the dot
    pub extension: String,
}

impl Default for GoldenConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            extension: "golden".to_string(),
        }
    }
}

impl GoldenConfig {
    /// Golden file path for a test: `<dir>/<test>.<extension>`
    pub fn path_for(&self, test: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", test, self.extension))
    }
}

/// Which diff implementation to use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DiffConfig {
    /// Use the in-process diff instead of spawning a tool
    pub builtin: bool,

    /// External diff program
    pub program: String,

    /// Arguments placed before the golden path and `-`
    pub args: Vec<String>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            builtin: false,
            program: "diff".to_string(),
            args: vec!["-du".to_string()],
        }
    }
}

/// The interactive gild question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GildConfig {
    /// Prompt text
    pub prompt: String,

    /// Answers that count as yes (exact match)
    pub accept: Vec<String>,
}

impl Default for GildConfig {
    fn default() -> Self {
        Self {
            prompt: "gild?".to_string(),
            accept: vec!["Y".to_string(), "y".to_string(), "yes".to_string()],
        }
    }
}

/// Rendering options
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderConfig {
    /// Treat unbalanced parser output as an error
    pub strict: bool,
}

impl Config {
    /// Load a config from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, else `gild.toml` in `dir` when present, else defaults
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = dir.join(CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse a config from a TOML string
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize the config to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Config loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests;
