pub mod parser;
pub mod validator;

use crate::document::Separator;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming a config file when `--config` is absent
pub const CONFIG_ENV: &str = "CODETEXT_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub exclude: ExcludeConfig,

    #[serde(default)]
    pub walk: WalkConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Paths left out of the content dump, merged ahead of `--exclude` values
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ExcludeConfig {
    #[serde(default)]
    pub paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WalkConfig {
    #[serde(default)]
    pub follow_symlinks: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// `"\\"` or `"/"`, used in headers and directory markers
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Unlike a dotfile-style config, nothing is created when the file is
    /// missing: a path that was asked for must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The file contains invalid TOML
    /// - A value fails validation (bad separator, malformed exclude path)
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        parser::parse_config_file(path)
    }

    /// Loads `path` when given, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Rendering separator as a typed value.
    ///
    /// # Errors
    ///
    /// Returns an error if `output.separator` is not `\` or `/`.
    pub fn separator(&self) -> Result<Separator> {
        self.output.separator.parse()
    }
}

fn default_separator() -> String {
    Separator::default().to_string()
}
