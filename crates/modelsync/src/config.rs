//! Configuration: which definition to watch and which targets to generate.
//!
//! Stored as JSON:
//!
//! ```json
//! {
//!   "watchFile": "Book.ts",
//!   "targets": [
//!     { "language": "cpp", "output": "generated/Book.hpp", "templatePath": "" }
//!   ]
//! }
//! ```

use modelsync_codegen::{extractor_for_path, template_for_language};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// The definition file to extract from.
    pub watch_file: PathBuf,
    #[serde(default)]
    pub targets: Vec<Target>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub language: String,
    pub output: PathBuf,
    /// Optional template file overriding the built-in template for `language`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
}

impl Target {
    pub fn new(language: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            language: language.into(),
            output: output.into(),
            template_path: None,
        }
    }

    /// The custom template, if one is configured. Empty paths count as unset.
    pub fn custom_template(&self) -> Option<&Path> {
        self.template_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watch_file: PathBuf::from("Book.ts"),
            targets: vec![Target::new("cpp", "generated/Book.hpp")],
        }
    }
}

impl Config {
    /// Load a config file. Missing `targets` default to an empty list.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path`, writing the default configuration first if it does not exist.
    pub fn load_or_init(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load(path);
        }
        let config = Self::default();
        config.save(path)?;
        tracing::info!("Created default config: {}", path.display());
        Ok(config)
    }

    /// Write the config as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, json + "\n").map_err(io_err)
    }

    /// Problems that will make every cycle, or a single target, fail.
    ///
    /// These are warnings rather than load errors: the config may be fixed
    /// while the watcher is running.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Err(e) = extractor_for_path(&self.watch_file) {
            problems.push(format!("watchFile {}: {}", self.watch_file.display(), e));
        }
        if self.targets.is_empty() {
            problems.push("no targets configured".to_string());
        }
        for target in &self.targets {
            if target.custom_template().is_none()
                && template_for_language(&target.language).is_none()
            {
                problems.push(format!(
                    "target {}: no template registered for language {} and no templatePath",
                    target.output.display(),
                    target.language
                ));
            }
        }
        problems
    }
}
