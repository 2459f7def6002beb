//! YAML configuration for the `assetmatch` umbrella.
//!
//! One file carries every knob: the embedding backend (`semantic`), where the catalog
//! comes from (`catalog`), engine behaviour (`matcher`), and log output (`logging`). All
//! sections are optional and fall back to their defaults.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! semantic:
//!   mode: "onnx"
//!   model_name: "all-MiniLM-L6-v2"
//!   model_path: "./models/all-MiniLM-L6-v2/onnx/model.onnx"
//!   tokenizer_path: "./models/all-MiniLM-L6-v2/tokenizer.json"
//!   max_sequence_length: 256
//!
//! catalog:
//!   path: "./assets/catalog.yaml"
//!
//! matcher:
//!   cache_catalog_embeddings: true
//!   semantic_timeout_ms: 2000
//!
//! logging:
//!   level: "info"
//!   json: false
//! ```
//!
//! Three environment variables override the file after loading:
//! `ASSETMATCH_MODEL_PATH`, `ASSETMATCH_TOKENIZER_PATH` and `ASSETMATCH_SEMANTIC_MODE`
//! (`onnx` or `stub`).

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use matcher::MatchConfig;
use semantic::{EmbeddingMode, SemanticConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_MODEL_PATH: &str = "ASSETMATCH_MODEL_PATH";
pub const ENV_TOKENIZER_PATH: &str = "ASSETMATCH_TOKENIZER_PATH";
pub const ENV_SEMANTIC_MODE: &str = "ASSETMATCH_SEMANTIC_MODE";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub semantic: SemanticConfig,

    #[serde(default)]
    pub catalog: CatalogSection,

    #[serde(default)]
    pub matcher: MatcherSection,

    #[serde(default)]
    pub logging: LoggingSection,
}

impl AppConfig {
    /// Load and validate a YAML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AppConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.semantic
            .validate()
            .map_err(|e| ConfigLoadError::Validation(format!("semantic: {e}")))?;
        self.matcher.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Apply `ASSETMATCH_*` variables from the process environment.
    ///
    /// Only the three override names are read, so unrelated variables holding non-UTF-8
    /// data are never touched.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigLoadError> {
        self.apply_overrides(
            [ENV_MODEL_PATH, ENV_TOKENIZER_PATH, ENV_SEMANTIC_MODE]
                .into_iter()
                .filter_map(|name| std::env::var_os(name).map(|value| (name, value))),
        )
    }

    /// Apply overrides from an explicit set of `(name, value)` pairs. Unknown names are
    /// ignored. Path values are taken as-is, so they need not be UTF-8.
    pub fn apply_overrides<I, K, V>(&mut self, vars: I) -> Result<(), ConfigLoadError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<OsStr>,
    {
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                ENV_MODEL_PATH => self.semantic.model_path = PathBuf::from(value),
                ENV_TOKENIZER_PATH => self.semantic.tokenizer_path = PathBuf::from(value),
                ENV_SEMANTIC_MODE => {
                    let mode = value.to_str().ok_or_else(|| {
                        ConfigLoadError::Validation(format!(
                            "{ENV_SEMANTIC_MODE} is not valid UTF-8"
                        ))
                    })?;
                    self.semantic.mode = parse_mode(mode.trim())?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            semantic: SemanticConfig::default(),
            catalog: CatalogSection::default(),
            matcher: MatcherSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

fn parse_mode(value: &str) -> Result<EmbeddingMode, ConfigLoadError> {
    match value.to_ascii_lowercase().as_str() {
        "onnx" => Ok(EmbeddingMode::Onnx),
        "stub" => Ok(EmbeddingMode::Stub),
        other => Err(ConfigLoadError::Validation(format!(
            "{ENV_SEMANTIC_MODE} must be 'onnx' or 'stub', got '{other}'"
        ))),
    }
}

/// Where the asset catalog comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogSection {
    /// YAML or JSON catalog file. The built-in reference catalog is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Matching engine settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatcherSection {
    #[serde(default = "true_value")]
    pub cache_catalog_embeddings: bool,

    /// Budget for the semantic path in async callers; the keyword result is returned
    /// once it elapses. Unset means no limit.
    #[serde(default)]
    pub semantic_timeout_ms: Option<u64>,
}

impl MatcherSection {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.semantic_timeout_ms == Some(0) {
            return Err(ConfigLoadError::Validation(
                "matcher.semantic_timeout_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            cache_catalog_embeddings: self.cache_catalog_embeddings,
        }
    }

    pub fn semantic_timeout(&self) -> Option<Duration> {
        self.semantic_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for MatcherSection {
    fn default() -> Self {
        Self {
            cache_catalog_embeddings: true,
            semantic_timeout_ms: None,
        }
    }
}

/// Log output settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSection {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl LoggingSection {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.level.trim().is_empty() {
            return Err(ConfigLoadError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_version() -> String {
    "1.0".to_string()
}
fn true_value() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}
