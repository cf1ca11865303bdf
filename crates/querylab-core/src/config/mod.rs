//! Configuration management for querylab.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. All config structs implement `Default`.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for querylab.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output file locations
    pub paths: PathsConfig,

    /// Query labeling and roll-up settings
    pub labeling: LabelingConfig,

    /// Synonym generation settings
    pub synonyms: SynonymsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.querylab.querylab/config.toml
    /// - Linux: ~/.config/querylab/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\querylab\config\config.toml
    ///
    /// Falls back to ~/.querylab/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "querylab", "querylab")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".querylab").join("config.toml")
            })
    }

    /// Taxonomy XML path (with ~ expansion).
    pub fn categories_file(&self) -> PathBuf {
        expand(&self.paths.categories_file)
    }

    /// Training query CSV path (with ~ expansion).
    pub fn queries_file(&self) -> PathBuf {
        expand(&self.paths.queries_file)
    }

    /// Default label file path (with ~ expansion).
    pub fn labeled_output(&self) -> PathBuf {
        expand(&self.paths.labeled_output)
    }

    /// Word vectors path (with ~ expansion).
    pub fn vectors_file(&self) -> PathBuf {
        expand(&self.paths.vectors_file)
    }

    /// Top words path (with ~ expansion).
    pub fn top_words_file(&self) -> PathBuf {
        expand(&self.paths.top_words_file)
    }

    /// Synonym output path (with ~ expansion).
    pub fn synonyms_output(&self) -> PathBuf {
        expand(&self.paths.synonyms_output)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

fn expand(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&path_str).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.labeling.min_queries, 1000);
        assert_eq!(config.labeling.root_category_id, "cat00000");
        assert_eq!(config.labeling.label_prefix, "__label__");
        assert_eq!(config.synonyms.neighbors, 10);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[paths]"));
        assert!(toml.contains("[labeling]"));
        assert!(toml.contains("[synonyms]"));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[labeling]\nmin_queries = 250").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.labeling.min_queries, 250);
        assert_eq!(config.labeling.root_category_id, "cat00000");
        assert!((config.synonyms.threshold - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[synonyms]\nthreshold = 1.5").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn test_tilde_expansion() {
        let mut config = Config::default();
        config.paths.queries_file = PathBuf::from("~/data/train.csv");
        let expanded = config.queries_file();
        assert!(expanded.ends_with("data/train.csv"));
    }
}
