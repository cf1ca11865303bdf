//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let labeling = &self.labeling;
        if labeling.min_queries == 0 {
            return Err(ConfigError::ValidationError(
                "labeling.min_queries must be > 0".into(),
            ));
        }
        if labeling.root_category_id.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "labeling.root_category_id must not be empty".into(),
            ));
        }
        // Normalized queries only contain [a-z0-9] and single spaces.
        for (name, c) in [("delimiter", labeling.delimiter), ("escape", labeling.escape)] {
            if c.is_whitespace() || c.is_ascii_lowercase() || c.is_ascii_digit() {
                return Err(ConfigError::ValidationError(format!(
                    "labeling.{name} must not be whitespace or [a-z0-9], got {c:?}"
                )));
            }
        }
        if labeling.delimiter == labeling.escape {
            return Err(ConfigError::ValidationError(
                "labeling.delimiter and labeling.escape must differ".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.synonyms.threshold) {
            return Err(ConfigError::ValidationError(
                "synonyms.threshold must be between 0.0 and 1.0".into(),
            ));
        }
        if self.synonyms.neighbors == 0 {
            return Err(ConfigError::ValidationError(
                "synonyms.neighbors must be > 0".into(),
            ));
        }
        Ok(())
    }
}
