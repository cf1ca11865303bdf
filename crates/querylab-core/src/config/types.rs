//! Sub-configuration structs with defaults matching the course dataset layout.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Input and output file locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Category tree XML (one `<category>` per node, each with its full path)
    pub categories_file: PathBuf,

    /// Training CSV with at least `category` and `query` columns
    pub queries_file: PathBuf,

    /// Where the labeled query file is written unless `--output` is given
    pub labeled_output: PathBuf,

    /// Word vectors in the fastText `.vec` text format
    pub vectors_file: PathBuf,

    /// One word per line to mine synonyms for
    pub top_words_file: PathBuf,

    /// Synonym CSV output
    pub synonyms_output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            categories_file: PathBuf::from(
                "/workspace/datasets/product_data/categories/categories_0001_abcat0010000_to_pcmcat99300050000.xml",
            ),
            queries_file: PathBuf::from("/workspace/datasets/train.csv"),
            labeled_output: PathBuf::from("/workspace/datasets/fasttext/labeled_queries.txt"),
            vectors_file: PathBuf::from("/workspace/datasets/fasttext/title_model_100.vec"),
            top_words_file: PathBuf::from("/workspace/datasets/fasttext/top_words.txt"),
            synonyms_output: PathBuf::from("/workspace/datasets/fasttext/synonyms.csv"),
        }
    }
}

/// Query labeling and roll-up settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelingConfig {
    /// Minimum number of queries a category needs to keep its own label
    pub min_queries: usize,

    /// Id of the taxonomy root. Never used as a label.
    pub root_category_id: String,

    /// Prepended to the category id to form the label token
    pub label_prefix: String,

    /// Field delimiter of the label file. Must not occur in normalized queries.
    pub delimiter: char,

    /// Escape character for delimiter occurrences in a line
    pub escape: char,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            min_queries: 1000,
            root_category_id: "cat00000".to_string(),
            label_prefix: "__label__".to_string(),
            delimiter: '|',
            escape: '\\',
        }
    }
}

/// Synonym generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynonymsConfig {
    /// Minimum cosine similarity for a neighbor to count as a synonym
    pub threshold: f32,

    /// Nearest neighbors considered per word
    pub neighbors: usize,
}

impl Default for SynonymsConfig {
    fn default() -> Self {
        Self {
            threshold: 0.8,
            neighbors: 10,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
