//! querylab core - offline tooling for an e-commerce search pipeline.
//!
//! Two batch jobs share this library:
//!
//! - **Query labeling**: maps training queries to product categories and rolls
//!   sparse categories up the taxonomy until every label has enough support,
//!   then writes a fastText-style label file.
//! - **Synonym mining**: keeps word-embedding nearest neighbors above a cosine
//!   threshold as synonyms for a list of top words.
//!
//! # Architecture
//!
//! ```text
//! Taxonomy XML → Taxonomy ─┐
//!                          ├→ RollUp → membership filter → LabelWriter
//! Train CSV → Normalize ───┘
//!
//! Word vectors → nearest neighbors → threshold → synonyms CSV
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use querylab_core::{Config, QueryNormalizer, RollUp, Taxonomy};
//!
//! let config = Config::load()?;
//! let taxonomy = Taxonomy::load(&config.categories_file(), &config.labeling.root_category_id)?;
//! let (mut records, _) =
//!     querylab_core::queries::load_queries(&config.queries_file(), &taxonomy, &QueryNormalizer::new())?;
//! let stats = RollUp::new(&taxonomy, config.labeling.min_queries).run(&mut records);
//! println!("{} categories left", stats.categories_after);
//! ```

pub mod config;
pub mod error;
pub mod math;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod queries;
pub mod rollup;
pub mod synonyms;
pub mod taxonomy;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, IngestError, QuerylabError, Result, TaxonomyError, VectorError};
pub use normalize::QueryNormalizer;
pub use output::LabelWriter;
pub use pipeline::{label_queries, LabelingReport};
pub use rollup::RollUp;
pub use synonyms::{SynonymGenerator, WordVectors};
pub use taxonomy::Taxonomy;
pub use types::{QueryRecord, RollUpStats};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
