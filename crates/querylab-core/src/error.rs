//! Error types for querylab.
//!
//! Errors are organized by stage so a failed run says which input was bad
//! and where (file path, category id, CSV line).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for querylab operations.
#[derive(Error, Debug)]
pub enum QuerylabError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Taxonomy loading errors
    #[error("Taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// Training query ingestion errors
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Word vector loading errors
    #[error("Vector error: {0}")]
    Vectors(#[from] VectorError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Taxonomy loading errors.
///
/// A malformed taxonomy is never skipped silently: a missing parent would make
/// the roll-up treat the category as root-adjacent and stop ascending early.
#[derive(Error, Debug)]
pub enum TaxonomyError {
    /// Could not open or read the taxonomy file
    #[error("Failed to read taxonomy {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not well-formed XML of the expected shape
    #[error("Failed to parse taxonomy: {0}")]
    Parse(#[from] quick_xml::de::DeError),

    /// A node lacks a required field
    #[error("Category #{index} is missing its {field}")]
    MissingField { index: usize, field: &'static str },

    /// A path does not start at the configured root
    #[error("Category {id}: path starts at {found}, expected root {root}")]
    BadRoot {
        id: String,
        found: String,
        root: String,
    },

    /// The node id does not match the last entry of its own path
    #[error("Category {id}: path ends at {leaf}")]
    PathMismatch { id: String, leaf: String },

    /// The same category was declared under two different parents
    #[error("Category {id} has conflicting parents {first} and {second}")]
    ConflictingParent {
        id: String,
        first: String,
        second: String,
    },

    /// Ascending from a category never reaches the root
    #[error("Category {id} is part of a parent cycle")]
    Cycle { id: String },
}

/// Training query ingestion errors.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Could not open the query file
    #[error("Failed to open queries {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A required column is absent from the header row
    #[error("{path} has no `{column}` column")]
    MissingColumn { path: PathBuf, column: &'static str },

    /// A row could not be read or decoded
    #[error("Malformed row in {path} (line {line}): {source}")]
    Row {
        path: PathBuf,
        line: u64,
        source: csv::Error,
    },
}

/// Word vector loading errors.
#[derive(Error, Debug)]
pub enum VectorError {
    /// Could not open or read the vectors file
    #[error("Failed to read vectors {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The `<count> <dim>` header is missing or unparseable
    #[error("Invalid vectors header in {path}: {header:?}")]
    Header { path: PathBuf, header: String },

    /// A row has the wrong arity or a non-numeric component
    #[error("Invalid vector row in {path} (line {line}): {message}")]
    Row {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

/// Convenience type alias for querylab results.
pub type Result<T> = std::result::Result<T, QuerylabError>;
