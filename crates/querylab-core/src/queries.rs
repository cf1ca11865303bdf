//! Training query ingestion.
//!
//! Reads the click-log CSV, keeps rows whose category is a valid taxonomy node,
//! and normalizes each query into a [`QueryRecord`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::IngestError;
use crate::normalize::QueryNormalizer;
use crate::taxonomy::Taxonomy;
use crate::types::QueryRecord;

/// Columns read from each row. Any other columns are ignored.
#[derive(Debug, Deserialize)]
struct QueryRow {
    category: String,
    query: String,
}

/// Counts from one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Data rows read (excluding the header)
    pub rows: usize,
    /// Rows dropped because their category is not in the taxonomy
    pub dropped: usize,
}

/// Load and normalize training queries from a CSV file.
pub fn load_queries(
    path: &Path,
    taxonomy: &Taxonomy,
    normalizer: &QueryNormalizer,
) -> Result<(Vec<QueryRecord>, IngestSummary), IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let (records, summary) = read_queries(file, path, taxonomy, normalizer)?;

    tracing::info!(
        "Loaded {} queries from {:?} ({} dropped: category not in taxonomy)",
        records.len(),
        path,
        summary.dropped
    );
    Ok((records, summary))
}

/// Read training queries from any CSV source. `source` is only used in errors.
pub fn read_queries<R: Read>(
    reader: R,
    source: &Path,
    taxonomy: &Taxonomy,
    normalizer: &QueryNormalizer,
) -> Result<(Vec<QueryRecord>, IngestSummary), IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| row_error(source, e, 1))?;
    for column in ["category", "query"] {
        if !headers.iter().any(|h| h == column) {
            return Err(IngestError::MissingColumn {
                path: source.to_path_buf(),
                column,
            });
        }
    }

    let mut records = Vec::new();
    let mut summary = IngestSummary::default();

    for (i, row) in csv_reader.deserialize::<QueryRow>().enumerate() {
        // Header is line 1.
        let row = row.map_err(|e| row_error(source, e, i as u64 + 2))?;
        summary.rows += 1;

        let category = row.category.trim();
        if !taxonomy.contains(category) {
            summary.dropped += 1;
            continue;
        }

        let normalized = normalizer.normalize(&row.query);
        records.push(QueryRecord::new(row.query, normalized, category));
    }

    if summary.dropped > 0 {
        tracing::warn!(
            "Dropped {}/{} queries labeled with categories outside the taxonomy",
            summary.dropped,
            summary.rows
        );
    }

    Ok((records, summary))
}

fn row_error(source: &Path, err: csv::Error, fallback_line: u64) -> IngestError {
    let line = err
        .position()
        .map(|p| p.line())
        .unwrap_or(fallback_line);
    IngestError::Row {
        path: source.to_path_buf(),
        line,
        source: err,
    }
}
