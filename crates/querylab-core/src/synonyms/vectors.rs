//! Word vectors in the fastText `.vec` text format.
//!
//! The first line is `<count> <dim>`, followed by one `word v1 .. vdim` row per
//! word. Vectors are L2-normalized on load and stored in a single flat N×dim
//! row-major matrix, so a dot product against a row is a cosine similarity.

use std::collections::HashMap;
use std::path::Path;

use crate::error::VectorError;
use crate::math::{dot, l2_normalize_in_place};

/// A nearest neighbor of a query word.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub word: String,
    /// Cosine similarity to the query word
    pub similarity: f32,
}

/// Unit-normalized word vectors with brute-force nearest-neighbor lookup.
#[derive(Debug)]
pub struct WordVectors {
    words: Vec<String>,
    by_word: HashMap<String, usize>,
    /// Flat matrix: N × dim stored row-major.
    matrix: Vec<f32>,
    dim: usize,
}

impl WordVectors {
    /// Load vectors from a `.vec` file.
    pub fn load(path: &Path) -> Result<Self, VectorError> {
        let content = std::fs::read_to_string(path).map_err(|source| VectorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let vectors = Self::parse(&content, path)?;

        tracing::info!(
            "Loaded {} word vectors x {} dims from {:?}",
            vectors.len(),
            vectors.dim(),
            path
        );
        Ok(vectors)
    }

    /// Parse `.vec` text. `source` is only used in errors.
    pub fn parse(content: &str, source: &Path) -> Result<Self, VectorError> {
        let mut lines = content.lines();

        let header = lines.next().unwrap_or_default();
        let (declared, dim) = parse_header(header).ok_or_else(|| VectorError::Header {
            path: source.to_path_buf(),
            header: header.to_string(),
        })?;

        // The header is untrusted: size buffers by what the content can hold.
        let rows = declared.min(content.lines().count().saturating_sub(1));
        let values = rows
            .checked_mul(dim)
            .unwrap_or(usize::MAX)
            .min(content.len() / 2);
        let mut words = Vec::with_capacity(rows);
        let mut by_word = HashMap::with_capacity(rows);
        let mut matrix = Vec::with_capacity(values);

        for (i, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row_error = |message: String| VectorError::Row {
                path: source.to_path_buf(),
                line: i + 2,
                message,
            };

            let mut fields = line.split_whitespace();
            let word = fields.next().unwrap_or_default();
            let start = matrix.len();
            for field in fields {
                let value: f32 = field
                    .parse()
                    .map_err(|_| row_error(format!("{word}: {field:?} is not a number")))?;
                matrix.push(value);
            }
            let got = matrix.len() - start;
            if got != dim {
                return Err(row_error(format!("{word}: expected {dim} values, got {got}")));
            }
            l2_normalize_in_place(&mut matrix[start..]);

            // fastText never repeats a word; keep the first row if a file does.
            by_word.entry(word.to_string()).or_insert(words.len());
            words.push(word.to_string());
        }

        if words.len() != declared {
            tracing::warn!(
                "Vectors header declares {} words but {} rows were read",
                declared,
                words.len()
            );
        }

        Ok(Self {
            words,
            by_word,
            matrix,
            dim,
        })
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no vectors were loaded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Embedding dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Whether `word` has a vector.
    pub fn contains(&self, word: &str) -> bool {
        self.by_word.contains_key(word)
    }

    fn row(&self, index: usize) -> &[f32] {
        let offset = index * self.dim;
        &self.matrix[offset..offset + self.dim]
    }

    /// The `k` most similar words to `word`, most similar first.
    ///
    /// The word itself is excluded. Unknown words have no neighbors.
    pub fn nearest_neighbors(&self, word: &str, k: usize) -> Vec<Neighbor> {
        let Some(&query_index) = self.by_word.get(word) else {
            return Vec::new();
        };
        let query = self.row(query_index);

        let mut scores: Vec<(usize, f32)> = (0..self.words.len())
            .filter(|&i| i != query_index && self.words[i] != word)
            .map(|i| (i, dot(query, self.row(i))))
            .collect();

        scores.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scores.truncate(k);

        scores
            .into_iter()
            .map(|(i, similarity)| Neighbor {
                word: self.words[i].clone(),
                similarity,
            })
            .collect()
    }
}

fn parse_header(header: &str) -> Option<(usize, usize)> {
    let mut parts = header.split_whitespace();
    let count = parts.next()?.parse().ok()?;
    let dim = parts.next()?.parse().ok()?;
    if parts.next().is_some() || dim == 0 {
        return None;
    }
    Some((count, dim))
}
