//! Synonym mining from word-embedding nearest neighbors.
//!
//! For each word in a top-words list, the nearest neighbors in embedding space
//! whose cosine similarity reaches a threshold are taken as its synonyms and
//! written as one `word,syn1,syn2,...` CSV line.

pub mod vectors;

pub use vectors::{Neighbor, WordVectors};

use std::io::{self, BufRead, Write};

use crate::config::SynonymsConfig;

/// A word and the neighbors that passed the similarity threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct SynonymEntry {
    pub word: String,
    pub synonyms: Vec<String>,
}

impl SynonymEntry {
    /// Render as a CSV line (without the trailing newline).
    pub fn to_line(&self) -> String {
        let mut fields = Vec::with_capacity(self.synonyms.len() + 1);
        fields.push(self.word.as_str());
        fields.extend(self.synonyms.iter().map(String::as_str));
        fields.join(",")
    }
}

/// Filters nearest neighbors by similarity to build a synonym list.
pub struct SynonymGenerator<'a> {
    vectors: &'a WordVectors,
    threshold: f32,
    neighbors: usize,
}

impl<'a> SynonymGenerator<'a> {
    /// Create a generator over `vectors` with the configured threshold and k.
    pub fn new(vectors: &'a WordVectors, config: &SynonymsConfig) -> Self {
        Self {
            vectors,
            threshold: config.threshold,
            neighbors: config.neighbors,
        }
    }

    /// Synonyms for one word, or `None` if no neighbor reaches the threshold.
    pub fn synonyms_for(&self, word: &str) -> Option<SynonymEntry> {
        let word = word.trim();
        if word.is_empty() {
            return None;
        }
        if !self.vectors.contains(word) {
            tracing::debug!("No vector for {:?}, skipping", word);
            return None;
        }

        let synonyms: Vec<String> = self
            .vectors
            .nearest_neighbors(word, self.neighbors)
            .into_iter()
            .filter(|n| n.similarity >= self.threshold)
            .map(|n| n.word)
            .collect();

        if synonyms.is_empty() {
            None
        } else {
            Some(SynonymEntry {
                word: word.to_string(),
                synonyms,
            })
        }
    }

    /// Read words line by line and write one CSV line per word with synonyms.
    ///
    /// Returns `(words_read, lines_written)`.
    pub fn generate<R: BufRead, W: Write>(
        &self,
        words: R,
        mut output: W,
    ) -> io::Result<(usize, usize)> {
        let mut read = 0;
        let mut written = 0;
        for line in words.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            read += 1;
            if let Some(entry) = self.synonyms_for(&line) {
                writeln!(output, "{}", entry.to_line())?;
                written += 1;
            }
        }
        output.flush()?;
        Ok((read, written))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn vectors() -> WordVectors {
        let content = "5 2\n\
                       tv 1.0 0.0\n\
                       television 0.98 0.05\n\
                       telly 0.9 0.2\n\
                       monitor 0.6 0.8\n\
                       banana 0.0 1.0\n";
        WordVectors::parse(content, Path::new("test.vec")).unwrap()
    }

    fn config(threshold: f32, neighbors: usize) -> SynonymsConfig {
        SynonymsConfig {
            threshold,
            neighbors,
        }
    }

    #[test]
    fn test_synonyms_for_applies_threshold() {
        let vectors = vectors();
        let generator = SynonymGenerator::new(&vectors, &config(0.95, 10));
        let entry = generator.synonyms_for("tv").unwrap();
        assert_eq!(entry.word, "tv");
        assert_eq!(entry.synonyms, vec!["television", "telly"]);
    }

    #[test]
    fn test_synonyms_for_respects_neighbor_limit() {
        let vectors = vectors();
        let generator = SynonymGenerator::new(&vectors, &config(0.0, 1));
        let entry = generator.synonyms_for("tv").unwrap();
        assert_eq!(entry.synonyms, vec!["television"]);
    }

    #[test]
    fn test_synonyms_for_none_when_nothing_passes() {
        let vectors = vectors();
        let generator = SynonymGenerator::new(&vectors, &config(0.99, 10));
        assert!(generator.synonyms_for("banana").is_none());
        assert!(generator.synonyms_for("unknown").is_none());
        assert!(generator.synonyms_for("   ").is_none());
    }

    #[test]
    fn test_generate_writes_csv_lines() {
        let vectors = vectors();
        let generator = SynonymGenerator::new(&vectors, &config(0.95, 10));

        let words = "tv\n  television \n\nbanana\nmissing\n";
        let mut output = Vec::new();
        let (read, written) = generator.generate(words.as_bytes(), &mut output).unwrap();

        assert_eq!(read, 4);
        assert_eq!(written, 2);
        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "tv,television,telly");
        assert!(lines[1].starts_with("television,tv"));
    }

    #[test]
    fn test_entry_to_line() {
        let entry = SynonymEntry {
            word: "tv".into(),
            synonyms: vec!["television".into()],
        };
        assert_eq!(entry.to_line(), "tv,television");
    }
}
