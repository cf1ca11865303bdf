//! The `querylab synonyms` command.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::Context;
use querylab_core::{Config, SynonymGenerator, WordVectors};

/// Execute the synonyms command.
pub fn execute(config: &Config) -> anyhow::Result<()> {
    let vectors = WordVectors::load(&config.vectors_file())?;
    let generator = SynonymGenerator::new(&vectors, &config.synonyms);

    let top_words = config.top_words_file();
    let output = config.synonyms_output();
    let (read, written) = generate_with_progress(&generator, &top_words, &output)?;

    tracing::info!(
        "Wrote synonyms for {}/{} words (threshold {}) to {:?}",
        written,
        read,
        config.synonyms.threshold,
        output
    );
    Ok(())
}

fn generate_with_progress(
    generator: &SynonymGenerator<'_>,
    top_words: &Path,
    output: &Path,
) -> anyhow::Result<(usize, usize)> {
    let input =
        File::open(top_words).with_context(|| format!("Failed to open {top_words:?}"))?;
    let total = input.metadata().map(|m| m.len()).unwrap_or(0);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let out = File::create(output).with_context(|| format!("Failed to create {output:?}"))?;

    let progress = create_progress_bar(total);
    let counts = generator.generate(
        BufReader::new(progress.wrap_read(input)),
        BufWriter::new(out),
    )?;
    progress.finish_and_clear();
    Ok(counts)
}

/// Create a byte-based progress bar over the top words file.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message("mining synonyms...");
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execute_writes_synonym_file() {
        let dir = tempfile::tempdir().unwrap();
        let vectors = dir.path().join("model.vec");
        let top_words = dir.path().join("top_words.txt");
        let output = dir.path().join("nested").join("synonyms.csv");
        std::fs::write(&vectors, "3 2\nlaptop 1.0 0.0\nnotebook 0.95 0.05\nbanana 0.0 1.0\n")
            .unwrap();
        std::fs::write(&top_words, "laptop\nbanana\n").unwrap();

        let mut config = Config::default();
        config.paths.vectors_file = vectors;
        config.paths.top_words_file = top_words;
        config.paths.synonyms_output = output.clone();

        execute(&config).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(text, "laptop,notebook\n");
    }

    #[test]
    fn execute_fails_on_missing_vectors() {
        let mut config = Config::default();
        config.paths.vectors_file = "/nonexistent/model.vec".into();
        assert!(execute(&config).is_err());
    }
}
