//! End-to-end query labeling run.
//!
//! ```text
//! taxonomy XML ─┐
//!               ├─> ingest + normalize ─> roll-up ─> membership filter ─> label file
//! train CSV ────┘
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::LabelingConfig;
use crate::error::Result;
use crate::normalize::QueryNormalizer;
use crate::output::LabelWriter;
use crate::queries::{load_queries, IngestSummary};
use crate::rollup::{category_counts, RollUp};
use crate::taxonomy::Taxonomy;
use crate::types::{QueryRecord, RollUpStats};

/// What a labeling run read, moved and wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelingReport {
    pub ingest: IngestSummary,
    pub rollup: RollUpStats,
    /// Records whose written label differs from their input category
    pub rolled_up: usize,
    /// Records removed by the final taxonomy-membership filter
    pub dropped_after_rollup: usize,
    pub lines_written: usize,
    /// Distinct labels in the written file
    pub unique_categories: usize,
}

/// Roll up already-ingested records and keep those with valid final labels.
pub fn roll_up_records(
    taxonomy: &Taxonomy,
    min_queries: usize,
    mut records: Vec<QueryRecord>,
) -> (Vec<QueryRecord>, RollUpStats, usize) {
    let engine = RollUp::new(taxonomy, min_queries);
    let stats = engine.run(&mut records);
    let (kept, dropped) = engine.finalize(records);
    (kept, stats, dropped)
}

/// Load inputs, roll up sparse categories, and write the label file.
pub fn label_queries(
    categories_file: &Path,
    queries_file: &Path,
    output: &Path,
    labeling: &LabelingConfig,
) -> Result<LabelingReport> {
    let taxonomy = Taxonomy::load(categories_file, &labeling.root_category_id)?;
    let normalizer = QueryNormalizer::new();
    let (records, ingest) = load_queries(queries_file, &taxonomy, &normalizer)?;

    let (records, rollup, dropped_after_rollup) =
        roll_up_records(&taxonomy, labeling.min_queries, records);
    let rolled_up = records.iter().filter(|r| r.was_rolled_up()).count();
    for (category, count) in category_counts(&records) {
        tracing::debug!(
            "{} ({}): {} queries",
            category,
            taxonomy.name_of(category).unwrap_or("unnamed"),
            count
        );
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(output)?;
    let mut writer = LabelWriter::from_config(BufWriter::new(file), labeling);
    writer.write_records(&records)?;
    writer.flush()?;
    tracing::info!(
        "Wrote {} labeled queries to {:?}",
        writer.lines_written(),
        output
    );

    let unique_categories = records
        .iter()
        .map(|r| r.current_category_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    Ok(LabelingReport {
        ingest,
        rollup,
        rolled_up,
        dropped_after_rollup,
        lines_written: writer.lines_written(),
        unique_categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuerylabError;

    const CATEGORIES: &str = r#"<categories>
  <category><id>cat00000</id>
    <path><category><id>cat00000</id></category></path></category>
  <category><id>tv</id>
    <path><category><id>cat00000</id></category><category><id>tv</id></category></path></category>
  <category><id>oled</id>
    <path><category><id>cat00000</id></category><category><id>tv</id></category>
          <category><id>oled</id></category></path></category>
  <category><id>audio</id>
    <path><category><id>cat00000</id></category><category><id>audio</id></category></path></category>
</categories>"#;

    const QUERIES: &str = "user,sku,category,query\n\
                           u1,1,oled,Flat Screen\n\
                           u2,2,tv,Smart TV\n\
                           u3,3,tv,4K Television!\n\
                           u4,4,audio,Headphones\n\
                           u5,5,gone,Ignored\n";

    fn write_inputs(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
        let categories = dir.join("categories.xml");
        let queries = dir.join("train.csv");
        std::fs::write(&categories, CATEGORIES).unwrap();
        std::fs::write(&queries, QUERIES).unwrap();
        (categories, queries)
    }

    #[test]
    fn test_label_queries_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let (categories, queries) = write_inputs(dir.path());
        let output = dir.path().join("out").join("labeled_queries.txt");

        let labeling = LabelingConfig {
            min_queries: 2,
            ..LabelingConfig::default()
        };
        let report = label_queries(&categories, &queries, &output, &labeling).unwrap();

        assert_eq!(report.ingest.rows, 5);
        assert_eq!(report.ingest.dropped, 1);
        assert_eq!(report.dropped_after_rollup, 0);
        assert_eq!(report.rolled_up, 1);
        assert_eq!(report.lines_written, 4);
        // oled (1) rolls into tv; audio (1) sits under the root and stays.
        assert_eq!(report.unique_categories, 2);

        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "__label__tv flat screen",
                "__label__tv smart tv",
                "__label__tv 4k televis",
                "__label__audio headphon",
            ]
        );
    }

    #[test]
    fn test_label_queries_fails_on_bad_taxonomy() {
        let dir = tempfile::tempdir().unwrap();
        let (_, queries) = write_inputs(dir.path());
        let categories = dir.path().join("bad.xml");
        std::fs::write(
            &categories,
            "<categories><category><id>x</id></category></categories>",
        )
        .unwrap();

        let err = label_queries(
            &categories,
            &queries,
            &dir.path().join("out.txt"),
            &LabelingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, QuerylabError::Taxonomy(_)));
    }

    #[test]
    fn test_roll_up_records_reports_drops() {
        let taxonomy = Taxonomy::from_parents("ROOT", [("a", "undeclared")]).unwrap();
        let records = vec![QueryRecord::new("q", "q", "a")];
        let (kept, stats, dropped) = roll_up_records(&taxonomy, 5, records);
        assert!(kept.is_empty());
        assert_eq!(dropped, 1);
        assert_eq!(stats.reassignments, 1);
    }
}
