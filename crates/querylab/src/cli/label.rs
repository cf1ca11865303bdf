//! The `querylab label-queries` command.

use clap::Args;
use querylab_core::{label_queries, Config};
use std::path::PathBuf;

/// Arguments for the `label-queries` command.
#[derive(Args, Debug, Default)]
pub struct LabelArgs {
    /// Minimum number of queries per category label [default: labeling.min_queries, 1000]
    #[arg(long)]
    pub min_queries: Option<usize>,

    /// File to write labeled queries to [default: paths.labeled_output]
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute the label-queries command.
pub fn execute(args: LabelArgs, config: &Config) -> anyhow::Result<()> {
    let mut labeling = config.labeling.clone();
    if let Some(min_queries) = args.min_queries {
        if min_queries == 0 {
            anyhow::bail!("--min-queries must be at least 1");
        }
        labeling.min_queries = min_queries;
    }
    let output = args.output.unwrap_or_else(|| config.labeled_output());

    let categories_file = config.categories_file();
    let queries_file = config.queries_file();
    tracing::info!(
        "Labeling {:?} against {:?} (min_queries={})",
        queries_file,
        categories_file,
        labeling.min_queries
    );

    let report = label_queries(&categories_file, &queries_file, &output, &labeling)?;

    tracing::info!(
        "Kept {}/{} queries ({} rolled up); {} passes, {} reassignments",
        report.lines_written,
        report.ingest.rows,
        report.rolled_up,
        report.rollup.passes,
        report.rollup.reassignments
    );
    println!(
        "Number of unique categories after rolling up: {}",
        report.unique_categories
    );
    Ok(())
}
