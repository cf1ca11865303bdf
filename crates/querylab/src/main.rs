//! querylab CLI - offline tooling for an e-commerce search pipeline.
//!
//! querylab turns raw click logs and a product taxonomy into training data:
//! a fastText label file with sparse categories rolled up to their parents,
//! and a synonym list mined from word-embedding nearest neighbors.
//!
//! # Usage
//!
//! ```bash
//! # Label training queries (categories with < 1000 queries roll up)
//! querylab label-queries --min-queries 1000 --output labeled_queries.txt
//!
//! # Mine synonyms for the top words
//! querylab synonyms
//!
//! # View configuration
//! querylab config show
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use querylab_core::Config;

mod cli;
mod logging;

/// querylab - roll-up query labeling and embedding synonyms for search.
#[derive(Parser, Debug)]
#[command(name = "querylab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "QUERYLAB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Map training queries to categories and write a label file
    LabelQueries(cli::label::LabelArgs),

    /// Generate a synonym list from word-vector nearest neighbors
    Synonyms,

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // `config` subcommands must still run against a broken file so it can be
    // inspected or re-initialized.
    let lenient = matches!(cli.command, Commands::Config(_));
    let config = match &cli.config {
        Some(path) => load_config(path, true, lenient)?,
        None => load_config(&Config::default_path(), false, lenient)?,
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("querylab v{}", querylab_core::VERSION);

    match cli.command {
        Commands::LabelQueries(args) => cli::label::execute(args, &config),
        Commands::Synonyms => cli::synonyms::execute(&config),
        Commands::Config(args) => cli::config::execute(args, &config, cli.config.as_deref()),
    }
}

/// Load the config at `path`.
///
/// A missing file means defaults unless the path was given explicitly. A file
/// that fails to parse or validate is an error, or a warning plus defaults when
/// `lenient`.
fn load_config(path: &Path, explicit: bool, lenient: bool) -> anyhow::Result<Config> {
    if !explicit && !path.exists() {
        return Ok(Config::default());
    }
    match Config::load_from(path) {
        Ok(config) => Ok(config),
        // Logging isn't initialized yet, so use eprintln for the warning.
        Err(e) if lenient => {
            eprintln!(
                "Warning: Failed to load config from {}: {e}\n  Using default configuration.",
                path.display()
            );
            Ok(Config::default())
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!(
            "Failed to load config from {} (fix it or run `querylab config init --force`)",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn label_queries_parses_both_flags() {
        let cli = Cli::try_parse_from([
            "querylab",
            "label-queries",
            "--min-queries",
            "250",
            "--output",
            "/tmp/labels.txt",
        ])
        .unwrap();
        match cli.command {
            Commands::LabelQueries(args) => {
                assert_eq!(args.min_queries, Some(250));
                assert_eq!(args.output, Some(PathBuf::from("/tmp/labels.txt")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["querylab", "synonyms", "--verbose", "--json-logs"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.json_logs);
        assert!(matches!(cli.command, Commands::Synonyms));
    }

    #[test]
    fn malformed_config_fails_unless_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[labeling]\nmin_queries = \"many\"\n").unwrap();

        let err = load_config(&path, false, false).unwrap_err();
        assert!(format!("{err:#}").contains("config init --force"));

        let config = load_config(&path, false, true).unwrap();
        assert_eq!(config.labeling.min_queries, 1000);
    }

    #[test]
    fn missing_config_defaults_only_when_implicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert_eq!(load_config(&path, false, false).unwrap().labeling.min_queries, 1000);
        assert!(load_config(&path, true, false).is_err());
    }

    #[test]
    fn label_queries_rejects_non_integer_threshold() {
        assert!(Cli::try_parse_from(["querylab", "label-queries", "--min-queries", "lots"]).is_err());
    }
}
