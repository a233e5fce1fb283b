//! Command-line interface for wcvp-solver.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **resolve**: Correct the name column of a tab-separated file
//! - **lookup**: Resolve names given on the command line
//! - **index**: Build the synonymy index and report what went into it
//!
//! ## Usage
//!
//! ```text
//! # Correct the first column of a file against a gzipped checklist
//! wcvp-solver resolve -i names.tsv -w wcvp_names.txt.gz > corrected.tsv
//!
//! # Keep the original names and show how each one was resolved
//! wcvp-solver resolve -i names.tsv -w wcvp_names.txt -c 2 -o -v
//!
//! # Exact matching only, reading names from stdin
//! cut -f3 occurrences.tsv | wcvp-solver resolve -i - -w wcvp_names.txt -a none
//!
//! # Check a few names by hand
//! wcvp-solver lookup -w wcvp_names.txt "Rosa lutetiana" "Rosa galica" --format json
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::catalog::builder::BuildOptions;
use crate::catalog::index::SynonymyIndex;
use crate::matching::scoring::{FuzzyMatcher, MatcherConfig, Scorer, DEFAULT_MIN_SCORE};
use crate::parsing::wcvp::build_index_from_file;
use crate::utils::validation::parse_existing_file;

pub mod index;
pub mod lookup;
pub mod resolve;

#[derive(Parser)]
#[command(name = "wcvp-solver")]
#[command(version)]
#[command(about = "Resolve plant names to their accepted WCVP names")]
#[command(
    long_about = "wcvp-solver corrects scientific plant names against the World Checklist of Vascular Plants.\n\nEach name is resolved to its accepted name with authors:\n- Exactly, using the longest leading part of the name found in the checklist\n- Approximately, within the stated genus or within the closest matching genus\n\nNames that cannot be resolved unambiguously are reported and left out."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug diagnostics
    #[arg(short, long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Correct the name column of a tab-separated file
    Resolve(resolve::ResolveArgs),

    /// Resolve names given on the command line
    Lookup(lookup::LookupArgs),

    /// Build the synonymy index and print statistics
    Index(index::IndexArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Approximate matching strategy selectable on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ApproximateMode {
    /// Exact matching only
    None,
    /// Whole-string similarity ratio
    #[default]
    #[value(alias = "thefuzz")]
    Ratio,
    /// Substring search with a bounded number of edits
    #[value(alias = "regex")]
    BoundedEdit,
}

impl ApproximateMode {
    pub fn scorer(self) -> Option<Scorer> {
        match self {
            Self::None => None,
            Self::Ratio => Some(Scorer::Ratio),
            Self::BoundedEdit => Some(Scorer::BoundedEdit),
        }
    }
}

/// Options for loading the WCVP checklist
#[derive(clap::Args, Debug, Clone)]
pub struct ReferenceArgs {
    /// WCVP checklist (pipe-delimited, plain or gzip compressed)
    #[arg(short, long, value_name = "FILE", value_parser = parse_existing_file)]
    pub wcvp: PathBuf,

    /// Lowercase the checklist names (for all-lowercase input)
    #[arg(short, long)]
    pub lower: bool,
}

impl ReferenceArgs {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            lowercase: self.lower,
        }
    }

    /// Read the checklist and build the synonymy index
    ///
    /// # Errors
    ///
    /// Returns an error if the checklist cannot be read.
    pub fn load(&self) -> anyhow::Result<SynonymyIndex> {
        let start = Instant::now();
        let index = build_index_from_file(&self.wcvp, self.build_options())
            .with_context(|| format!("Failed to load WCVP checklist {}", self.wcvp.display()))?;

        let stats = index.stats();
        info!(
            "Loaded {} names in {} genera from {} rows ({} skipped, {} ambiguous keys) in {:.1?}",
            index.len(),
            index.genus_count(),
            stats.rows_read,
            stats.rows_skipped,
            stats.ambiguous_keys,
            start.elapsed()
        );
        Ok(index)
    }
}

/// Options controlling approximate matching
#[derive(clap::Args, Debug, Clone)]
pub struct MatchArgs {
    /// Approximate matching strategy
    #[arg(short, long, value_enum, default_value = "ratio")]
    pub approximate: ApproximateMode,

    /// Minimum similarity (0-100) for an approximate match
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub min_score: u32,
}

impl MatchArgs {
    /// The fuzzy matcher to use, or `None` for exact matching only
    pub fn matcher(&self) -> Option<FuzzyMatcher> {
        let config = MatcherConfig {
            min_score: self.min_score,
            ..MatcherConfig::default()
        };
        self.approximate
            .scorer()
            .map(|scorer| FuzzyMatcher::with_config(scorer, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_approximate_mode_aliases() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let wcvp = file.path().to_str().unwrap();

        for (value, expected) in [
            ("none", ApproximateMode::None),
            ("ratio", ApproximateMode::Ratio),
            ("thefuzz", ApproximateMode::Ratio),
            ("bounded-edit", ApproximateMode::BoundedEdit),
            ("regex", ApproximateMode::BoundedEdit),
        ] {
            let cli = parse(&["wcvp-solver", "lookup", "-w", wcvp, "-a", value, "Rosa"]).unwrap();
            let Commands::Lookup(args) = cli.command else {
                panic!("expected lookup");
            };
            assert_eq!(args.matching.approximate, expected);
        }
    }

    #[test]
    fn test_approximate_mode_scorer() {
        assert_eq!(ApproximateMode::None.scorer(), None);
        assert_eq!(ApproximateMode::Ratio.scorer(), Some(Scorer::Ratio));
        assert_eq!(ApproximateMode::BoundedEdit.scorer(), Some(Scorer::BoundedEdit));
        assert_eq!(ApproximateMode::default(), ApproximateMode::Ratio);
    }

    #[test]
    fn test_resolve_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let cli = parse(&["wcvp-solver", "resolve", "-i", path, "-w", path]).unwrap();
        assert!(!cli.debug);
        let Commands::Resolve(args) = cli.command else {
            panic!("expected resolve");
        };
        assert_eq!(args.column, 0);
        assert!(!args.original);
        assert!(!args.verbose);
        assert!(!args.reference.lower);
        assert_eq!(args.matching.approximate, ApproximateMode::Ratio);
        assert_eq!(args.matching.min_score, DEFAULT_MIN_SCORE);
        assert!(args.output.is_none());
    }

    #[test]
    fn test_global_debug_flag() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let cli = parse(&["wcvp-solver", "index", "-w", path, "-d"]).unwrap();
        assert!(cli.debug);
    }

    #[test]
    fn test_missing_wcvp_file_is_rejected() {
        let result = parse(&["wcvp-solver", "index", "-w", "/nonexistent/wcvp.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_min_score_range() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert!(parse(&["wcvp-solver", "lookup", "-w", path, "--min-score", "101", "Rosa"]).is_err());

        let cli = parse(&["wcvp-solver", "lookup", "-w", path, "--min-score", "80", "Rosa"]).unwrap();
        let Commands::Lookup(args) = cli.command else {
            panic!("expected lookup");
        };
        let matcher = args.matching.matcher().unwrap();
        assert_eq!(matcher.config().min_score, 80);
        assert_eq!(matcher.scorer(), Scorer::Ratio);
    }

    #[test]
    fn test_stdin_input_is_accepted() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert!(parse(&["wcvp-solver", "resolve", "-i", "-", "-w", path]).is_ok());
    }
}
