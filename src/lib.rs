//! # wcvp-solver
//!
//! A library for resolving scientific plant names to their accepted names in
//! the World Checklist of Vascular Plants (WCVP).
//!
//! Occurrence and trait datasets often carry outdated synonyms, misspellings,
//! or names with and without authors. `wcvp-solver` builds a synonymy index
//! from the WCVP checklist and maps each input name to one accepted name with
//! authors, or reports that it cannot do so unambiguously.
//!
//! ## Features
//!
//! - **Exact matching**: Tries the full name, then ever shorter leading parts
//! - **Ambiguity purge**: Keys that map to more than one accepted name are dropped
//! - **Approximate matching**: Fuzzy search within the stated genus, then
//!   within the closest matching genus
//! - **Two scorers**: Whole-string similarity ratio or bounded edit distance
//! - **Row pipeline**: Corrects one column of a tab-separated file
//!
//! ## Example
//!
//! ```rust
//! use wcvp_solver::{FuzzyMatcher, ResolutionEngine, Scorer};
//! use wcvp_solver::catalog::builder::BuildOptions;
//! use wcvp_solver::parsing::wcvp::build_index_from_text;
//!
//! let checklist = "\
//! kew_id|family|genus|species|infraspecies|taxon_name|authors|rank|taxonomic_status|accepted_kew_id|accepted_name|accepted_authors
//! 1-1|Rosaceae|Rosa|canina||Rosa canina|L.|SPECIES|Accepted|||
//! 2-1|Rosaceae|Rosa|lutetiana||Rosa lutetiana|Léman|SPECIES|Synonym|1-1|Rosa canina|L.
//! ";
//! let index = build_index_from_text(checklist, BuildOptions::default());
//! let engine = ResolutionEngine::with_matcher(&index, Some(FuzzyMatcher::new(Scorer::Ratio)));
//!
//! let resolution = engine.resolve("Rosa lutetiana").unwrap();
//! assert_eq!(resolution.accepted, "Rosa canina L.");
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Synonymy index building and lookup
//! - [`core`]: Name tokenization, ranks, statuses, and checklist rows
//! - [`matching`]: Fuzzy scorers and the resolution engine
//! - [`parsing`]: Readers for the checklist and for tab-separated input
//! - [`pipeline`]: Row-by-row correction of an input file
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::builder::{BuildOptions, IndexBuilder};
pub use catalog::index::SynonymyIndex;
pub use core::types::*;
pub use matching::engine::{MatchMethod, Resolution, ResolutionEngine};
pub use matching::scoring::{FuzzyMatcher, MatcherConfig, Scorer};
pub use pipeline::RowPipeline;
