//! Name resolution engine and fuzzy scoring.
//!
//! This module provides the core matching functionality:
//!
//! - [`ResolutionEngine`](engine::ResolutionEngine): Main entry point for resolving a name
//! - [`FuzzyMatcher`](scoring::FuzzyMatcher): Approximate matching under a [`Scorer`](scoring::Scorer)
//! - [`MatchMethod`](engine::MatchMethod): Which strategy resolved a name, and how well
//!
//! ## Matching Algorithm
//!
//! For each name the engine tries, in order:
//!
//! 1. **Exact token match**: the name and its shorter prefixes are looked up
//!    directly, longest first
//! 2. **Approximate match within the stated genus**: each token is fuzzy
//!    matched against the names of the genus as written
//! 3. **Approximate match within approximated genera**: when the genus itself
//!    is unknown, it is fuzzy matched first and the names of every tied genus
//!    are searched
//!
//! Approximate matches must be unique: a tie at the best score is no match.
//!
//! ## Scoring
//!
//! Two interchangeable strategies score on a 0-100 scale:
//!
//! - **Ratio**: indel similarity of the lowercased, punctuation-free strings
//! - **Bounded edit**: approximate substring search with edit budgets of
//!   2.5 %, 5 %, 7.5 % and 10 % of the target length
//!
//! ## Example
//!
//! ```rust
//! use wcvp_solver::catalog::builder::IndexBuilder;
//! use wcvp_solver::matching::engine::ResolutionEngine;
//! use wcvp_solver::matching::scoring::{FuzzyMatcher, Scorer};
//!
//! let mut builder = IndexBuilder::default();
//! builder.add_line("1|Rosaceae|Rosa|gallica||Rosa gallica|L.|SPECIES|Accepted|||");
//! let index = builder.finish();
//!
//! let engine = ResolutionEngine::with_matcher(&index, Some(FuzzyMatcher::new(Scorer::Ratio)));
//! let resolution = engine.resolve("Rosa galica").unwrap();
//! assert_eq!(resolution.accepted, "Rosa gallica L.");
//! println!("{}", resolution.method);
//! ```

pub mod engine;
pub mod scoring;
