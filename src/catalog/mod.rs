//! Synonymy index construction and storage.
//!
//! The index maps every known name (bare, and followed by its authors) to the
//! accepted name it should be corrected to. It is built in two phases:
//!
//! 1. [`IndexBuilder`](builder::IndexBuilder) ingests WCVP rows and records
//!    conflicting mappings as ambiguous
//! 2. [`IndexBuilder::finish`](builder::IndexBuilder::finish) purges ambiguous
//!    keys and groups the survivors by genus into a read-only
//!    [`SynonymyIndex`](index::SynonymyIndex)
//!
//! ## Example
//!
//! ```rust
//! use wcvp_solver::catalog::builder::IndexBuilder;
//!
//! let mut builder = IndexBuilder::default();
//! builder.add_line("1|Rosaceae|Rosa|canina||Rosa canina|L.|SPECIES|Accepted|||");
//! builder.add_line("2|Rosaceae|Rosa|lutetiana||Rosa lutetiana|Léman|SPECIES|Synonym||Rosa canina|L.");
//!
//! let index = builder.finish();
//! assert_eq!(index.get("Rosa lutetiana"), Some("Rosa canina L."));
//! assert_eq!(index.genus_names("Rosa").map(<[String]>::len), Some(4));
//! ```

pub mod builder;
pub mod index;
