//! Readers for the reference checklist and for user input rows.
//!
//! This module provides:
//!
//! - **WCVP checklist**: pipe-delimited rows, plain or gzip compressed,
//!   turned into a [`SynonymyIndex`](crate::catalog::index::SynonymyIndex)
//! - **TSV input**: tab-separated rows decoded lossily from UTF-8, and the
//!   [`ColumnLayout`](tsv::ColumnLayout) used to write corrected rows back
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wcvp_solver::catalog::builder::BuildOptions;
//! use wcvp_solver::parsing::wcvp::build_index_from_file;
//!
//! let index = build_index_from_file(Path::new("wcvp.txt.gz"), BuildOptions::default()).unwrap();
//! println!("{} names in {} genera", index.len(), index.genus_count());
//! ```
//!
//! ## Checklist Columns
//!
//! | Position | Column | Used |
//! |----------|--------|------|
//! | 0  | kew_id | Logging |
//! | 5  | taxon_name | Yes |
//! | 6  | authors | Yes |
//! | 7  | rank | Yes |
//! | 8  | taxonomic_status | Yes |
//! | 10 | accepted_name | Yes |
//! | 11 | accepted_authors | Yes |

pub mod tsv;
pub mod wcvp;
