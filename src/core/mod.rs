//! Core data types for scientific name resolution.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`name`]: Genus extraction, name keys and tokenization of scientific names
//! - [`ReferenceRow`](record::ReferenceRow): One decoded row of the WCVP checklist
//! - [`Rank`](types::Rank), [`TaxonomicStatus`](types::TaxonomicStatus): Row classification
//!
//! ## Name Keys
//!
//! Homonyms are told apart by their authors, so the index is keyed on the
//! name followed by its author string:
//!
//! | Name | Authors | Key |
//! |------|---------|-----|
//! | Rosa canina | L. | `Rosa canina L.` |
//! | Rosa canina | | `Rosa canina` |
//!
//! Every name is also stored under its bare form so author-less input still
//! resolves.

pub mod name;
pub mod record;
pub mod types;
