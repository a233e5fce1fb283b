//! Synonymy index builder.
//!
//! The `IndexBuilder` ingests WCVP rows one at a time and accumulates the
//! name → accepted-name map. A key inserted again with a different accepted
//! name is flagged as ambiguous. Nothing is removed during ingestion: the
//! ambiguous keys are purged in [`IndexBuilder::finish`], which also groups
//! the surviving keys by genus and freezes everything into a
//! [`SynonymyIndex`].

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::catalog::index::SynonymyIndex;
use crate::core::name::{extract_genus, is_hybrid_marker, name_key, truncate_words};
use crate::core::record::{ReferenceRow, ReferenceRowError};
use crate::core::types::{Rank, TaxonomicStatus};

/// Options that change how keys are stored
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Lowercase the input side of every key (for all-lowercase input files)
    pub lowercase: bool,
}

/// What happened to a row that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    /// At least one key was inserted
    Stored,
    /// Genus rows carry nothing to resolve against
    Ignored,
}

/// Counters collected while building
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub rows_read: usize,
    pub rows_stored: usize,
    pub rows_ignored: usize,
    pub rows_skipped: usize,
    pub keys_inserted: usize,
    pub ambiguous_keys: usize,
    pub usable_keys: usize,
    pub genera: usize,
}

/// Accumulates synonymy mappings before they are frozen into an index
pub struct IndexBuilder {
    options: BuildOptions,

    /// Key -> accepted name key (latest insertion wins)
    synonymy: HashMap<String, String>,

    /// Preserve key order (first seen)
    key_order: Vec<String>,

    /// Keys seen with conflicting accepted names
    ambiguous: HashSet<String>,

    stats: BuildStats,
}

impl IndexBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            synonymy: HashMap::new(),
            key_order: Vec::new(),
            ambiguous: HashSet::new(),
            stats: BuildStats::default(),
        }
    }

    /// Decode and ingest one checklist line. Bad rows are logged and counted,
    /// never returned as errors.
    pub fn add_line(&mut self, line: &str) {
        match ReferenceRow::from_line(line) {
            Ok(row) => {
                // add_row does its own bookkeeping
                let _ = self.add_row(&row);
            }
            Err(e) => {
                self.stats.rows_read += 1;
                self.stats.rows_skipped += 1;
                debug!("Reference row not stored ({e}): '{}'", line.trim_end());
            }
        }
    }

    /// Ingest one decoded row, dispatching on its rank and status.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceRowError::UnsupportedStatus` when the status is not
    /// stored for the row's rank. The row is skipped; the builder remains
    /// usable.
    pub fn add_row(&mut self, row: &ReferenceRow) -> Result<RowOutcome, ReferenceRowError> {
        self.stats.rows_read += 1;

        let outcome = match row.rank {
            Rank::Genus => Ok(RowOutcome::Ignored),
            Rank::Species => self.add_species(row),
            Rank::Form | Rank::Subform | Rank::Subspecies | Rank::Subvariety | Rank::Variety => {
                self.add_infraspecific(row, 2)
            }
            Rank::InfraspecificName => {
                // Nothotaxa keep the hybrid marker within the species part
                let hybrid = row.taxon_name.split_whitespace().any(is_hybrid_marker);
                let words = if hybrid { 3 } else { 2 };
                self.add_infraspecific(row, words)
            }
        };

        match &outcome {
            Ok(RowOutcome::Stored) => self.stats.rows_stored += 1,
            Ok(RowOutcome::Ignored) => self.stats.rows_ignored += 1,
            Err(e) => {
                self.stats.rows_skipped += 1;
                debug!("'{}' not stored: {e}", row.kew_id);
            }
        }
        outcome
    }

    fn add_species(&mut self, row: &ReferenceRow) -> Result<RowOutcome, ReferenceRowError> {
        let (author, name) = accepted_side(row);
        self.insert_species(&row.authors, &row.taxon_name, author, name);
        Ok(RowOutcome::Stored)
    }

    /// Infraspecific rows are stored under their full name and under the
    /// name truncated to `words`, so the parent name resolves too.
    fn add_infraspecific(
        &mut self,
        row: &ReferenceRow,
        words: usize,
    ) -> Result<RowOutcome, ReferenceRowError> {
        if row.status == TaxonomicStatus::Unstated {
            return Err(ReferenceRowError::UnsupportedStatus {
                rank: row.rank,
                status: row.status,
            });
        }
        let (author, name) = accepted_side(row);
        self.insert_species(&row.authors, &row.taxon_name, author, name);
        let truncated = truncate_words(&row.taxon_name, words);
        self.insert_species(&row.authors, &truncated, author, name);
        Ok(RowOutcome::Stored)
    }

    /// Map a name (bare and with its authors) to an accepted name.
    ///
    /// When the accepted side is empty the input key maps to itself; some
    /// synonyms in the checklist have no accepted name.
    pub fn insert_species(
        &mut self,
        input_author: &str,
        input_name: &str,
        output_author: &str,
        output_name: &str,
    ) {
        let (input_author, input_name) = if self.options.lowercase {
            (input_author.to_lowercase(), input_name.to_lowercase())
        } else {
            (input_author.to_string(), input_name.to_string())
        };

        let input_key = name_key(&input_author, &input_name);
        let mut output_key = name_key(output_author, output_name);
        if output_key.is_empty() {
            output_key.clone_from(&input_key);
        }

        self.insert_key(input_name, output_key.clone());
        self.insert_key(input_key, output_key);
    }

    fn insert_key(&mut self, key: String, value: String) {
        self.stats.keys_inserted += 1;
        match self.synonymy.get_mut(&key) {
            Some(existing) => {
                if *existing != value {
                    self.ambiguous.insert(key);
                }
                *existing = value;
            }
            None => {
                self.key_order.push(key.clone());
                self.synonymy.insert(key, value);
            }
        }
    }

    /// Keys flagged so far
    pub fn ambiguous(&self) -> &HashSet<String> {
        &self.ambiguous
    }

    /// Purge ambiguous keys, group the rest by genus, and freeze the result
    pub fn finish(self) -> SynonymyIndex {
        let Self {
            synonymy: mut map,
            key_order,
            ambiguous,
            mut stats,
            ..
        } = self;

        debug!(
            "{} inputs stored, {} ambiguous",
            map.len(),
            ambiguous.len()
        );
        for key in &ambiguous {
            map.remove(key);
        }

        let keys: Vec<String> = key_order
            .into_iter()
            .filter(|k| !ambiguous.contains(k))
            .collect();

        let mut genus_order: Vec<String> = Vec::new();
        let mut genera: HashMap<String, Vec<String>> = HashMap::new();
        for key in &keys {
            let genus = extract_genus(key);
            genera
                .entry(genus)
                .or_insert_with_key(|g| {
                    genus_order.push(g.clone());
                    Vec::new()
                })
                .push(key.clone());
        }

        stats.ambiguous_keys = ambiguous.len();
        stats.usable_keys = keys.len();
        stats.genera = genus_order.len();
        debug!(
            "{} usable inputs stored, {} genera",
            stats.usable_keys, stats.genera
        );

        SynonymyIndex::new(map, keys, genera, genus_order, stats)
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}

/// Author and name a row resolves to
fn accepted_side(row: &ReferenceRow) -> (&str, &str) {
    if row.status.is_self_accepted() {
        (&row.authors, &row.taxon_name)
    } else {
        (&row.accepted_authors, &row.accepted_name)
    }
}
