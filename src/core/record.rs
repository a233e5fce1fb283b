use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{Rank, TaxonomicStatus};

/// Field separator of the WCVP checklist
pub const WCVP_DELIMITER: char = '|';

const KEW_ID: usize = 0;
const FAMILY: usize = 1;
const GENUS: usize = 2;
const SPECIES: usize = 3;
const INFRASPECIES: usize = 4;
const TAXON_NAME: usize = 5;
const AUTHORS: usize = 6;
const RANK: usize = 7;
const TAXONOMIC_STATUS: usize = 8;
const ACCEPTED_NAME: usize = 10;
const ACCEPTED_AUTHORS: usize = 11;

/// Minimum number of fields a usable row must have
pub const MIN_FIELDS: usize = ACCEPTED_AUTHORS + 1;

/// Why a reference row was not stored. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceRowError {
    #[error("expected at least {MIN_FIELDS} fields, found {0}")]
    TooFewFields(usize),

    #[error("unknown rank '{0}'")]
    UnknownRank(String),

    #[error("unknown taxonomic status '{0}'")]
    UnknownStatus(String),

    #[error("status '{status}' is not stored for rank {rank}")]
    UnsupportedStatus {
        rank: Rank,
        status: TaxonomicStatus,
    },
}

/// One decoded row of the WCVP checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub kew_id: String,
    pub family: String,
    pub genus: String,
    pub species: String,
    pub infraspecies: String,
    pub taxon_name: String,
    pub authors: String,
    pub rank: Rank,
    pub status: TaxonomicStatus,
    pub accepted_name: String,
    pub accepted_authors: String,
}

impl ReferenceRow {
    /// Decode a pipe-delimited checklist line.
    ///
    /// # Errors
    ///
    /// Returns `ReferenceRowError::TooFewFields` for short lines, or
    /// `UnknownRank`/`UnknownStatus` when those columns are not recognized.
    pub fn from_line(line: &str) -> Result<Self, ReferenceRowError> {
        let fields: Vec<&str> = line.trim_end().split(WCVP_DELIMITER).collect();
        Self::from_fields(&fields)
    }

    /// Decode a row from already-split fields
    ///
    /// # Errors
    ///
    /// See [`ReferenceRow::from_line`].
    pub fn from_fields(fields: &[&str]) -> Result<Self, ReferenceRowError> {
        if fields.len() < MIN_FIELDS {
            return Err(ReferenceRowError::TooFewFields(fields.len()));
        }

        Ok(Self {
            kew_id: fields[KEW_ID].to_string(),
            family: fields[FAMILY].to_string(),
            genus: fields[GENUS].to_string(),
            species: fields[SPECIES].to_string(),
            infraspecies: fields[INFRASPECIES].to_string(),
            taxon_name: fields[TAXON_NAME].to_string(),
            authors: fields[AUTHORS].to_string(),
            rank: fields[RANK].parse()?,
            status: fields[TAXONOMIC_STATUS].parse()?,
            accepted_name: fields[ACCEPTED_NAME].to_string(),
            accepted_authors: fields[ACCEPTED_AUTHORS].to_string(),
        })
    }

    /// Builder-style constructor for tests and programmatic use
    pub fn new(
        kew_id: impl Into<String>,
        taxon_name: impl Into<String>,
        authors: impl Into<String>,
        rank: Rank,
        status: TaxonomicStatus,
    ) -> Self {
        let taxon_name = taxon_name.into();
        let mut words = taxon_name.split_whitespace();
        let genus = words.next().unwrap_or_default().to_string();
        let species = words.next().unwrap_or_default().to_string();
        Self {
            kew_id: kew_id.into(),
            family: String::new(),
            genus,
            species,
            infraspecies: String::new(),
            taxon_name,
            authors: authors.into(),
            rank,
            status,
            accepted_name: String::new(),
            accepted_authors: String::new(),
        }
    }

    #[must_use]
    pub fn with_accepted(
        mut self,
        accepted_name: impl Into<String>,
        accepted_authors: impl Into<String>,
    ) -> Self {
        self.accepted_name = accepted_name.into();
        self.accepted_authors = accepted_authors.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "12345-1|Rosaceae|Rosa|canina||Rosa canina|L.|SPECIES|Accepted|||||||N|Sp. Pl.|\n";

    #[test]
    fn test_from_line() {
        let row = ReferenceRow::from_line(LINE).unwrap();
        assert_eq!(row.kew_id, "12345-1");
        assert_eq!(row.family, "Rosaceae");
        assert_eq!(row.taxon_name, "Rosa canina");
        assert_eq!(row.authors, "L.");
        assert_eq!(row.rank, Rank::Species);
        assert_eq!(row.status, TaxonomicStatus::Accepted);
        assert!(row.accepted_name.is_empty());
    }

    #[test]
    fn test_synonym_line() {
        let line = "2-1|Rosaceae|Rosa|lutetiana||Rosa lutetiana|Léman|SPECIES|Synonym|12345-1|Rosa canina|L.";
        let row = ReferenceRow::from_line(line).unwrap();
        assert_eq!(row.status, TaxonomicStatus::Synonym);
        assert_eq!(row.accepted_name, "Rosa canina");
        assert_eq!(row.accepted_authors, "L.");
    }

    #[test]
    fn test_too_few_fields() {
        assert_eq!(
            ReferenceRow::from_line("1|Rosaceae|Rosa"),
            Err(ReferenceRowError::TooFewFields(3))
        );
    }

    #[test]
    fn test_unknown_status() {
        let line = "3-1|Rosaceae|Rosa|x||Rosa x|L.|SPECIES|Misapplied||||";
        assert!(matches!(
            ReferenceRow::from_line(line),
            Err(ReferenceRowError::UnknownStatus(s)) if s == "Misapplied"
        ));
    }
}
