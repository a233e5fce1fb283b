use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::record::ReferenceRowError;

/// Taxonomic rank of a WCVP name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Form,
    Genus,
    InfraspecificName,
    Species,
    Subform,
    Subspecies,
    Subvariety,
    Variety,
}

impl FromStr for Rank {
    type Err = ReferenceRowError;

    /// WCVP releases disagree on case (`SPECIES` vs `Species`), so matching
    /// ignores it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "form" => Ok(Self::Form),
            "genus" => Ok(Self::Genus),
            "infraspecificname" => Ok(Self::InfraspecificName),
            "species" => Ok(Self::Species),
            "subform" => Ok(Self::Subform),
            "subspecies" => Ok(Self::Subspecies),
            "subvariety" => Ok(Self::Subvariety),
            "variety" => Ok(Self::Variety),
            _ => Err(ReferenceRowError::UnknownRank(s.to_string())),
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form => write!(f, "Form"),
            Self::Genus => write!(f, "Genus"),
            Self::InfraspecificName => write!(f, "InfraspecificName"),
            Self::Species => write!(f, "Species"),
            Self::Subform => write!(f, "Subform"),
            Self::Subspecies => write!(f, "Subspecies"),
            Self::Subvariety => write!(f, "Subvariety"),
            Self::Variety => write!(f, "Variety"),
        }
    }
}

/// Taxonomic status of a WCVP name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomicStatus {
    Accepted,
    ArtificialHybrid,
    HomotypicSynonym,
    Synonym,
    Unplaced,
    /// Empty status field. A handful of species rows have no status but do
    /// carry an accepted name.
    Unstated,
}

impl TaxonomicStatus {
    /// Statuses under which a name is its own accepted name
    #[must_use]
    pub fn is_self_accepted(self) -> bool {
        matches!(self, Self::Accepted | Self::ArtificialHybrid | Self::Unplaced)
    }
}

impl FromStr for TaxonomicStatus {
    type Err = ReferenceRowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', " ");
        match normalized.as_str() {
            "accepted" => Ok(Self::Accepted),
            "artificial hybrid" => Ok(Self::ArtificialHybrid),
            "homotypic synonym" => Ok(Self::HomotypicSynonym),
            "synonym" => Ok(Self::Synonym),
            "unplaced" => Ok(Self::Unplaced),
            "" => Ok(Self::Unstated),
            _ => Err(ReferenceRowError::UnknownStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaxonomicStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Accepted => write!(f, "Accepted"),
            Self::ArtificialHybrid => write!(f, "Artificial Hybrid"),
            Self::HomotypicSynonym => write!(f, "Homotypic Synonym"),
            Self::Synonym => write!(f, "Synonym"),
            Self::Unplaced => write!(f, "Unplaced"),
            Self::Unstated => write!(f, ""),
        }
    }
}
