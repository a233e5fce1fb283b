use serde::Serialize;
use tracing::debug;

use crate::catalog::index::SynonymyIndex;
use crate::core::name::{extract_genus, tokenize};
use crate::matching::scoring::{FuzzyMatcher, MatchMode};

/// How a name was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchMethod {
    /// A token was a known key. `position` is 100 for the full name and
    /// drops for shorter tokens.
    Exact { position: u32 },
    /// Approximate token match among the names of the stated genus
    StatedGenus { score: u32 },
    /// Approximate token match among the names of approximately matched genera
    ApproximatedGenus { genus_score: u32, score: u32 },
}

impl MatchMethod {
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact { .. })
    }
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact { position } => write!(f, "exact token match ({position}%)"),
            Self::StatedGenus { score } => {
                write!(f, "approximate match within stated genus ({score}%)")
            }
            Self::ApproximatedGenus { genus_score, score } => write!(
                f,
                "approximate match within approximated ({genus_score}%) genus ({score}%)"
            ),
        }
    }
}

/// Result of resolving one name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The name as given
    pub query: String,

    /// Index key that matched
    pub token: String,

    /// Accepted name (with authors)
    pub accepted: String,

    pub method: MatchMethod,
}

/// Candidate names for the approximate pass
struct CandidateSet<'i> {
    names: Vec<&'i str>,
    genus_score: Option<u32>,
}

/// Resolves scientific names against a synonymy index
pub struct ResolutionEngine<'a> {
    index: &'a SynonymyIndex,
    /// `None` disables approximate matching
    matcher: Option<FuzzyMatcher>,
}

impl<'a> ResolutionEngine<'a> {
    /// Create an engine doing exact matching only
    pub fn new(index: &'a SynonymyIndex) -> Self {
        Self {
            index,
            matcher: None,
        }
    }

    /// Create an engine that falls back to approximate matching
    pub fn with_matcher(index: &'a SynonymyIndex, matcher: Option<FuzzyMatcher>) -> Self {
        Self { index, matcher }
    }

    /// Resolve a name to its accepted name.
    ///
    /// Exact matches always win over approximate ones, and longer tokens are
    /// tried before shorter ones at every stage. Returns `None` if nothing
    /// matched.
    pub fn resolve(&self, name: &str) -> Option<Resolution> {
        debug!("working on '{name}'...");
        let genus = extract_genus(name);
        let tokens = tokenize(name);

        self.resolve_exact(&genus, &tokens)
            .or_else(|| self.resolve_approximate(&genus, &tokens))
            .map(|(token, accepted, method)| Resolution {
                query: name.to_string(),
                token,
                accepted,
                method,
            })
    }

    fn resolve_exact(&self, genus: &str, tokens: &[String]) -> Option<(String, String, MatchMethod)> {
        // Every key lives under its genus, so an unknown genus has no keys
        if !self.index.has_genus(genus) {
            return None;
        }

        let total = tokens.len();
        tokens.iter().enumerate().find_map(|(t, token)| {
            debug!("looking for exact matches to '{token}'...");
            let accepted = self.index.get(token)?;
            debug!("found '{token}' => '{accepted}'");
            Some((
                token.clone(),
                accepted.to_string(),
                MatchMethod::Exact {
                    position: position_percent(t, total),
                },
            ))
        })
    }

    fn resolve_approximate(
        &self,
        genus: &str,
        tokens: &[String],
    ) -> Option<(String, String, MatchMethod)> {
        let matcher = self.matcher.as_ref()?;
        let candidates = self.candidate_names(matcher, genus)?;

        tokens.iter().find_map(|token| {
            let found = matcher.find(candidates.names.iter().copied(), token, MatchMode::One);
            let key = found.unique()?;
            let accepted = self.index.get(key)?;
            debug!("approximate match found '{key}' => '{accepted}'");

            let method = match candidates.genus_score {
                None => MatchMethod::StatedGenus { score: found.score },
                Some(genus_score) => MatchMethod::ApproximatedGenus {
                    genus_score,
                    score: found.score,
                },
            };
            Some((key.to_string(), accepted.to_string(), method))
        })
    }

    /// Names of the stated genus, or of every genus approximately matching it
    fn candidate_names(&self, matcher: &FuzzyMatcher, genus: &str) -> Option<CandidateSet<'a>> {
        let index: &'a SynonymyIndex = self.index;

        if let Some(names) = index.genus_names(genus) {
            debug!("trying approximate matches within {genus}...");
            return Some(CandidateSet {
                names: names.iter().map(String::as_str).collect(),
                genus_score: None,
            });
        }

        let genera = matcher.find(index.genera(), genus, MatchMode::All);
        if !genera.is_match() {
            return None;
        }
        debug!(
            "trying approximate matches within {}...",
            genera.candidates.join(", ")
        );

        let names: Vec<&'a str> = genera
            .candidates
            .iter()
            .filter_map(|g| index.genus_names(g))
            .flatten()
            .map(String::as_str)
            .collect();
        if names.is_empty() {
            return None;
        }

        Some(CandidateSet {
            names,
            genus_score: Some(genera.score),
        })
    }
}

/// Position of token `t` out of `total` as a percentage, 100 for the first
#[allow(clippy::cast_possible_truncation)]
fn position_percent(t: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100 * (total - t) / total) as u32
}
