use rapidfuzz::distance::{indel, levenshtein};
use serde::Serialize;

/// Default minimum similarity (0-100) for an approximate match
pub const DEFAULT_MIN_SCORE: u32 = 90;

/// Default relative error tolerances for bounded edit matching
pub const DEFAULT_ERROR_RATES: [f64; 4] = [0.025, 0.050, 0.075, 0.100];

/// Only the best few ratio-scored candidates compete for the top score
const RATIO_CANDIDATE_LIMIT: usize = 5;

/// Safely convert usize to f64 for score calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Strategy used to score approximate matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    /// Normalized indel similarity of the whole strings
    Ratio,
    /// Approximate substring search under growing edit budgets
    BoundedEdit,
}

impl std::fmt::Display for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ratio => write!(f, "ratio"),
            Self::BoundedEdit => write!(f, "bounded-edit"),
        }
    }
}

/// How many of the tied best candidates to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// A single best candidate
    One,
    /// Every candidate tied at the best score
    All,
}

/// Configuration for the fuzzy matcher
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Minimum score a best candidate needs to count as a match
    pub min_score: u32,
    /// Relative error tolerances for [`Scorer::BoundedEdit`], tried in order
    pub error_rates: Vec<f64>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            error_rates: DEFAULT_ERROR_RATES.to_vec(),
        }
    }
}

/// Outcome of a fuzzy search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch<'a> {
    /// Number of candidates tied at the best score (0 if below threshold)
    pub count: usize,

    /// Best score seen, even when it is below the threshold
    pub score: u32,

    /// Best candidates; at most one in [`MatchMode::One`]
    pub candidates: Vec<&'a str>,
}

impl<'a> FuzzyMatch<'a> {
    fn none(score: u32) -> Self {
        Self {
            count: 0,
            score,
            candidates: Vec::new(),
        }
    }

    /// The winning candidate when exactly one candidate reached the best score
    pub fn unique(&self) -> Option<&'a str> {
        if self.count == 1 {
            self.candidates.first().copied()
        } else {
            None
        }
    }

    pub fn is_match(&self) -> bool {
        self.count > 0
    }
}

/// Fuzzy matcher with a scoring strategy chosen once at startup
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    scorer: Scorer,
    config: MatcherConfig,
}

impl FuzzyMatcher {
    pub fn new(scorer: Scorer) -> Self {
        Self {
            scorer,
            config: MatcherConfig::default(),
        }
    }

    pub fn with_config(scorer: Scorer, config: MatcherConfig) -> Self {
        Self { scorer, config }
    }

    pub fn scorer(&self) -> Scorer {
        self.scorer
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Find the candidates most similar to `target`.
    ///
    /// Candidates are scored with the configured strategy. If the best score
    /// reaches the minimum, every candidate with that score is a match.
    pub fn find<'a, I>(&self, candidates: I, target: &str, mode: MatchMode) -> FuzzyMatch<'a>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let scored = match self.scorer {
            Scorer::Ratio => score_by_ratio(candidates, target),
            Scorer::BoundedEdit => score_by_bounded_edit(candidates, target, &self.config.error_rates),
        };

        let Some(maximum) = scored.iter().map(|&(_, score)| score).max() else {
            return FuzzyMatch::none(0);
        };
        if maximum < self.config.min_score {
            return FuzzyMatch::none(maximum);
        }

        let mut best: Vec<&'a str> = scored
            .into_iter()
            .filter(|&(_, score)| score == maximum)
            .map(|(candidate, _)| candidate)
            .collect();
        let count = best.len();
        if mode == MatchMode::One {
            best.truncate(1);
        }

        FuzzyMatch {
            count,
            score: maximum,
            candidates: best,
        }
    }
}

/// Score candidates by [`ratio`], keeping only the best few
fn score_by_ratio<'a, I>(candidates: I, target: &str) -> Vec<(&'a str, u32)>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = default_process(target);

    let mut scored: Vec<(&'a str, f64)> = candidates
        .into_iter()
        .map(|candidate| (candidate, indel_ratio(&query, &default_process(candidate))))
        .collect();

    // Stable sort keeps input order among equal scores
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored
        .into_iter()
        .take(RATIO_CANDIDATE_LIMIT)
        .map(|(candidate, similarity)| (candidate, round_score(similarity)))
        .collect()
}

/// Score candidates that contain an approximate occurrence of `target`.
///
/// Edit budgets grow with [`edit_budgets`]; the first budget yielding any
/// hit decides the result.
fn score_by_bounded_edit<'a, I>(candidates: I, target: &str, error_rates: &[f64]) -> Vec<(&'a str, u32)>
where
    I: IntoIterator<Item = &'a str>,
{
    let pattern: Vec<char> = target.chars().collect();
    let budgets = edit_budgets(pattern.len(), error_rates);
    let Some(&widest) = budgets.last() else {
        return Vec::new();
    };

    // Distances beyond the widest budget never count, so they are not kept
    let distances: Vec<(&'a str, usize)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let text: Vec<char> = candidate.chars().collect();
            bounded_substring_distance(&pattern, &text, widest).map(|edits| (candidate, edits))
        })
        .collect();

    budgets
        .into_iter()
        .map(|budget| {
            distances
                .iter()
                .filter(|&&(_, edits)| edits <= budget)
                .map(|&(candidate, edits)| (candidate, edit_score(edits, pattern.len())))
                .collect::<Vec<_>>()
        })
        .find(|hits| !hits.is_empty())
        .unwrap_or_default()
}

/// Similarity (0-100) of two names after default processing.
///
/// # Examples
///
/// ```
/// use wcvp_solver::matching::scoring::ratio;
///
/// assert_eq!(ratio("Rosa canina", "rosa canina"), 100);
/// assert_eq!(ratio("Rosa canina", "Rosa caninb"), 91);
/// ```
#[must_use]
pub fn ratio(a: &str, b: &str) -> u32 {
    round_score(indel_ratio(&default_process(a), &default_process(b)))
}

/// Lowercase, replace anything that is not alphanumeric by a space, trim
#[must_use]
pub fn default_process(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .trim()
        .to_lowercase()
}

/// Normalized indel similarity in percent, 0.0 if either side is empty
fn indel_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let distance = indel::distance(a.chars(), b.chars());
    100.0 * (1.0 - count_to_f64(distance) / count_to_f64(total))
}

/// Round half to even, then clamp to 0-100
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_score(similarity: f64) -> u32 {
    similarity.round_ties_even().clamp(0.0, 100.0) as u32
}

/// `100 * (1 - edits / len)`, truncated
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn edit_score(edits: usize, len: usize) -> u32 {
    if len == 0 {
        return 0;
    }
    (100.0 * (1.0 - count_to_f64(edits) / count_to_f64(len))).max(0.0) as u32
}

/// Absolute edit budgets for a pattern of `len` characters.
///
/// Each rate gives `floor(rate * len)`. A budget equal to the one before it
/// is skipped, and the sequence starts from zero, so an exact (zero-edit)
/// search is never part of it.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn edit_budgets(len: usize, error_rates: &[f64]) -> Vec<usize> {
    let mut budgets = Vec::new();
    let mut previous = 0usize;
    for &rate in error_rates {
        let budget = (rate * count_to_f64(len)) as usize;
        if budget == previous {
            continue;
        }
        previous = budget;
        budgets.push(budget);
    }
    budgets
}

/// Fewest Levenshtein edits turning `pattern` into some substring of `text`,
/// or `None` if every substring needs more than `max_edits`.
///
/// A substring within `max_edits` differs in length from the pattern by at
/// most `max_edits`, so only windows of those lengths are compared.
#[must_use]
pub fn bounded_substring_distance(pattern: &[char], text: &[char], max_edits: usize) -> Option<usize> {
    let shortest = pattern.len().saturating_sub(max_edits);
    let longest = (pattern.len() + max_edits).min(text.len());

    let mut best: Option<usize> = None;
    for width in shortest..=longest {
        for window in windows_of(text, width) {
            let edits = levenshtein::distance(pattern.iter().copied(), window.iter().copied());
            if edits <= max_edits && best.map_or(true, |b| edits < b) {
                best = Some(edits);
                if edits == 0 {
                    return best;
                }
            }
        }
    }
    best
}

/// Every contiguous run of `width` characters, including the empty run
fn windows_of(text: &[char], width: usize) -> impl Iterator<Item = &[char]> {
    let count = if width == 0 { 1 } else { text.len() + 1 - width };
    (0..count).map(move |start| &text[start..start + width])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_default_process() {
        assert_eq!(default_process("  Rosa canina L. "), "rosa canina l");
        assert_eq!(default_process("× Triticosecale"), "triticosecale");
        assert_eq!(default_process("..."), "");
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio("Rosa canina", "Rosa canina"), 100);
        // One substitution in 11 characters: 2*10/22
        assert_eq!(ratio("Rosa canina", "Rosa caninb"), 91);
        // One deletion: 2*10/21 = 95.2
        assert_eq!(ratio("Rosa canna", "Rosa canina"), 95);
        assert_eq!(ratio("Rosa", "Abies"), 22);
        assert_eq!(ratio("", "Rosa"), 0);
    }

    #[test]
    fn test_round_score_ties_to_even() {
        assert_eq!(round_score(90.5), 90);
        assert_eq!(round_score(91.5), 92);
        assert_eq!(round_score(89.6), 90);
    }

    #[test]
    fn test_edit_budgets() {
        // 11 characters: 0, 0, 0, 1
        assert_eq!(edit_budgets(11, &DEFAULT_ERROR_RATES), vec![1]);
        // 40 characters: 1, 2, 3, 4
        assert_eq!(edit_budgets(40, &DEFAULT_ERROR_RATES), vec![1, 2, 3, 4]);
        // 20 characters: 0, 1, 1, 2
        assert_eq!(edit_budgets(20, &DEFAULT_ERROR_RATES), vec![1, 2]);
        assert!(edit_budgets(5, &DEFAULT_ERROR_RATES).is_empty());
    }

    #[test]
    fn test_bounded_substring_distance() {
        let text = chars("Rosa canina L.");
        assert_eq!(bounded_substring_distance(&chars("canina"), &text, 0), Some(0));
        assert_eq!(bounded_substring_distance(&chars("caninb"), &text, 1), Some(1));
        assert_eq!(bounded_substring_distance(&chars("caninb"), &text, 0), None);
        // One deletion inside the text
        assert_eq!(bounded_substring_distance(&chars("Rosa cannina"), &text, 2), Some(1));
        assert_eq!(bounded_substring_distance(&chars("abc"), &chars(""), 1), None);
        assert_eq!(bounded_substring_distance(&chars(""), &chars("abc"), 0), Some(0));
    }

    #[test]
    fn test_bounded_edit_prefers_smallest_budget() {
        let matcher = FuzzyMatcher::new(Scorer::BoundedEdit);
        // 40 characters, budgets 1 to 4: the one-edit name wins over the three-edit one
        let names = [
            "Quercus robur subsp. pedunculiflora Mill",
            "Quercus robur subsp. pedunculiflxxx Mill",
        ];
        let found = matcher.find(names, "Quercus robur subsp. pedunculiflorb Mill", MatchMode::All);
        assert_eq!(found.count, 1);
        assert_eq!(found.score, 97);
        assert_eq!(found.candidates, vec!["Quercus robur subsp. pedunculiflora Mill"]);
    }

    #[test]
    fn test_ratio_matcher_threshold() {
        let matcher = FuzzyMatcher::new(Scorer::Ratio);
        let names = ["Rosa canina", "Rosa gallica"];

        let found = matcher.find(names, "Rosa caninb", MatchMode::One);
        assert_eq!(found.count, 1);
        assert_eq!(found.score, 91);
        assert_eq!(found.unique(), Some("Rosa canina"));

        let missed = matcher.find(names, "Rosa cxnixb", MatchMode::One);
        assert_eq!(missed.count, 0);
        assert!(missed.score < DEFAULT_MIN_SCORE);
        assert_eq!(missed.unique(), None);
    }

    #[test]
    fn test_ratio_matcher_ties() {
        let matcher = FuzzyMatcher::new(Scorer::Ratio);
        let genera = ["Rosb", "Rosc", "Abies"];
        let config = MatcherConfig {
            min_score: 70,
            ..MatcherConfig::default()
        };
        let matcher = FuzzyMatcher::with_config(matcher.scorer(), config);

        let all = matcher.find(genera, "Rosa", MatchMode::All);
        assert_eq!(all.count, 2);
        assert_eq!(all.score, 75);
        assert_eq!(all.candidates, vec!["Rosb", "Rosc"]);

        let one = matcher.find(genera, "Rosa", MatchMode::One);
        assert_eq!(one.count, 2);
        assert_eq!(one.candidates.len(), 1);
        assert_eq!(one.unique(), None);
    }

    #[test]
    fn test_bounded_edit_matcher() {
        let matcher = FuzzyMatcher::new(Scorer::BoundedEdit);
        let names = [
            "Quercus robur subsp. pedunculiflora",
            "Quercus petraea (Matt.) Liebl.",
        ];

        // 20 characters, budgets 1 then 2; one substitution found at budget 1
        let found = matcher.find(names, "Quercus robur subsq.", MatchMode::One);
        assert_eq!(found.count, 1);
        assert_eq!(found.score, 95);
        assert_eq!(found.unique(), Some("Quercus robur subsp. pedunculiflora"));
    }

    #[test]
    fn test_bounded_edit_short_targets_never_match() {
        let matcher = FuzzyMatcher::new(Scorer::BoundedEdit);
        let found = matcher.find(["Rosa canina"], "Rosa", MatchMode::All);
        assert!(!found.is_match());
        assert_eq!(found.score, 0);
    }

    #[test]
    fn test_empty_candidates() {
        for scorer in [Scorer::Ratio, Scorer::BoundedEdit] {
            let matcher = FuzzyMatcher::new(scorer);
            let found = matcher.find(std::iter::empty(), "Rosa canina", MatchMode::All);
            assert_eq!(found, FuzzyMatch::none(0));
        }
    }
}
