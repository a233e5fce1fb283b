//! Scientific name tokenization.
//!
//! A scientific name such as `Rosa canina var. dumalis Baker` is turned into
//! a list of lookup strings, longest first:
//!
//! ```text
//! Rosa canina var. dumalis Baker
//! Rosa canina var. dumalis
//! Rosa canina
//! ```
//!
//! `Rosa canina var.` is left out because it ends in a rank marker. Longer
//! strings are more specific, so they are always tried first.

/// The multiplication sign used to flag hybrid genera and nothotaxa
pub const HYBRID_MARKER: char = '×';

/// Infraspecific rank abbreviations that never end a lookup string
pub const INFRASPECIFIC_MARKERS: [&str; 20] = [
    "convar.",
    "f.",
    "grex",
    "lusus",
    "microgene",
    "modif.",
    "monstr.",
    "mut.",
    "nothosubsp.",
    "nothovar.",
    "proles",
    "provar.",
    "stirps",
    "subf.",
    "sublusus",
    "subproles",
    "subso",
    "subsp.",
    "subvar.",
    "var.",
];

/// Number of leading words checked for hybrid markers when tokenizing
const HYBRID_SCAN_WORDS: usize = 3;

/// True if the word carries the hybrid sign (`×`, `×Agropogon`, ...)
#[must_use]
pub fn is_hybrid_marker(word: &str) -> bool {
    word.contains(HYBRID_MARKER)
}

/// True if the word is an infraspecific rank abbreviation
#[must_use]
pub fn is_infraspecific_marker(word: &str) -> bool {
    INFRASPECIFIC_MARKERS.contains(&word)
}

/// Build the lookup key for a name: `"<name> <author>"`, or just the name
/// when there is no author.
///
/// # Examples
///
/// ```
/// use wcvp_solver::core::name::name_key;
///
/// assert_eq!(name_key("L.", "Rosa canina"), "Rosa canina L.");
/// assert_eq!(name_key("", "Rosa canina"), "Rosa canina");
/// ```
#[must_use]
pub fn name_key(author: &str, name: &str) -> String {
    if author.is_empty() {
        name.to_string()
    } else {
        format!("{name} {author}")
    }
}

/// First `n` words of a name, joined by single spaces
#[must_use]
pub fn truncate_words(name: &str, n: usize) -> String {
    name.split_whitespace().take(n).collect::<Vec<_>>().join(" ")
}

/// Extract the genus from a scientific name.
///
/// Hybrid genera are written with a leading marker (`× Triticosecale`), in
/// which case the genus spans the first two words.
///
/// # Examples
///
/// ```
/// use wcvp_solver::core::name::extract_genus;
///
/// assert_eq!(extract_genus("Rosa canina"), "Rosa");
/// assert_eq!(extract_genus("× Triticosecale rimpaui"), "× Triticosecale");
/// ```
#[must_use]
pub fn extract_genus(name: &str) -> String {
    let mut words = name.split_whitespace();
    match (words.next(), words.next()) {
        (Some(first), Some(second)) if is_hybrid_marker(first) => format!("{first} {second}"),
        (Some(first), _) => first.to_string(),
        (None, _) => String::new(),
    }
}

/// Split a scientific name into candidate lookup strings, longest first.
///
/// Every prefix of at least two words is a candidate, except prefixes ending
/// in an infraspecific marker. Hybrid markers among the first three words do
/// not count as a word of their own, so `Mentha × piperita` never yields
/// `Mentha ×`.
#[must_use]
pub fn tokenize(name: &str) -> Vec<String> {
    let words: Vec<&str> = name.split_whitespace().collect();

    let mut start = 1;
    if words.len() > 2 {
        start += words
            .iter()
            .take(HYBRID_SCAN_WORDS)
            .filter(|w| is_hybrid_marker(w))
            .count();
    }

    let mut tokens = Vec::new();
    for k in (start..words.len()).rev() {
        if is_infraspecific_marker(words[k]) {
            continue;
        }
        tokens.push(words[..=k].join(" "));
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_genus() {
        assert_eq!(extract_genus("Rosa canina"), "Rosa");
        assert_eq!(extract_genus("Rosa"), "Rosa");
        assert_eq!(extract_genus("× Triticosecale rimpaui"), "× Triticosecale");
        assert_eq!(extract_genus("Mentha × piperita"), "Mentha");
        assert_eq!(extract_genus(""), "");
    }

    #[test]
    fn test_tokenize_longest_first() {
        let tokens = tokenize("Rosa canina var. dumalis Baker");
        assert_eq!(
            tokens,
            vec![
                "Rosa canina var. dumalis Baker",
                "Rosa canina var. dumalis",
                "Rosa canina",
            ]
        );
    }

    #[test]
    fn test_tokenize_word_counts_strictly_decrease() {
        let tokens = tokenize("Abies alba subsp. apennina Brullo, Scelsi & Spamp.");
        let counts: Vec<usize> = tokens.iter().map(|t| t.split(' ').count()).collect();
        assert!(counts.windows(2).all(|w| w[0] > w[1]));
        for token in &tokens {
            let last = token.rsplit(' ').next().unwrap();
            assert!(!is_infraspecific_marker(last), "{token} ends in a marker");
        }
    }

    #[test]
    fn test_tokenize_single_word_is_empty() {
        assert!(tokenize("Rosa").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_hybrids() {
        assert_eq!(tokenize("Mentha × piperita"), vec!["Mentha × piperita"]);
        assert_eq!(
            tokenize("× Triticosecale rimpaui Wittm."),
            vec!["× Triticosecale rimpaui Wittm.", "× Triticosecale rimpaui"]
        );
        // Two-word names are never shifted, even with a marker
        assert_eq!(tokenize("× Triticosecale"), vec!["× Triticosecale"]);
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(tokenize("Rosa  canina\tL."), vec!["Rosa canina L.", "Rosa canina"]);
    }

    #[test]
    fn test_name_key_and_truncate() {
        assert_eq!(name_key("Mill.", "Abies alba"), "Abies alba Mill.");
        assert_eq!(name_key("", "Abies alba"), "Abies alba");
        assert_eq!(truncate_words("Abies alba var. acutifolia", 2), "Abies alba");
        assert_eq!(truncate_words("Abies", 3), "Abies");
    }
}
