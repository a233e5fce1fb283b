use std::collections::HashMap;

use crate::catalog::builder::BuildStats;

/// Read-only synonymy index produced by [`IndexBuilder::finish`].
///
/// [`IndexBuilder::finish`]: crate::catalog::builder::IndexBuilder::finish
#[derive(Debug)]
pub struct SynonymyIndex {
    /// Index: name key -> accepted name key
    synonymy: HashMap<String, String>,

    /// All usable keys in first-insertion order
    keys: Vec<String>,

    /// Index: genus -> keys belonging to it, in key order
    genera: HashMap<String, Vec<String>>,

    /// Genera in the order they were first seen
    genus_order: Vec<String>,

    stats: BuildStats,
}

impl SynonymyIndex {
    pub(crate) fn new(
        synonymy: HashMap<String, String>,
        keys: Vec<String>,
        genera: HashMap<String, Vec<String>>,
        genus_order: Vec<String>,
        stats: BuildStats,
    ) -> Self {
        Self {
            synonymy,
            keys,
            genera,
            genus_order,
            stats,
        }
    }

    /// Accepted name key for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.synonymy.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.synonymy.contains_key(key)
    }

    /// Keys whose genus is `genus`
    pub fn genus_names(&self, genus: &str) -> Option<&[String]> {
        self.genera.get(genus).map(Vec::as_slice)
    }

    pub fn has_genus(&self, genus: &str) -> bool {
        self.genera.contains_key(genus)
    }

    /// All genera, in first-seen order
    pub fn genera(&self) -> impl Iterator<Item = &str> {
        self.genus_order.iter().map(String::as_str)
    }

    /// All `(key, accepted)` pairs, in first-insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.keys.iter().filter_map(|k| {
            self.synonymy
                .get(k)
                .map(|accepted| (k.as_str(), accepted.as_str()))
        })
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Number of usable keys
    pub fn len(&self) -> usize {
        self.synonymy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.synonymy.is_empty()
    }

    pub fn genus_count(&self) -> usize {
        self.genus_order.len()
    }
}
