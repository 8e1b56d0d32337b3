use indexmap::IndexMap;
use log::debug;
use std::collections::HashMap;

use super::fuzzy::FuzzyMatcher;
use crate::language_utils::TargetLanguage;
use crate::text::normalize;

/// One glossary row: an English phrase and its preferred translations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlossaryEntry {
    /// English phrase as written in the glossary
    pub english: String,
    /// Override per target; empty string means "no override"
    overrides: HashMap<TargetLanguage, String>,
}

impl GlossaryEntry {
    pub fn new(english: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            overrides: HashMap::new(),
        }
    }

    /// Set the override for one target
    pub fn with_override(mut self, lang: TargetLanguage, value: impl Into<String>) -> Self {
        self.set_override(lang, value);
        self
    }

    pub fn set_override(&mut self, lang: TargetLanguage, value: impl Into<String>) {
        self.overrides.insert(lang, value.into());
    }

    /// Override for `lang`, if one is set and non-empty
    pub fn override_for(&self, lang: TargetLanguage) -> Option<&str> {
        self.overrides
            .get(&lang)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    /// Same entry with every supported target present (blank when absent)
    fn completed(mut self) -> Self {
        for lang in TargetLanguage::ALL {
            self.overrides.entry(lang).or_default();
        }
        self
    }
}

/// Normalized, immutable lookup table over glossary entries.
///
/// Keys keep the position of the row that first introduced them; a later row with the
/// same normalized key replaces the entry in place. Fuzzy ties therefore resolve to the
/// earliest key in file order.
#[derive(Debug, Clone, Default)]
pub struct GlossaryIndex {
    entries: IndexMap<String, GlossaryEntry>,
    matcher: FuzzyMatcher,
}

impl GlossaryIndex {
    /// Build an index using the default matcher (ratio scorer, threshold 90)
    pub fn build<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = GlossaryEntry>,
    {
        Self::build_with_matcher(rows, FuzzyMatcher::default())
    }

    pub fn build_with_matcher<I>(rows: I, matcher: FuzzyMatcher) -> Self
    where
        I: IntoIterator<Item = GlossaryEntry>,
    {
        let mut entries = IndexMap::new();
        for row in rows {
            let key = normalize(&row.english);
            if key.is_empty() {
                continue;
            }
            if entries.insert(key.clone(), row.completed()).is_some() {
                debug!("Glossary key '{}' redefined, keeping the later row", key);
            }
        }

        Self { entries, matcher }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalized keys in index order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Resolve `text` with the matcher's configured threshold
    pub fn lookup(&self, text: &str) -> Option<&GlossaryEntry> {
        self.lookup_with_threshold(text, self.matcher.threshold())
    }

    /// Resolve `text`: exact normalized match first, then best fuzzy match at or above
    /// `fuzzy_threshold` (0-100).
    pub fn lookup_with_threshold(&self, text: &str, fuzzy_threshold: f64) -> Option<&GlossaryEntry> {
        if self.entries.is_empty() {
            return None;
        }

        let query = normalize(text);
        if let Some(entry) = self.entries.get(&query) {
            return Some(entry);
        }

        let (position, score) = self
            .matcher
            .find_best_match(&query, self.keys(), fuzzy_threshold)?;
        let (key, entry) = self.entries.get_index(position)?;
        debug!(
            "Fuzzy glossary match '{}' -> '{}' ({:?} score {:.1})",
            query,
            key,
            self.matcher.scorer(),
            score
        );
        Some(entry)
    }
}
