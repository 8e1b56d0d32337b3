/*!
 * Fuzzy matching for glossary keys.
 *
 * Scores are on a 0-100 scale. The default scorer is the indel ratio
 * (`200 * LCS / (len_a + len_b)`), the usual "ratio" of fuzzy string matching
 * libraries. A normalized Levenshtein scorer is available as a stricter alternative.
 */

use serde::{Deserialize, Serialize};

/// Similarity measure used for fuzzy lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuzzyScorer {
    /// Insert/delete distance ratio
    #[default]
    Ratio,
    /// Normalized Levenshtein distance
    Levenshtein,
}

impl FuzzyScorer {
    /// Similarity between two strings, 0.0-100.0
    pub fn score(&self, a: &str, b: &str) -> f64 {
        let a_chars: Vec<char> = a.chars().collect();
        let b_chars: Vec<char> = b.chars().collect();
        let total = a_chars.len() + b_chars.len();

        if total == 0 {
            return 100.0;
        }

        match self {
            Self::Ratio => {
                let lcs = lcs_length(&a_chars, &b_chars);
                200.0 * lcs as f64 / total as f64
            }
            Self::Levenshtein => {
                let max_len = a_chars.len().max(b_chars.len());
                let distance = levenshtein_distance(&a_chars, &b_chars);
                100.0 * (1.0 - distance as f64 / max_len as f64)
            }
        }
    }
}

/// Fuzzy matcher with a score threshold and an optional length gate
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    scorer: FuzzyScorer,
    /// Minimum score for a match (0-100)
    threshold: f64,
    /// Minimum `shorter / longer` length ratio for a candidate to be scored at all.
    /// 0.0 disables the gate.
    min_length_ratio: f64,
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self {
            scorer: FuzzyScorer::default(),
            threshold: 90.0,
            min_length_ratio: 0.0,
        }
    }
}

impl FuzzyMatcher {
    /// Create a new fuzzy matcher with custom threshold
    pub fn new(scorer: FuzzyScorer, threshold: f64) -> Self {
        Self {
            scorer,
            threshold: threshold.clamp(0.0, 100.0),
            min_length_ratio: 0.0,
        }
    }

    /// Skip candidates whose length differs too much from the query
    pub fn with_min_length_ratio(mut self, ratio: f64) -> Self {
        self.min_length_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn scorer(&self) -> FuzzyScorer {
        self.scorer
    }

    fn passes_length_gate(&self, a: &str, b: &str) -> bool {
        if self.min_length_ratio <= 0.0 {
            return true;
        }
        let a_len = a.chars().count();
        let b_len = b.chars().count();
        let longer = a_len.max(b_len);
        if longer == 0 {
            return true;
        }
        a_len.min(b_len) as f64 / longer as f64 >= self.min_length_ratio
    }

    /// Find the best scoring candidate at or above `threshold`.
    ///
    /// Returns the candidate's position and its score. On equal scores the earliest
    /// candidate wins, so a stable candidate order gives a stable result.
    pub fn find_best_match<'a, I>(&self, text: &str, candidates: I, threshold: f64) -> Option<(usize, f64)>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<(usize, f64)> = None;

        for (position, candidate) in candidates.into_iter().enumerate() {
            if !self.passes_length_gate(text, candidate) {
                continue;
            }
            let score = self.scorer.score(text, candidate);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((position, score)),
            }
        }

        best.filter(|(_, score)| *score >= threshold)
    }
}

/// Length of the longest common subsequence
fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev_row = vec![0usize; b.len() + 1];
    let mut curr_row = vec![0usize; b.len() + 1];

    for a_char in a {
        for (j, b_char) in b.iter().enumerate() {
            curr_row[j + 1] = if a_char == b_char {
                prev_row[j] + 1
            } else {
                prev_row[j + 1].max(curr_row[j])
            };
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr_row[0] = i;

        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };

            curr_row[j] = (prev_row[j] + 1)                  // deletion
                .min(curr_row[j - 1] + 1)                    // insertion
                .min(prev_row[j - 1] + cost);                // substitution
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}
