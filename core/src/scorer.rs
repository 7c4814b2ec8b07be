//! Similarity scoring for a single pair of aligned units.
//!
//! The score is case-insensitive and language-aware: an affinity table can
//! make related symbols cheap to align, and in word mode near-identical words
//! earn most of the match award instead of a flat mismatch.

use serde::{Deserialize, Serialize};

use crate::affinity::AffinityTable;
use crate::distance::{bounded_levenshtein, WORD_COSTS};
use crate::utils::fold_case;
use crate::GAP;

/// What a sequence unit is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitMode {
    /// One unit per character
    #[default]
    Character,
    /// One unit per word token
    Word,
}

/// Match award, mismatch penalty and gap penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringScheme {
    pub match_award: i32,
    pub mismatch_penalty: i32,
    pub gap_penalty: i32,
}

impl ScoringScheme {
    pub const fn new(match_award: i32, mismatch_penalty: i32, gap_penalty: i32) -> Self {
        Self {
            match_award,
            mismatch_penalty,
            gap_penalty,
        }
    }
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self::new(4, -1, -1)
    }
}

/// Default bound on word-mode edit distance.
pub const WORD_DISTANCE_THRESHOLD: u32 = 4;

/// Pure scoring function over a fixed configuration.
///
/// # Example
/// ```
/// use libancien_core::{Scorer, ScoringScheme, UnitMode};
///
/// let scorer = Scorer::new(ScoringScheme::default(), UnitMode::Character);
/// assert_eq!(scorer.score("A", "a"), 4);
/// assert_eq!(scorer.score("a", "b"), -1);
/// assert_eq!(scorer.score("a", "¤"), -1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    scheme: ScoringScheme,
    affinity: Option<&'a AffinityTable>,
    mode: UnitMode,
    word_threshold: u32,
}

impl<'a> Scorer<'a> {
    pub fn new(scheme: ScoringScheme, mode: UnitMode) -> Self {
        Self {
            scheme,
            affinity: None,
            mode,
            word_threshold: WORD_DISTANCE_THRESHOLD,
        }
    }

    /// Attach an affinity table overriding the mismatch score for listed pairs.
    pub fn with_affinity(mut self, table: &'a AffinityTable) -> Self {
        self.affinity = Some(table);
        self
    }

    /// Change the word-mode distance threshold (strict upper bound).
    pub fn with_word_threshold(mut self, threshold: u32) -> Self {
        self.word_threshold = threshold;
        self
    }

    pub fn scheme(&self) -> ScoringScheme {
        self.scheme
    }

    pub fn mode(&self) -> UnitMode {
        self.mode
    }

    pub fn gap_penalty(&self) -> i32 {
        self.scheme.gap_penalty
    }

    /// Score aligning unit `a` against unit `b`.
    ///
    /// Checks, in order: equality (or `&` against `et`), affinity table,
    /// gap marker, word-mode near miss, mismatch.
    pub fn score(&self, a: &str, b: &str) -> i32 {
        let a = fold_case(a);
        let b = fold_case(b);
        let (a, b) = (a.as_ref(), b.as_ref());

        if a == b || is_ampersand_pair(a, b) {
            return self.scheme.match_award;
        }
        if let Some(score) = self.affinity.and_then(|t| t.get(a, b)) {
            return score;
        }
        if a == GAP || b == GAP {
            return self.scheme.gap_penalty;
        }
        if self.mode == UnitMode::Word && !a.is_empty() && !b.is_empty() {
            return self.score_word_mismatch(a, b);
        }
        self.scheme.mismatch_penalty
    }

    /// A near miss scores `match_award - distance` when the distance is below
    /// both the shorter word's length and the threshold.
    fn score_word_mismatch(&self, a: &str, b: &str) -> i32 {
        let shorter = a.chars().count().min(b.chars().count()) as u32;
        let bound = shorter.min(self.word_threshold);
        if bound == 0 {
            return self.scheme.mismatch_penalty;
        }
        match bounded_levenshtein(a, b, WORD_COSTS, self.affinity, bound - 1) {
            Some(distance) => self.scheme.match_award - distance as i32,
            None => self.scheme.mismatch_penalty,
        }
    }
}

fn is_ampersand_pair(a: &str, b: &str) -> bool {
    matches!((a, b), ("&", "et") | ("et", "&"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars() -> Scorer<'static> {
        Scorer::new(ScoringScheme::default(), UnitMode::Character)
    }

    #[test]
    fn match_is_case_insensitive() {
        assert_eq!(chars().score("É", "é"), 4);
        assert_eq!(chars().score("Q", "q"), 4);
    }

    #[test]
    fn ampersand_matches_et_in_both_directions() {
        let words = Scorer::new(ScoringScheme::default(), UnitMode::Word);
        assert_eq!(words.score("&", "et"), 4);
        assert_eq!(words.score("ET", "&"), 4);
    }

    #[test]
    fn affinity_overrides_mismatch_and_gap() {
        let table = AffinityTable::from_rules(&["u=v:2", "e=¤:0", "x=s:-3"]);
        let scorer = chars().with_affinity(&table);
        assert_eq!(scorer.score("V", "u"), 2);
        assert_eq!(scorer.score("e", "¤"), 0);
        assert_eq!(scorer.score("x", "s"), -3);
        assert_eq!(scorer.score("t", "¤"), -1);
        assert_eq!(scorer.score("t", "d"), -1);
    }

    #[test]
    fn character_mode_never_uses_distance() {
        assert_eq!(chars().score("chat", "chats"), -1);
    }

    #[test]
    fn word_mode_rewards_near_misses() {
        let words = Scorer::new(ScoringScheme::default(), UnitMode::Word);
        // one insertion: distance 1
        assert_eq!(words.score("chat", "chats"), 3);
        // one substitution: distance 2
        assert_eq!(words.score("roy", "roi"), 2);
        assert!(words.score("chat", "chats") > ScoringScheme::default().mismatch_penalty);
        // dissimilar words of the same length
        assert_eq!(words.score("abcd", "wxyz"), -1);
        // distance must stay below the shorter word's length
        assert_eq!(words.score("a", "b"), -1);
        assert_eq!(words.score("de", "dé"), -1);
    }

    #[test]
    fn word_threshold_is_strict() {
        let words = Scorer::new(ScoringScheme::default(), UnitMode::Word);
        // distance 4 on long words is not below the threshold of 4
        assert_eq!(words.score("abcdefgh", "abcdefxy"), -1);
        let loose = words.with_word_threshold(5);
        assert_eq!(loose.score("abcdefgh", "abcdefxy"), 0);
    }
}
