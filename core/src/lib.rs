//! libancien-core
//!
//! Orthography-agnostic machinery for normalizing historical spellings:
//! unit similarity scoring, global alignment, rule-driven classification of
//! aligned differences and the lookup engine shared by language crates
//! (libfrench).
//!
//! Public API:
//! - `Scorer` / `ScoringScheme` - similarity of two units (chars or words)
//! - `align`, `align_chars`, `align_words` - Needleman-Wunsch alignment
//! - `RuleCatalog`, `classify` - first-match-wins diff classification
//! - `Lexicon` - known word sets, in memory or `fst`-backed
//! - `Engine` - alignment, labeling and word modernization for one orthography
//! - `Config` - scoring and engine configuration
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod affinity;
pub use affinity::{AffinityRule, AffinityTable};

pub mod distance;
pub use distance::{bounded_levenshtein, weighted_levenshtein, EditCosts, WORD_COSTS};

pub mod scorer;
pub use scorer::{Scorer, ScoringScheme, UnitMode, WORD_DISTANCE_THRESHOLD};

pub mod alignment;
pub use alignment::{align, align_chars, align_words, Alignment};

pub mod classifier;
pub use classifier::{classify, Classification, DiffUnit, Pattern, Rule, RuleCatalog, Window};

pub mod lexicon;
pub use lexicon::{load_pairs, read_pairs, Lexicon};

pub mod engine;
pub use engine::{Engine, Orthography};

pub mod utils;

/// Gap marker padding the shorter side of an alignment.
pub const GAP: &str = "¤";
/// [`GAP`] as a `char`, for character-mode sequences.
pub const GAP_CHAR: char = '¤';

/// Generic configuration for alignment, scoring and lookups.
///
/// Orthography-specific options (default affinity rules, candidate rule
/// switches) belong in the language crate's config, which flattens this one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Score of two equivalent units
    pub match_award: i32,
    /// Score of two unrelated units
    pub mismatch_penalty: i32,
    /// Score of a unit aligned against the gap marker
    pub gap_penalty: i32,

    /// Whether sequences are split into characters or words
    pub mode: UnitMode,
    /// Edit distance under which two words count as a near miss (word mode)
    pub word_distance_threshold: u32,

    /// Affinity rules (e.g., "e=ê:2", "y=i:3")
    /// Language crates should populate this with appropriate defaults
    pub affinity: Vec<String>,

    // Cache Management
    /// Maximum number of entries in the word -> modern form memo; the
    /// engine treats zero as the default capacity
    pub max_cache_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        let scheme = ScoringScheme::default();
        Self {
            match_award: scheme.match_award,
            mismatch_penalty: scheme.mismatch_penalty,
            gap_penalty: scheme.gap_penalty,
            mode: UnitMode::Character,
            word_distance_threshold: WORD_DISTANCE_THRESHOLD,
            // Empty affinity rules by default - language crates will populate
            affinity: vec![],
            max_cache_size: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> std::result::Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// The configured match/mismatch/gap triple.
    pub fn scheme(&self) -> ScoringScheme {
        ScoringScheme::new(self.match_award, self.mismatch_penalty, self.gap_penalty)
    }

    /// Replace the match/mismatch/gap triple.
    pub fn set_scheme(&mut self, scheme: ScoringScheme) {
        self.match_award = scheme.match_award;
        self.mismatch_penalty = scheme.mismatch_penalty;
        self.gap_penalty = scheme.gap_penalty;
    }

    /// Build the affinity table from the textual rules.
    pub fn affinity_table(&self) -> AffinityTable {
        AffinityTable::from_rules(&self.affinity)
    }

    /// Add an affinity rule (e.g., "y=i:3").
    pub fn add_affinity_rule(&mut self, rule: &str) {
        if !self.affinity.iter().any(|r| r == rule) {
            self.affinity.push(rule.to_string());
        }
    }

    pub fn set_mode(&mut self, mode: UnitMode) {
        self.mode = mode;
    }

    pub fn get_mode(&self) -> UnitMode {
        self.mode
    }

    /// Set the modernization memo capacity.
    pub fn set_max_cache_size(&mut self, size: usize) {
        self.max_cache_size = size;
    }

    pub fn get_max_cache_size(&self) -> usize {
        self.max_cache_size
    }
}
