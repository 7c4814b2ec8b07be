//! Symbol-pair affinity table for alignment scoring.
//!
//! An affinity overrides the flat mismatch penalty for a specific pair of
//! units, so that orthographically related symbols (`u`/`v`, `s`/`ſ`,
//! `e`/`é`) align cheaply. Values may be positive, zero or negative.
use std::collections::HashMap;

/// A single affinity rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffinityRule {
    pub from: String,
    pub to: String,
    pub score: i32,
}

impl AffinityRule {
    pub fn new(from: &str, to: &str, score: i32) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            score,
        }
    }

    /// Parse `"a=b"` or `"a=b:score"`; `default_score` fills in a missing score.
    ///
    /// Returns `None` for malformed rules (no `=`, empty side, unparsable score).
    pub fn parse(rule: &str, default_score: i32) -> Option<Self> {
        let (pair, score) = match rule.rsplit_once(':') {
            Some((pair, score)) => (pair, score.trim().parse::<i32>().ok()?),
            None => (rule, default_score),
        };
        let (a, b) = pair.split_once('=')?;
        let (a, b) = (a.trim(), b.trim());
        if a.is_empty() || b.is_empty() {
            return None;
        }
        Some(Self::new(a, b, score))
    }
}

/// Sparse `(unit, unit) -> score` table.
///
/// Keys are stored lowercased because the scorer folds case before lookup.
#[derive(Debug, Clone)]
pub struct AffinityTable {
    map: HashMap<String, HashMap<String, i32>>,
    /// Score used by textual rules without an explicit `:score` suffix
    default_score: i32,
}

impl Default for AffinityTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AffinityTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            default_score: 1,
        }
    }

    /// Build a table from textual rules like `"u=v:2"`.
    ///
    /// Pairs are inserted in both directions. Malformed entries are skipped;
    /// a later rule for the same pair replaces an earlier one.
    pub fn from_rules<S: AsRef<str>>(rules: &[S]) -> Self {
        let mut table = Self::new();
        for text in rules {
            match AffinityRule::parse(text.as_ref(), table.default_score) {
                Some(rule) => table.add_rule(&rule.from, &rule.to, rule.score),
                None => tracing::warn!(rule = text.as_ref(), "skipping malformed affinity rule"),
            }
        }
        table
    }

    /// Add a symmetric affinity.
    pub fn add_rule(&mut self, a: &str, b: &str, score: i32) {
        self.add_rule_unidirectional(a, b, score);
        self.add_rule_unidirectional(b, a, score);
    }

    /// Add an affinity for `from -> to` only.
    pub fn add_rule_unidirectional(&mut self, from: &str, to: &str, score: i32) {
        self.map
            .entry(from.to_lowercase())
            .or_default()
            .insert(to.to_lowercase(), score);
    }

    /// Look up the affinity of `a` against `b`.
    ///
    /// Both arguments are expected to be lowercased already.
    pub fn get(&self, a: &str, b: &str) -> Option<i32> {
        self.map.get(a).and_then(|row| row.get(b)).copied()
    }

    /// True if `a -> b` has an entry.
    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.get(a, b).is_some()
    }

    /// Number of directed entries.
    pub fn len(&self) -> usize {
        self.map.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn default_score(&self) -> i32 {
        self.default_score
    }
}
