//! Rule-driven classification of divergences between two aligned strings.
//!
//! A [`RuleCatalog`] is an ordered table of [`Rule`] descriptors. The
//! classifier walks the aligned pair left to right; at every divergent
//! position the first rule whose window matches wins, emits one
//! [`DiffUnit`] for the whole window and moves the cursor past it. Rule order
//! is part of the catalog's meaning: specific multi-character patterns must
//! precede the generic single-character ones they overlap.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::utils::fold_char;

/// Context around the classifier cursor.
///
/// Offsets are relative to the cursor; anything outside the sequences reads
/// as `None` and never matches. Positions before `floor` already belong to
/// an emitted unit: they can be read as context but no rule window may
/// start there.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    old: &'a [char],
    new: &'a [char],
    raw_old: &'a [char],
    raw_new: &'a [char],
    cursor: usize,
    floor: usize,
}

impl<'a> Window<'a> {
    fn index(&self, offset: isize) -> Option<usize> {
        let i = self.cursor as isize + offset;
        (i >= 0 && (i as usize) < self.old.len()).then_some(i as usize)
    }

    fn range(&self, offset: isize, width: usize) -> Option<Range<usize>> {
        let start = self.cursor as isize + offset;
        if start < 0 {
            return None;
        }
        let start = start as usize;
        let end = start + width;
        (end <= self.old.len()).then_some(start..end)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the aligned sequences.
    pub fn len(&self) -> usize {
        self.old.len()
    }

    pub fn is_empty(&self) -> bool {
        self.old.is_empty()
    }

    /// True if the cursor sits on the final position.
    pub fn at_last(&self) -> bool {
        self.cursor + 1 == self.old.len()
    }

    /// Case-folded old unit at `offset`.
    pub fn old_at(&self, offset: isize) -> Option<char> {
        self.index(offset).map(|i| self.old[i])
    }

    /// Case-folded new unit at `offset`.
    pub fn new_at(&self, offset: isize) -> Option<char> {
        self.index(offset).map(|i| self.new[i])
    }

    /// Old unit at `offset` as written.
    pub fn raw_old_at(&self, offset: isize) -> Option<char> {
        self.index(offset).map(|i| self.raw_old[i])
    }

    /// New unit at `offset` as written.
    pub fn raw_new_at(&self, offset: isize) -> Option<char> {
        self.index(offset).map(|i| self.raw_new[i])
    }

    /// Case-folded old units from `offset` to the end of the sequence.
    pub fn old_rest(&self, offset: isize) -> &'a [char] {
        self.index(offset).map_or(&[], |i| &self.old[i..])
    }

    /// Case-folded new units from `offset` to the end of the sequence.
    pub fn new_rest(&self, offset: isize) -> &'a [char] {
        self.index(offset).map_or(&[], |i| &self.new[i..])
    }

    /// True if the old units starting at `offset` spell exactly `fragment`.
    pub fn old_is(&self, offset: isize, fragment: &str) -> bool {
        self.range(offset, fragment.chars().count())
            .map_or(false, |r| spells(&self.old[r], fragment))
    }

    /// True if the new units starting at `offset` spell exactly `fragment`.
    pub fn new_is(&self, offset: isize, fragment: &str) -> bool {
        self.range(offset, fragment.chars().count())
            .map_or(false, |r| spells(&self.new[r], fragment))
    }

    /// True if both sides, from `offset` to the end, spell exactly `fragment`.
    pub fn tail_is(&self, offset: isize, fragment: &str) -> bool {
        spells(self.old_rest(offset), fragment) && spells(self.new_rest(offset), fragment)
    }
}

fn spells(units: &[char], fragment: &str) -> bool {
    fragment.chars().eq(units.iter().copied())
}

/// One way a rule window can match.
#[derive(Clone, Copy)]
pub enum Pattern {
    /// The old window spells one of `old` and the new window one of `new`.
    Fragments {
        old: &'static [&'static str],
        new: &'static [&'static str],
    },
    /// Every old unit in the window is in `old` and every new unit in `new`.
    Classes {
        old: &'static str,
        new: &'static str,
    },
    /// Arbitrary context test.
    Predicate(fn(&Window<'_>) -> bool),
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Fragments { old, new } => f
                .debug_struct("Fragments")
                .field("old", old)
                .field("new", new)
                .finish(),
            Pattern::Classes { old, new } => f
                .debug_struct("Classes")
                .field("old", old)
                .field("new", new)
                .finish(),
            Pattern::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl Pattern {
    fn matches(&self, window: &Window<'_>, span: &Range<usize>) -> bool {
        match *self {
            Pattern::Fragments { old, new } => {
                let old_units = &window.old[span.clone()];
                let new_units = &window.new[span.clone()];
                old.iter().any(|f| spells(old_units, f)) && new.iter().any(|f| spells(new_units, f))
            }
            Pattern::Classes { old, new } => {
                window.old[span.clone()].iter().all(|c| old.contains(*c))
                    && window.new[span.clone()].iter().all(|c| new.contains(*c))
            }
            Pattern::Predicate(test) => test(window),
        }
    }
}

/// A catalog entry: where its window lies, how to test it, what it is called.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub labels: &'static [&'static str],
    /// Positions the window starts before the cursor
    pub lookbehind: usize,
    /// Positions covered by the window, cursor included
    pub width: usize,
    /// Alternatives; any one matching is enough
    pub patterns: &'static [Pattern],
}

impl Rule {
    pub const fn new(
        labels: &'static [&'static str],
        width: usize,
        patterns: &'static [Pattern],
    ) -> Self {
        Self {
            labels,
            lookbehind: 0,
            width,
            patterns,
        }
    }

    /// Start the window `n` positions before the cursor.
    pub const fn behind(mut self, n: usize) -> Self {
        self.lookbehind = n;
        self
    }

    /// Structural sanity: the window has 1..=4 positions and covers the cursor.
    pub fn is_well_formed(&self) -> bool {
        (1..=4).contains(&self.width) && self.lookbehind < self.width && !self.patterns.is_empty()
    }

    /// Window span if the rule matches at the window's cursor.
    ///
    /// A window reaching back into an emitted unit never matches.
    pub fn matches(&self, window: &Window<'_>) -> Option<Range<usize>> {
        let span = window.range(-(self.lookbehind as isize), self.width)?;
        if span.start < window.floor {
            return None;
        }
        self.patterns
            .iter()
            .any(|p| p.matches(window, &span))
            .then_some(span)
    }
}

/// A labeled divergence between aligned fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffUnit {
    pub old: String,
    pub new: String,
    pub labels: Vec<String>,
}

impl DiffUnit {
    pub fn new<O: Into<String>, N: Into<String>>(old: O, new: N, labels: &[&str]) -> Self {
        Self {
            old: old.into(),
            new: new.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    /// False for divergences no catalog rule explained.
    pub fn is_classified(&self) -> bool {
        !self.labels.is_empty()
    }
}

/// Ordered diff units for one aligned pair.
///
/// `spans[i]` is the range of aligned positions covered by `diffs[i]`;
/// spans are disjoint and increasing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    diffs: Vec<DiffUnit>,
    spans: Vec<Range<usize>>,
}

impl Classification {
    /// Number of emitted diff units.
    pub fn count(&self) -> usize {
        self.diffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn diffs(&self) -> &[DiffUnit] {
        &self.diffs
    }

    /// Aligned positions covered by each diff unit.
    pub fn spans(&self) -> &[Range<usize>] {
        &self.spans
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiffUnit> {
        self.diffs.iter()
    }

    /// `(diff count, diff units)`.
    pub fn into_parts(self) -> (usize, Vec<DiffUnit>) {
        (self.diffs.len(), self.diffs)
    }
}

impl IntoIterator for Classification {
    type Item = DiffUnit;
    type IntoIter = std::vec::IntoIter<DiffUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.diffs.into_iter()
    }
}

/// Versioned, ordered and immutable rule table.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    version: &'static str,
    rules: Vec<Rule>,
}

impl RuleCatalog {
    pub fn new(version: &'static str, rules: &[Rule]) -> Self {
        debug_assert!(rules.iter().all(Rule::is_well_formed));
        Self {
            version,
            rules: rules.to_vec(),
        }
    }

    pub fn version(&self) -> &str {
        self.version
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First rule matching at the window's cursor, with its span.
    pub fn first_match(&self, window: &Window<'_>) -> Option<(&Rule, Range<usize>)> {
        self.rules
            .iter()
            .find_map(|rule| rule.matches(window).map(|span| (rule, span)))
    }

    /// Classify an aligned pair with this catalog; see [`classify`].
    pub fn classify(&self, old: &str, new: &str) -> Result<Classification> {
        classify(old, new, self)
    }
}

/// Label every divergence between two aligned strings.
///
/// Both strings must have the same number of characters (gap markers
/// included). Rules see case-folded characters; emitted fragments keep the
/// input's case. A position no rule explains yields a one-position unit
/// with no labels.
pub fn classify(old: &str, new: &str, catalog: &RuleCatalog) -> Result<Classification> {
    let raw_old: Vec<char> = old.chars().collect();
    let raw_new: Vec<char> = new.chars().collect();
    if raw_old.len() != raw_new.len() {
        return Err(Error::LengthMismatch {
            old: raw_old.len(),
            new: raw_new.len(),
        });
    }
    let folded_old: Vec<char> = raw_old.iter().copied().map(fold_char).collect();
    let folded_new: Vec<char> = raw_new.iter().copied().map(fold_char).collect();

    let mut diffs = Vec::new();
    let mut spans = Vec::new();
    let mut cursor = 0;
    let mut floor = 0;
    while cursor < raw_old.len() {
        if raw_old[cursor] == raw_new[cursor] {
            cursor += 1;
            continue;
        }

        let window = Window {
            old: &folded_old,
            new: &folded_new,
            raw_old: &raw_old,
            raw_new: &raw_new,
            cursor,
            floor,
        };

        match catalog.first_match(&window) {
            Some((rule, span)) => {
                let unit = DiffUnit::new(
                    raw_old[span.clone()].iter().collect::<String>(),
                    raw_new[span.clone()].iter().collect::<String>(),
                    rule.labels,
                );
                tracing::trace!(cursor, old = %unit.old, new = %unit.new, labels = ?unit.labels, "classified");
                diffs.push(unit);
                cursor = span.end.max(cursor + 1);
                spans.push(span);
            }
            None => {
                let unit = DiffUnit::new(raw_old[cursor], raw_new[cursor], &[]);
                tracing::debug!(cursor, old = %unit.old, new = %unit.new, "unclassified divergence");
                diffs.push(unit);
                spans.push(cursor..cursor + 1);
                cursor += 1;
            }
        }
        floor = cursor;
    }

    Ok(Classification { diffs, spans })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_case_only(w: &Window<'_>) -> bool {
        w.raw_old_at(0) != w.raw_new_at(0) && w.old_at(0) == w.new_at(0)
    }

    fn is_double(w: &Window<'_>) -> bool {
        w.old_at(0) == Some('¤') && w.new_at(0) == w.new_at(1) && w.old_at(1) == w.new_at(1)
    }

    static RULES: &[Rule] = &[
        Rule::new(
            &["case"],
            1,
            &[Pattern::Predicate(is_case_only)],
        ),
        Rule::new(&["ct → t"], 2, &[Pattern::Fragments { old: &["ct"], new: &["¤t"] }]),
        Rule::new(&["doubling"], 2, &[Pattern::Predicate(is_double)]),
        Rule::new(&["oing"], 4, &[Pattern::Fragments { old: &["oing"], new: &["oin¤"] }]).behind(3),
        Rule::new(&["y → i"], 1, &[Pattern::Classes { old: "y", new: "iï" }]),
    ];

    fn catalog() -> RuleCatalog {
        RuleCatalog::new("test", RULES)
    }

    #[test]
    fn identical_pair_has_no_diffs() {
        let result = classify("chat", "chat", &catalog()).unwrap();
        assert_eq!(result.count(), 0);
        assert!(result.is_empty());
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let err = classify("chat", "chats", &catalog()).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { old: 4, new: 5 }));
    }

    #[test]
    fn multi_position_rule_consumes_its_window() {
        let result = classify("faict", "fai¤t", &catalog()).unwrap();
        assert_eq!(result.diffs(), &[DiffUnit::new("ct", "¤t", &["ct → t"])]);
    }

    #[test]
    fn lookbehind_window_reports_preceding_context() {
        let result = classify("loing", "loin¤", &catalog()).unwrap();
        assert_eq!(result.diffs(), &[DiffUnit::new("oing", "oin¤", &["oing"])]);
    }

    #[test]
    fn window_past_either_end_never_matches() {
        // "oing" needs three positions before the cursor
        let result = classify("ng", "n¤", &catalog()).unwrap();
        assert_eq!(result.diffs(), &[DiffUnit::new("g", "¤", &[])]);
        // "ct" needs one position after the cursor
        let result = classify("c", "¤", &catalog()).unwrap();
        assert_eq!(result.count(), 1);
        assert!(!result.diffs()[0].is_classified());
    }

    #[test]
    fn first_matching_rule_wins() {
        let result = classify("¤tt", "ttt", &catalog()).unwrap();
        assert_eq!(result.diffs(), &[DiffUnit::new("¤t", "tt", &["doubling"])]);
    }

    #[test]
    fn case_only_difference_keeps_original_case() {
        let result = classify("Roy", "roi", &catalog()).unwrap();
        assert_eq!(
            result.diffs(),
            &[
                DiffUnit::new("R", "r", &["case"]),
                DiffUnit::new("y", "i", &["y → i"]),
            ]
        );
    }

    #[test]
    fn unclassified_divergences_are_reported_one_by_one() {
        let result = classify("abc", "xyz", &catalog()).unwrap();
        let (count, diffs) = result.into_parts();
        assert_eq!(count, 3);
        assert!(diffs.iter().all(|d| d.labels.is_empty()));
    }

    #[test]
    fn lookbehind_never_reenters_an_emitted_unit() {
        // "O" is emitted by the case rule; "oing" may not claim it again
        let result = classify("Oing", "oin¤", &catalog()).unwrap();
        assert_eq!(
            result.diffs(),
            &[DiffUnit::new("O", "o", &["case"]), DiffUnit::new("g", "¤", &[])]
        );
        assert_eq!(result.spans(), &[0..1, 3..4]);
    }

    #[test]
    fn spans_follow_the_cursor() {
        let result = classify("faict", "fai¤t", &catalog()).unwrap();
        assert_eq!(result.spans(), &[3..5]);
        let result = classify("loing", "loin¤", &catalog()).unwrap();
        assert_eq!(result.spans(), &[1..5]);
    }

    #[test]
    fn rules_are_well_formed() {
        assert!(RULES.iter().all(Rule::is_well_formed));
        assert!(!Rule::new(&["bad"], 2, &[]).is_well_formed());
        assert!(!Rule::new(&["bad"], 2, RULES[1].patterns).behind(2).is_well_formed());
    }
}
