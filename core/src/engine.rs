// core/src/engine.rs
//
// Generic normalization engine that works with any orthography.
// Language crates supply the rule catalog and candidate generator.

use std::cell::RefCell;
use std::collections::HashMap;
use std::num::NonZeroUsize;

use lru::LruCache;

use crate::alignment::{align_chars, align_words, Alignment};
use crate::classifier::{classify, Classification, RuleCatalog};
use crate::error::Result;
use crate::utils::starts_uppercase;
use crate::{AffinityTable, Config, Lexicon, Scorer, UnitMode};

const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
    Some(n) => n,
    None => unreachable!(),
};

/// What a language crate must provide to drive the generic [`Engine`].
pub trait Orthography {
    /// Ordered rule catalog used to label aligned differences.
    fn catalog(&self) -> &RuleCatalog;

    /// Plausible modern spellings of `word`, baseline first.
    fn generate_candidates(&self, word: &str) -> Vec<String>;

    /// Affinity rules in `"a=b:score"` form suited to this orthography.
    fn default_affinity_rules(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Generic engine combining scoring, alignment, classification and lookups.
///
/// Type parameter O is the orthography (e.g., `French`). Known-word sets and
/// learned mappings are optional; without them `modernize_word` relies on
/// the orthography's candidate generator alone.
pub struct Engine<O> {
    orthography: O,
    config: Config,
    affinity: AffinityTable,
    modern: Lexicon,
    names: Lexicon,
    learned: HashMap<String, String>,
    use_candidates: bool,
    cache: RefCell<LruCache<String, String>>,
    cache_hits: RefCell<usize>,
    cache_misses: RefCell<usize>,
}

impl<O: Orthography> Engine<O> {
    /// Create an engine; the affinity table is built from `config.affinity`,
    /// or from the orthography's defaults when that list is empty.
    /// A `max_cache_size` of zero gets the default memo capacity.
    pub fn new(orthography: O, mut config: Config) -> Self {
        let capacity = NonZeroUsize::new(config.max_cache_size).unwrap_or(DEFAULT_CACHE_CAPACITY);
        if config.affinity.is_empty() {
            config.affinity = orthography.default_affinity_rules();
        }
        let affinity = config.affinity_table();
        Self {
            orthography,
            config,
            affinity,
            modern: Lexicon::new(),
            names: Lexicon::new(),
            learned: HashMap::new(),
            use_candidates: true,
            cache: RefCell::new(LruCache::new(capacity)),
            cache_hits: RefCell::new(0),
            cache_misses: RefCell::new(0),
        }
    }

    pub fn orthography(&self) -> &O {
        &self.orthography
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn affinity(&self) -> &AffinityTable {
        &self.affinity
    }

    /// Scorer for the configured mode.
    pub fn scorer(&self) -> Scorer<'_> {
        self.scorer_for(self.config.mode)
    }

    fn scorer_for(&self, mode: UnitMode) -> Scorer<'_> {
        Scorer::new(self.config.scheme(), mode)
            .with_affinity(&self.affinity)
            .with_word_threshold(self.config.word_distance_threshold)
    }

    /// Align two strings in the configured unit mode.
    pub fn align_pair(&self, old: &str, new: &str) -> Result<Alignment> {
        match self.config.mode {
            UnitMode::Character => align_chars(old, new, &self.scorer_for(UnitMode::Character)),
            UnitMode::Word => align_words(old, new, &self.scorer_for(UnitMode::Word)),
        }
    }

    /// Align two spellings character by character and label every difference.
    ///
    /// Labeling always works on characters, whatever the configured mode.
    pub fn label_pair(&self, old: &str, new: &str) -> Result<(Alignment, Classification)> {
        let alignment = align_chars(old, new, &self.scorer_for(UnitMode::Character))?;
        let classification = classify(
            &alignment.old_string(),
            &alignment.new_string(),
            self.orthography.catalog(),
        )?;
        Ok((alignment, classification))
    }

    /// Candidate spellings for `word` from the orthography's rules.
    pub fn candidates(&self, word: &str) -> Vec<String> {
        self.orthography.generate_candidates(word)
    }

    /// Replace the set of known modern forms (looked up lowercased).
    pub fn set_modern_lexicon(&mut self, lexicon: Lexicon) {
        self.modern = lexicon;
        self.clear_cache();
    }

    /// Replace the set of known proper nouns (looked up as written).
    pub fn set_name_lexicon(&mut self, lexicon: Lexicon) {
        self.names = lexicon;
        self.clear_cache();
    }

    /// Replace all learned `old -> new` mappings.
    pub fn set_learned(&mut self, learned: HashMap<String, String>) {
        self.learned = learned;
        self.clear_cache();
    }

    /// Record one learned mapping.
    pub fn learn<S: Into<String>, T: Into<String>>(&mut self, old: S, new: T) {
        self.learned.insert(old.into(), new.into());
        self.clear_cache();
    }

    pub fn learned_len(&self) -> usize {
        self.learned.len()
    }

    /// Enable or disable the candidate fallback of `modernize_word`.
    pub fn set_use_candidates(&mut self, enabled: bool) {
        self.use_candidates = enabled;
        self.clear_cache();
    }

    /// True if `word` is a known proper noun (capitalized) or modern form.
    ///
    /// Typographic apostrophes are compared as ASCII ones.
    pub fn is_known(&self, word: &str) -> bool {
        let plain = word.replace('’', "'");
        (starts_uppercase(word) && self.names.contains(&plain))
            || self.modern.contains(&plain.to_lowercase())
    }

    /// Modern spelling of a single token.
    ///
    /// Known words are kept; then learned mappings apply; then the first
    /// known candidate wins, falling back to the baseline candidate.
    pub fn modernize_word(&self, word: &str) -> String {
        if let Some(cached) = self.cache.borrow_mut().get(word) {
            *self.cache_hits.borrow_mut() += 1;
            return cached.clone();
        }
        *self.cache_misses.borrow_mut() += 1;

        let modern = self.lookup(word);
        self.cache.borrow_mut().put(word.to_string(), modern.clone());
        modern
    }

    fn lookup(&self, word: &str) -> String {
        if self.is_known(word) {
            tracing::debug!(word, "known form kept");
            return word.to_string();
        }
        if let Some(learned) = self.learned.get(word) {
            tracing::debug!(word, learned = %learned, "learned mapping");
            return learned.clone();
        }
        if !self.use_candidates {
            return word.to_string();
        }

        let mut candidates = self.orthography.generate_candidates(word).into_iter();
        let Some(baseline) = candidates.next() else {
            return word.to_string();
        };
        if self.is_known(&baseline) {
            return baseline;
        }
        match candidates.find(|c| self.is_known(c)) {
            Some(found) => {
                tracing::debug!(word, candidate = %found, "known candidate");
                found
            }
            None => {
                tracing::debug!(word, baseline = %baseline, "baseline candidate");
                baseline
            }
        }
    }

    /// Get cache statistics for monitoring.
    ///
    /// Returns (hits, misses) tuple.
    pub fn cache_stats(&self) -> (usize, usize) {
        (*self.cache_hits.borrow(), *self.cache_misses.borrow())
    }

    /// Get cache hit rate as a percentage (0.0 to 100.0).
    ///
    /// Returns None if no cache accesses have been made yet.
    pub fn cache_hit_rate(&self) -> Option<f32> {
        let (hits, misses) = self.cache_stats();
        let total = hits + misses;
        (total > 0).then(|| hits as f32 / total as f32 * 100.0)
    }

    pub fn cache_size(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache.borrow().cap().get()
    }

    /// Clear the memo and its statistics.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
        *self.cache_hits.borrow_mut() = 0;
        *self.cache_misses.borrow_mut() = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{Pattern, Rule};

    struct Toy {
        catalog: RuleCatalog,
    }

    static TOY_RULES: &[Rule] = &[
        Rule::new(&["y → i"], 1, &[Pattern::Classes { old: "y", new: "i" }]),
        Rule::new(&["s muet"], 1, &[Pattern::Classes { old: "s", new: "¤" }]),
    ];

    impl Toy {
        fn new() -> Self {
            Self {
                catalog: RuleCatalog::new("toy-1", TOY_RULES),
            }
        }
    }

    impl Orthography for Toy {
        fn catalog(&self) -> &RuleCatalog {
            &self.catalog
        }

        fn generate_candidates(&self, word: &str) -> Vec<String> {
            let base = word.replace('y', "i");
            let alt = base.replace('s', "");
            vec![base, alt]
        }
    }

    fn engine() -> Engine<Toy> {
        let mut cfg = Config::default();
        cfg.add_affinity_rule("y=i:3");
        let mut engine = Engine::new(Toy::new(), cfg);
        engine.set_modern_lexicon(Lexicon::from_words(["moi", "fit", "aujourd'hui"]));
        engine.set_name_lexicon(Lexicon::from_words(["Troyes"]));
        engine
    }

    #[test]
    fn known_forms_are_kept() {
        let e = engine();
        assert_eq!(e.modernize_word("Moi"), "Moi");
        assert_eq!(e.modernize_word("Troyes"), "Troyes");
        assert_eq!(e.modernize_word("aujourd’hui"), "aujourd’hui");
    }

    #[test]
    fn proper_nouns_need_a_capital() {
        let e = engine();
        // lowercase "troyes" is not a name; the baseline rewrite applies
        assert_eq!(e.modernize_word("troyes"), "troies");
    }

    #[test]
    fn learned_mapping_beats_candidates() {
        let mut e = engine();
        e.learn("moy", "moi-même");
        assert_eq!(e.modernize_word("moy"), "moi-même");
    }

    #[test]
    fn first_known_candidate_wins() {
        let e = engine();
        assert_eq!(e.modernize_word("fist"), "fit");
        assert_eq!(e.modernize_word("moy"), "moi");
        assert_eq!(e.modernize_word("gyst"), "gist");
    }

    #[test]
    fn candidates_can_be_disabled() {
        let mut e = engine();
        e.set_use_candidates(false);
        assert_eq!(e.modernize_word("fist"), "fist");
    }

    #[test]
    fn memo_counts_hits_and_misses() {
        let e = engine();
        assert_eq!(e.cache_hit_rate(), None);
        e.modernize_word("fist");
        e.modernize_word("fist");
        e.modernize_word("moy");
        assert_eq!(e.cache_stats(), (1, 2));
        assert_eq!(e.cache_size(), 2);
        assert_eq!(e.cache_capacity(), 1000);
        e.clear_cache();
        assert_eq!(e.cache_stats(), (0, 0));
        assert_eq!(e.cache_size(), 0);
    }

    #[test]
    fn zero_cache_size_falls_back_to_default() {
        let mut cfg = Config::default();
        cfg.max_cache_size = 0;
        let e = Engine::new(Toy::new(), cfg);
        assert_eq!(e.cache_capacity(), 1000);
    }

    #[test]
    fn label_pair_aligns_then_classifies() {
        let e = engine();
        let (alignment, classification) = e.label_pair("moys", "moi").unwrap();
        assert_eq!(alignment.old_string(), "moys");
        assert_eq!(alignment.new_string(), "moi¤");
        let labels: Vec<_> = classification.iter().map(|d| d.labels[0].as_str()).collect();
        assert_eq!(labels, vec!["y → i", "s muet"]);
    }

    #[test]
    fn word_mode_aligns_tokens() {
        let mut cfg = Config::default();
        cfg.set_mode(UnitMode::Word);
        let e = Engine::new(Toy::new(), cfg);
        let alignment = e.align_pair("le roy", "le roi").unwrap();
        assert_eq!(alignment.old, vec!["le", "roy"]);
        assert_eq!(alignment.new, vec!["le", "roi"]);
    }
}
