//! French normalization engine
//!
//! Provides a high-level Engine that combines the French rule catalog,
//! candidate rewrites and dictionaries into `label_pair`, `modernize_word`
//! and `modernize_sentence`, with memoized word lookups.
//!
//! This is a thin wrapper around the generic core::Engine<French>.

use std::collections::HashMap;
use std::path::Path;

use libancien_core::{
    load_pairs, Alignment, Classification, Lexicon, Orthography, Result, RuleCatalog,
};

use crate::candidates::generate_candidates;
use crate::catalog::FRENCH_CATALOG;
use crate::config::{french_affinity_rules, FrenchConfig};
use crate::text;

/// The French orthography: rule catalog plus candidate generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct French;

impl Orthography for French {
    fn catalog(&self) -> &RuleCatalog {
        &FRENCH_CATALOG
    }

    fn generate_candidates(&self, word: &str) -> Vec<String> {
        generate_candidates(word)
    }

    fn default_affinity_rules(&self) -> Vec<String> {
        french_affinity_rules()
    }
}

/// Public engine for libfrench.
///
/// This wraps the generic core::Engine<French> with French loading logic and
/// sentence handling. Alignment, classification and lookup caching live in
/// core.
pub struct Engine {
    inner: libancien_core::Engine<French>,
    unify_apostrophes: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(FrenchConfig::default())
    }
}

impl Engine {
    pub fn new(config: FrenchConfig) -> Self {
        let unify_apostrophes = config.unify_apostrophes;
        let use_candidate_rules = config.use_candidate_rules;
        let mut inner = libancien_core::Engine::new(French, config.into_base());
        inner.set_use_candidates(use_candidate_rules);
        Self {
            inner,
            unify_apostrophes,
        }
    }

    /// Load dictionaries from a data directory.
    ///
    /// Expected layout (data-dir), every file optional:
    ///  - modern.fst or modern.txt    (known modern forms)
    ///  - names.fst or names.txt      (known proper nouns)
    ///  - learned.tsv                 (old\tnew pairs)
    pub fn from_data_dir<P: AsRef<Path>>(data_dir: P, config: FrenchConfig) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        let mut engine = Self::new(config);

        if let Some(modern) = load_lexicon(data_dir, "modern")? {
            engine.inner.set_modern_lexicon(modern);
        }
        if let Some(names) = load_lexicon(data_dir, "names")? {
            engine.inner.set_name_lexicon(names);
        }
        let learned = data_dir.join("learned.tsv");
        if learned.exists() {
            engine.inner.set_learned(load_pairs(&learned)?);
        }
        Ok(engine)
    }

    /// Get a reference to the inner core engine.
    pub fn inner(&self) -> &libancien_core::Engine<French> {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut libancien_core::Engine<French> {
        &mut self.inner
    }

    pub fn set_modern_lexicon(&mut self, lexicon: Lexicon) {
        self.inner.set_modern_lexicon(lexicon);
    }

    pub fn set_name_lexicon(&mut self, lexicon: Lexicon) {
        self.inner.set_name_lexicon(lexicon);
    }

    pub fn set_learned(&mut self, learned: HashMap<String, String>) {
        self.inner.set_learned(learned);
    }

    /// Record a learned `old -> new` mapping.
    pub fn learn(&mut self, old: &str, new: &str) {
        self.inner.learn(old, new);
    }

    /// Align two spellings character by character and label the differences.
    pub fn label_pair(&self, old: &str, new: &str) -> Result<(Alignment, Classification)> {
        self.inner.label_pair(old, new)
    }

    /// Align two strings in the configured unit mode.
    pub fn align_pair(&self, old: &str, new: &str) -> Result<Alignment> {
        self.inner.align_pair(old, new)
    }

    pub fn candidates(&self, word: &str) -> Vec<String> {
        self.inner.candidates(word)
    }

    pub fn modernize_word(&self, word: &str) -> String {
        self.inner.modernize_word(word)
    }

    /// Modernize a whole sentence token by token.
    pub fn modernize_sentence(&self, sentence: &str) -> String {
        text::modernize_sentence(sentence, self.unify_apostrophes, |w| {
            self.inner.modernize_word(w)
        })
    }

    /// Get cache statistics (hits, misses, hit rate)
    pub fn cache_stats(&self) -> (usize, usize, f64) {
        let (hits, misses) = self.inner.cache_stats();
        let total = hits + misses;
        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };
        (hits, misses, hit_rate)
    }

    /// Clear the cache
    pub fn clear_cache(&self) {
        self.inner.clear_cache();
    }
}

fn load_lexicon(dir: &Path, stem: &str) -> Result<Option<Lexicon>> {
    let fst = dir.join(format!("{}.fst", stem));
    if fst.exists() {
        return Lexicon::load_fst(&fst).map(Some);
    }
    let txt = dir.join(format!("{}.txt", stem));
    if txt.exists() {
        return Lexicon::load_word_list(&txt).map(Some);
    }
    tracing::debug!(dir = %dir.display(), stem, "no lexicon found");
    Ok(None)
}
