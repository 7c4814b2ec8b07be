//! Known-word sets used by the lookup engine.
//!
//! A `Lexicon` answers one question: is this exact form a known word? Small
//! sets live in a `HashSet`; large ones (a full modern dictionary, a
//! proper-noun list) are compiled into an `fst::Set` once and loaded from
//! disk. Both are consulted by [`Lexicon::contains`].

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read};
use std::path::Path;

use fst::{Set, SetBuilder};

use crate::error::Result;
use crate::utils::normalize;

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    // In-memory entries
    words: HashSet<String>,
    // FST set for large compiled word lists
    fst_set: Option<Set<Vec<u8>>>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            fst_set: None,
        }
    }

    /// Add a word to the in-memory set.
    pub fn insert<S: Into<String>>(&mut self, word: S) {
        self.words.insert(word.into());
    }

    /// Exact membership test.
    pub fn contains(&self, word: &str) -> bool {
        if self.words.contains(word) {
            return true;
        }
        self.fst_set.as_ref().map_or(false, |set| set.contains(word))
    }

    /// Number of known words (in-memory plus compiled).
    pub fn len(&self) -> usize {
        self.words.len() + self.fst_set.as_ref().map_or(0, |set| set.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read one word per line; only the first tab-separated column counts.
    ///
    /// Words are NFC-normalized; blank lines are skipped.
    pub fn read_word_list<R: BufRead>(reader: R) -> Result<Self> {
        let mut lexicon = Self::new();
        for line in reader.lines() {
            let line = line?;
            let word = normalize(line.split('\t').next().unwrap_or(""));
            if !word.is_empty() {
                lexicon.insert(word);
            }
        }
        Ok(lexicon)
    }

    /// Load a word list file (see [`Lexicon::read_word_list`]).
    pub fn load_word_list<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let lexicon = Self::read_word_list(BufReader::new(file))?;
        tracing::debug!(path = %path.as_ref().display(), words = lexicon.len(), "loaded word list");
        Ok(lexicon)
    }

    /// Load a compiled set produced by [`Lexicon::build_fst`].
    pub fn load_fst<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut buf = Vec::new();
        File::open(path.as_ref())?.read_to_end(&mut buf)?;
        let set = Set::new(buf)?;
        tracing::debug!(path = %path.as_ref().display(), words = set.len(), "loaded fst lexicon");
        Ok(Self {
            words: HashSet::new(),
            fst_set: Some(set),
        })
    }

    /// Compile words into an fst set file. Keys are sorted and de-duplicated.
    ///
    /// Returns the number of distinct words written.
    pub fn build_fst<I, S, P>(words: I, path: P) -> Result<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        P: AsRef<Path>,
    {
        let mut keys: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().to_string())
            .filter(|w| !w.is_empty())
            .collect();
        keys.sort();
        keys.dedup();

        let writer = BufWriter::new(File::create(path.as_ref())?);
        let mut builder = SetBuilder::new(writer)?;
        for key in &keys {
            builder.insert(key)?;
        }
        builder.finish()?;
        Ok(keys.len())
    }

    /// Words of the in-memory set, sorted (compiled entries excluded).
    pub fn words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

/// Read learned `old\tnew` pairs; extra columns are ignored.
///
/// Lines without a tab are skipped with a warning. Later pairs override
/// earlier ones for the same old form.
pub fn read_pairs<R: BufRead>(reader: R) -> Result<HashMap<String, String>> {
    let mut pairs = HashMap::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        match (fields.next(), fields.next()) {
            (Some(old), Some(new)) if !old.is_empty() && !new.is_empty() => {
                pairs.insert(old.to_string(), new.to_string());
            }
            _ => tracing::warn!(line = n + 1, "skipping malformed learned pair"),
        }
    }
    Ok(pairs)
}

/// Load a learned pairs file (see [`read_pairs`]).
pub fn load_pairs<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>> {
    let file = File::open(path.as_ref())?;
    let pairs = read_pairs(BufReader::new(file))?;
    tracing::debug!(path = %path.as_ref().display(), pairs = pairs.len(), "loaded learned pairs");
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_membership_is_exact() {
        let lx = Lexicon::from_words(["tête", "roi"]);
        assert!(lx.contains("tête"));
        assert!(!lx.contains("Tête"));
        assert!(!lx.contains("teste"));
        assert_eq!(lx.len(), 2);
    }

    #[test]
    fn word_list_reads_first_column() {
        let data = "tête\tNOM\n\nroi\n  avec \n";
        let lx = Lexicon::read_word_list(data.as_bytes()).unwrap();
        assert_eq!(lx.words(), vec!["avec", "roi", "tête"]);
    }

    #[test]
    fn word_list_is_composed() {
        let lx = Lexicon::read_word_list("te\u{302}te\n".as_bytes()).unwrap();
        assert!(lx.contains("t\u{ea}te"));
    }

    #[test]
    fn fst_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("modern.fst");
        let n = Lexicon::build_fst(["roi", "tête", "avec", "roi", ""], &path).unwrap();
        assert_eq!(n, 3);

        let mut lx = Lexicon::load_fst(&path).unwrap();
        assert!(lx.contains("tête"));
        assert!(!lx.contains("teste"));
        lx.insert("teste");
        assert!(lx.contains("teste"));
        assert_eq!(lx.len(), 4);
    }

    #[test]
    fn learned_pairs_skip_malformed_lines() {
        let data = "roy\troi\t12\nmalformed\n\nfaict\tfait\n\tvide\n";
        let pairs = read_pairs(data.as_bytes()).unwrap();
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs["roy"], "roi");
        assert_eq!(pairs["faict"], "fait");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Lexicon::load_fst("/nonexistent/lexicon.fst").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
