//! Sentence-level tokenizing around word modernization.
//!
//! `preprocess` spreads a sentence into space-separated tokens (apostrophes,
//! punctuation and `<tags>` become tokens of their own); `postprocess` glues
//! the modernized tokens back together.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static APOSTROPHE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(['’])").unwrap());
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"([.,!?;:])").unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(<.*>)").unwrap());
static OPENING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(<[^/].*>)").unwrap());
static CLOSING_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(</.*>)").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());
static SPACED_APOSTROPHE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(['’]) ").unwrap());
static SPACED_STOP: Lazy<Regex> = Lazy::new(|| Regex::new(r" ([.,])").unwrap());

/// Split apostrophes, punctuation and tags away from words.
///
/// With `unify_apostrophes`, every apostrophe becomes `’`.
pub fn preprocess(s: &str, unify_apostrophes: bool) -> String {
    let s = if unify_apostrophes {
        APOSTROPHE.replace_all(s, "’ ")
    } else {
        APOSTROPHE.replace_all(s, "${1} ")
    };
    let s = PUNCTUATION.replace_all(&s, " ${1}");
    TAG.replace_all(&s, " ${1} ").into_owned()
}

/// Undo [`preprocess`] spacing; apostrophes come back as `'`.
pub fn postprocess(s: &str) -> String {
    let s = OPENING_TAG.replace_all(s, " ${1}");
    let s = CLOSING_TAG.replace_all(&s, "${1} ");
    let s = SPACES.replace_all(&s, " ");
    let s = SPACED_APOSTROPHE.replace_all(&s, "'");
    SPACED_STOP.replace_all(&s, "${1}").into_owned()
}

/// Modernize every token of a sentence with `modernize_word`.
///
/// Input is NFC-normalized first so that decomposed accents match the
/// dictionaries.
pub fn modernize_sentence<F>(s: &str, unify_apostrophes: bool, mut modernize_word: F) -> String
where
    F: FnMut(&str) -> String,
{
    let composed: String = s.nfc().collect();
    let spread = preprocess(&composed, unify_apostrophes);
    let tokens: Vec<String> = spread
        .split(' ')
        .map(|token| {
            if token.is_empty() {
                String::new()
            } else {
                modernize_word(token)
            }
        })
        .collect();
    postprocess(&tokens.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_separates_apostrophes_and_punctuation() {
        assert_eq!(preprocess("l'homme, dit-il.", true), "l’ homme , dit-il .");
        assert_eq!(preprocess("l'homme", false), "l' homme");
    }

    #[test]
    fn preprocess_isolates_tags() {
        assert_eq!(preprocess("<i>roy</i>", true), " <i>roy</i> ");
    }

    #[test]
    fn postprocess_glues_tokens_back() {
        assert_eq!(postprocess("l’ homme , dit-il ."), "l'homme, dit-il.");
        assert_eq!(postprocess("vient   ici !"), "vient ici !");
    }

    #[test]
    fn identity_round_trip_keeps_plain_sentences() {
        let out = modernize_sentence("Le roi est venu.", true, |w| w.to_string());
        assert_eq!(out, "Le roi est venu.");
    }

    #[test]
    fn tokens_are_modernized_one_by_one() {
        let out = modernize_sentence("le roy l'a dit", true, |w| w.replace('y', "i"));
        assert_eq!(out, "le roi l'a dit");
    }

    #[test]
    fn decomposed_input_is_composed() {
        let mut seen = Vec::new();
        modernize_sentence("te\u{302}te", true, |w| {
            seen.push(w.to_string());
            w.to_string()
        });
        assert_eq!(seen, vec!["tête"]);
    }
}
