// libfrench/src/candidates.rs
//
// Candidate modern spellings for a single historical word.
//
// Generation runs in three phases:
// 1. a baseline pass of unconditional normalizations (long s, ligatures,
//    tildes, a few fixed endings);
// 2. conditional rewrites, each appending variants of the baseline when its
//    trigger is present;
// 3. a second-order pass over a snapshot of everything produced so far,
//    adding diacritic and u/v variants.
//
// The first candidate is always the baseline. Duplicates are kept; callers
// pick the first candidate they recognize.

use once_cell::sync::Lazy;
use regex::Regex;

/// Plain substitutions applied in order by the baseline pass.
static BASELINE_REPLACEMENTS: &[(&str, &str)] = &[
    ("ſ", "s"),
    ("ß", "ss"),
    ("&", "et"),
    // Nasal tildes: doubled before m/n, expanded elsewhere
    ("ãm", "amm"),
    ("ãn", "ann"),
    ("ã", "an"),
    ("ẽm", "emm"),
    ("ẽn", "enn"),
    ("ẽ", "en"),
    ("õm", "omm"),
    ("õn", "onn"),
    ("õ", "on"),
];

/// Regex rewrites applied in order by the baseline pass, after the plain
/// substitutions. Unanchored patterns rewrite every occurrence.
static BASELINE_REWRITES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        // sçavoir → savoir
        (r"^([Ss])[CÇcç]", "${1}"),
        (r"^scau", "sau"),
        // loing → loin
        (r"oing$", "oin"),
        // roy → roi
        (r"y$", "i"),
        (r"sch", "ch"),
        // proye → proie
        (r"([ao])ye$", "${1}ie"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

static VOWEL_DV: Lazy<Regex> = Lazy::new(|| Regex::new(r"([aeiou])dv").unwrap());
static NASAL_S_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"([ae])ns$").unwrap());
static OI_VERB: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.{2,})oi([est])").unwrap());
static OI_ST_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.{2,})oi([st])$").unwrap());
static OIENT_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"(.{2,})oient$").unwrap());
static EZ_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"e[Zz]$").unwrap());
static ES_ACUTE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"és$").unwrap());
static CQUE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"cques?$").unwrap());
static VOWEL_S_CONSONANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[aeiou]s[mnqt]").unwrap());
static E_BEFORE_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"e([^\$\(\)s])").unwrap());

/// Vowel + s + m/n/q/t → circumflex vowel, one vowel at a time.
static CIRCUMFLEX: Lazy<Vec<Regex>> = Lazy::new(|| {
    ["as", "es", "is", "os", "us"]
        .iter()
        .map(|vs| Regex::new(&format!("{}([mnqt])", vs)).unwrap())
        .collect()
});
const CIRCUMFLEX_VOWELS: [&str; 5] = ["â", "ê", "î", "ô", "û"];

static ACUTE_LOWER: Lazy<Regex> = Lazy::new(|| Regex::new(r"es([mnqt])").unwrap());
static ACUTE_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"Es([mnqt])").unwrap());

/// Unconditional normalization of `word`; always the first candidate.
pub fn baseline(word: &str) -> String {
    let mut s = word.to_string();
    for (from, to) in BASELINE_REPLACEMENTS {
        if s.contains(from) {
            s = s.replace(from, to);
        }
    }
    for (re, replacement) in BASELINE_REWRITES.iter() {
        s = re.replace_all(&s, *replacement).into_owned();
    }
    s
}

/// Ordered candidate set for `word`, baseline first.
///
/// # Example
/// ```
/// let candidates = libfrench::generate_candidates("avecques");
/// assert_eq!(candidates[0], "avecques");
/// assert!(candidates.iter().any(|c| c == "avec"));
/// ```
pub fn generate_candidates(word: &str) -> Vec<String> {
    let s = baseline(word);
    let mut mods = vec![s.clone()];

    // Etymological consonants
    if s.contains("ct") {
        mods.push(s.replace("ct", "t"));
    }
    if CQUE_END.is_match(&s) {
        mods.push(CQUE_END.replace(&s, "c").into_owned());
    }
    if VOWEL_DV.is_match(&s) {
        mods.push(VOWEL_DV.replace_all(&s, "${1}v").into_owned());
    }

    // presens → presents / presends
    if NASAL_S_END.is_match(&s) {
        mods.push(NASAL_S_END.replace(&s, "${1}nts").into_owned());
        mods.push(NASAL_S_END.replace(&s, "${1}nds").into_owned());
    }

    // Verb endings
    if OI_VERB.is_match(&s) {
        mods.push(OI_ST_END.replace(&s, "${1}ai${2}").into_owned());
        mods.push(OIENT_END.replace(&s, "${1}aient").into_owned());
    }
    if EZ_END.is_match(&s) {
        mods.push(EZ_END.replace(&s, "és").into_owned());
    }
    if ES_ACUTE_END.is_match(&s) {
        mods.push(ES_ACUTE_END.replace(&s, "ez").into_owned());
    }

    // s before m/n/q/t: dropped, or folded into an accent
    if VOWEL_S_CONSONANT.is_match(&s) {
        mods.push(s.replace("st", "t"));
        mods.push(s.replace("est", "ét"));

        let mut circumflex = s.clone();
        for (re, vowel) in CIRCUMFLEX.iter().zip(CIRCUMFLEX_VOWELS) {
            circumflex = re.replace_all(&circumflex, format!("{}${{1}}", vowel)).into_owned();
        }
        mods.push(circumflex);

        let acute = ACUTE_LOWER.replace_all(&s, "é${1}").into_owned();
        mods.push(ACUTE_UPPER.replace_all(&acute, "É${1}").into_owned());
    }

    if s.contains('y') {
        mods.push(s.replace('y', "i"));
    }
    if s.contains('ü') {
        mods.push(s.replace('ü', "u"));
        mods.push(s.replace("eü", "u"));
    }

    // Second order: is/ai triggers look at the baseline, the others at
    // each candidate.
    let snapshot = mods.clone();
    for m in &snapshot {
        if s.contains("is") {
            mods.push(m.replace("is", "î"));
        }
        if s.contains("ai") {
            mods.push(m.replace("ai", "aî"));
        }
        if m.contains('u') {
            mods.push(m.replace('u', "v"));
        }
        if m.contains('v') {
            mods.push(m.replace('v', "u"));
        }
        if m.contains('e') {
            mods.push(E_BEFORE_LETTER.replace_all(m, "é${1}").into_owned());
        }
    }

    tracing::trace!(word, candidates = mods.len(), "generated candidates");
    mods
}
