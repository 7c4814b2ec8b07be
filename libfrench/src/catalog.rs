// libfrench/src/catalog.rs
//
// Ordered rule catalog labeling differences between Middle / Early Modern
// French spellings and their contemporary forms.
//
// Order matters. Multi-position patterns come before the single-position
// substitutions they overlap (a three-letter nasal rule before a two-letter
// one, "es → é" before "s → z"), and the single-position special cases come
// before the generic accent and deletion rules at the end.

use libancien_core::Pattern::{Classes, Fragments, Predicate};
use libancien_core::{Rule, RuleCatalog, Window};
use once_cell::sync::Lazy;

/// Version of [`FRENCH_RULES`]; bump whenever an entry is added or moved.
pub const CATALOG_VERSION: &str = "fr-1.2";

/// Shared, immutable French catalog.
pub static FRENCH_CATALOG: Lazy<RuleCatalog> =
    Lazy::new(|| RuleCatalog::new(CATALOG_VERSION, FRENCH_RULES));

const SUPPRESSION_ETYMOLOGIQUE: &[&str] = &["suppression lettre étymologique"];
const DOUBLE_CONSONNE: &[&str] = &["double consonne"];
const CQUE: &[&str] = &["cque/que → c"];
const MT_NT: &[&str] = &["mt/nt → mpt"];
const US_E: &[&str] = &["terminaison latine us → e"];

fn case_only(w: &Window<'_>) -> bool {
    w.raw_old_at(0) != w.raw_new_at(0) && w.old_at(0) == w.new_at(0)
}

fn after_c(w: &Window<'_>) -> bool {
    w.old_at(-1) == Some('c') && w.new_at(-1) == Some('c')
}

// avecques → avec¤¤¤¤
fn cques_after_c(w: &Window<'_>) -> bool {
    after_c(w) && w.old_is(0, "ques") && w.new_is(0, "¤¤¤¤")
}

// aveque → avec¤¤ is handled by a fragment rule; donques → donc¤¤¤ here
fn cque_after_c(w: &Window<'_>) -> bool {
    after_c(w) && w.old_is(0, "que") && w.new_is(0, "¤¤¤")
}

// ¤l / ll, or ll / ¤l
fn doubled_ahead(w: &Window<'_>) -> bool {
    let (o0, o1, n0, n1) = (w.old_at(0), w.old_at(1), w.new_at(0), w.new_at(1));
    if o1.is_none() {
        return false;
    }
    (o0 == Some('¤') && o1 == n0 && n0 == n1) || (n0 == Some('¤') && n1 == o0 && o0 == o1)
}

// l¤ / ll, or ll / l¤
fn doubled_behind(w: &Window<'_>) -> bool {
    let (o0, p0, n0, q0) = (w.old_at(0), w.old_at(-1), w.new_at(0), w.new_at(-1));
    if p0.is_none() {
        return false;
    }
    (o0 == Some('¤') && p0 == n0 && n0 == q0) || (n0 == Some('¤') && q0 == o0 && o0 == p0)
}

// aultre → au¤tre; the vowel itself must be unchanged
fn l_dropped_after_vowel(w: &Window<'_>) -> bool {
    matches!(w.old_at(-1), Some('u' | 'i'))
        && w.old_at(-1) == w.new_at(-1)
        && w.old_at(0) == Some('l')
        && w.new_at(0) == Some('¤')
}

fn final_y(w: &Window<'_>) -> bool {
    w.at_last() && w.old_at(0) == Some('y') && matches!(w.new_at(0), Some('i' | 'ï'))
}

// aimoit → aimait, aimois → aimais, aimoient → aimaient
fn imperfect_o(w: &Window<'_>) -> bool {
    w.old_at(0) == Some('o')
        && w.new_at(0) == Some('a')
        && ["it", "is", "ient"].iter().any(|ending| w.tail_is(1, ending))
}

/// The French rule catalog, in evaluation order.
pub static FRENCH_RULES: &[Rule] = &[
    Rule::new(&["majuscule"], 1, &[Predicate(case_only)]),
    Rule::new(&["s long"], 1, &[Classes { old: "ſ", new: "sz" }]),
    Rule::new(
        &["erreur OCR"],
        1,
        &[
            Classes { old: "lf", new: "s" },
            Classes { old: "ſ", new: "lf" },
            Classes { old: "r", new: "t" },
            Classes { old: "n", new: "r" },
            Classes { old: "i", new: "l" },
            Classes { old: "u", new: "n" },
            Classes { old: "l", new: "ij" },
        ],
    ),
    // Nasal and diphthong clusters
    Rule::new(&["oing → oin"], 4, &[Fragments { old: &["oing"], new: &["oin¤"] }]).behind(3),
    Rule::new(&["ain ↔ ein"], 3, &[Fragments { old: &["ain"], new: &["ein"] }]),
    Rule::new(&["eoi → oi"], 3, &[Fragments { old: &["eoi"], new: &["¤oi"] }]),
    Rule::new(&["ein → in"], 3, &[Fragments { old: &["ein"], new: &["¤in"] }]),
    Rule::new(&["eil → il"], 3, &[Fragments { old: &["eil"], new: &["¤il"] }]),
    Rule::new(&["nn → mn"], 2, &[Fragments { old: &["nn"], new: &["mn"] }]),
    Rule::new(MT_NT, 3, &[Fragments { old: &["n¤t", "¤nt"], new: &["mpt"] }]),
    Rule::new(MT_NT, 3, &[Fragments { old: &["m¤t"], new: &["mpt"] }]).behind(1),
    Rule::new(
        SUPPRESSION_ETYMOLOGIQUE,
        3,
        &[
            Fragments { old: &["ept"], new: &["e¤t"] },
            Fragments { old: &["ipt"], new: &["i¤t"] },
            Fragments { old: &["opc"], new: &["o¤c"] },
        ],
    )
    .behind(1),
    Rule::new(US_E, 3, &[Fragments { old: &["eus"], new: &["e¤¤"] }]),
    Rule::new(US_E, 2, &[Fragments { old: &["us"], new: &["e¤", "¤e"] }]),
    Rule::new(&["au → eau"], 3, &[Fragments { old: &["¤au"], new: &["eau"] }]),
    Rule::new(CQUE, 4, &[Predicate(cques_after_c)]),
    Rule::new(CQUE, 3, &[Fragments { old: &["que"], new: &["c¤¤"] }]),
    Rule::new(CQUE, 3, &[Predicate(cque_after_c)]),
    // Segmentation and ligatures
    Rule::new(
        &["séparation avec apostrophe"],
        2,
        &[Fragments { old: &["¤¤"], new: &["' ", "’ "] }],
    ),
    Rule::new(
        &["œ ↔ oe"],
        2,
        &[
            Fragments { old: &["œ¤", "¤œ"], new: &["oe"] },
            Fragments { old: &["oe"], new: &["œ¤", "¤œ"] },
        ],
    ),
    Rule::new(&["contraction"], 2, &[Fragments { old: &["' ", "’ "], new: &["¤¤"] }]),
    // Two-position vowel and consonant clusters
    Rule::new(
        &["ai/ei → e/è"],
        2,
        &[Fragments { old: &["ai", "ei"], new: &["è¤", "¤è", "e¤", "¤e"] }],
    ),
    Rule::new(
        &["an/am ↔ en/em"],
        2,
        &[
            Fragments { old: &["an"], new: &["en"] },
            Fragments { old: &["en"], new: &["an"] },
            Fragments { old: &["am"], new: &["em"] },
            Fragments { old: &["em"], new: &["am"] },
        ],
    ),
    Rule::new(&["gd → d"], 2, &[Fragments { old: &["gd"], new: &["¤d"] }]),
    Rule::new(&["ct → t"], 2, &[Fragments { old: &["ct"], new: &["¤t"] }]),
    Rule::new(&["nt → mt"], 2, &[Fragments { old: &["nt"], new: &["mt"] }]),
    Rule::new(
        &["qu ↔ c"],
        2,
        &[
            Fragments { old: &["qu"], new: &["¤c", "c¤"] },
            Fragments { old: &["¤c", "c¤"], new: &["qu"] },
        ],
    ),
    Rule::new(&["f → ph"], 2, &[Fragments { old: &["¤f", "f¤"], new: &["ph"] }]),
    Rule::new(&["as → â"], 2, &[Fragments { old: &["aſ", "as"], new: &["â¤"] }]),
    Rule::new(&["es → é"], 2, &[Fragments { old: &["eſ", "es"], new: &["é¤"] }]),
    Rule::new(
        &["voyelle + s → accent circonflexe"],
        2,
        &[
            Fragments { old: &["es", "eſ"], new: &["ê¤"] },
            Fragments { old: &["is", "iſ"], new: &["î¤"] },
            Fragments { old: &["os", "oſ"], new: &["ô¤"] },
            Fragments { old: &["us", "uſ"], new: &["û¤"] },
        ],
    ),
    Rule::new(DOUBLE_CONSONNE, 2, &[Fragments { old: &["ſ¤", "¤ſ"], new: &["ss"] }]),
    Rule::new(&["suppression l après voyelle"], 2, &[Predicate(l_dropped_after_vowel)]).behind(1),
    Rule::new(&["ph → f"], 2, &[Fragments { old: &["ph"], new: &["¤f", "f¤"] }]),
    Rule::new(
        &["o ↔ au"],
        2,
        &[
            Fragments { old: &["¤o", "o¤"], new: &["au"] },
            Fragments { old: &["au"], new: &["¤o", "o¤"] },
        ],
    ),
    Rule::new(&["esperluette"], 2, &[Fragments { old: &["&¤", "¤&"], new: &["et"] }]),
    Rule::new(&["eszett"], 2, &[Fragments { old: &["ß¤", "¤ß"], new: &["ss"] }]),
    Rule::new(
        &["eu → u"],
        2,
        &[Fragments { old: &["eu", "eû", "ev", "eü"], new: &["¤u", "¤û"] }],
    ),
    Rule::new(&["terminaison y → is"], 2, &[Fragments { old: &["y¤"], new: &["is"] }]),
    Rule::new(
        &["voyelle + lt → voyelle + t"],
        2,
        &[Fragments { old: &["lt"], new: &["¤t"] }],
    ),
    Rule::new(&["gn → nn"], 2, &[Fragments { old: &["gn"], new: &["nn"] }]),
    Rule::new(
        &["élision es → apostrophe"],
        2,
        &[Fragments { old: &["es"], new: &["¤'", "¤’", "'¤", "’¤"] }],
    ),
    Rule::new(
        &["tilde → voyelle + m/n"],
        2,
        &[
            Fragments { old: &["ã¤", "¤ã"], new: &["am", "an"] },
            Fragments { old: &["ẽ¤", "¤ẽ"], new: &["em", "en"] },
            Fragments { old: &["õ¤", "¤õ", "ō¤", "¤ō"], new: &["om", "on"] },
            Fragments { old: &["ũ¤", "¤ũ"], new: &["um", "un"] },
        ],
    ),
    Rule::new(&["sc → s"], 2, &[Fragments { old: &["sc", "sç", "ſc", "ſç"], new: &["s¤"] }]),
    Rule::new(DOUBLE_CONSONNE, 2, &[Predicate(doubled_ahead)]),
    Rule::new(DOUBLE_CONSONNE, 1, &[Predicate(doubled_behind)]),
    // Single-position substitutions
    Rule::new(
        &["cédille"],
        1,
        &[Classes { old: "c", new: "ç" }, Classes { old: "ç", new: "c" }],
    ),
    Rule::new(&["lettre calligraphique"], 1, &[Predicate(final_y)]),
    Rule::new(&["transformation interne y → i/ï"], 1, &[Classes { old: "y", new: "iï" }]),
    Rule::new(&["i → y"], 1, &[Classes { old: "iï", new: "y" }]),
    Rule::new(&["x/z → s"], 1, &[Classes { old: "xz", new: "s" }]),
    Rule::new(&["c → s"], 1, &[Classes { old: "c", new: "s" }]),
    Rule::new(&["s → z"], 1, &[Classes { old: "sſ", new: "z" }]),
    Rule::new(&["s → t"], 1, &[Classes { old: "sſ", new: "t" }]),
    Rule::new(&["s → c"], 1, &[Classes { old: "sſ", new: "c" }]),
    Rule::new(&["d → t"], 1, &[Classes { old: "d", new: "t" }]),
    Rule::new(&["t → d"], 1, &[Classes { old: "t", new: "d" }]),
    Rule::new(&["o → a imparfait/conditionnel"], 1, &[Predicate(imperfect_o)]),
    Rule::new(&["o → a sauf imparfait/conditionnel"], 1, &[Classes { old: "o", new: "a" }]),
    Rule::new(&["apostrophe → e"], 1, &[Classes { old: "'’", new: "e" }]),
    Rule::new(&["o → œ"], 1, &[Classes { old: "o", new: "œ" }]),
    Rule::new(&["æ → e"], 1, &[Classes { old: "æ", new: "eé" }]),
    Rule::new(&["œ → e"], 1, &[Classes { old: "œ", new: "eé" }]),
    Rule::new(&["ajout h mot grec"], 1, &[Classes { old: "¤", new: "h" }]),
    // Diacritics
    Rule::new(&["ajout accent aigu"], 1, &[Classes { old: "e", new: "é" }]),
    Rule::new(
        &["ajout accent grave"],
        1,
        &[
            Classes { old: "a", new: "à" },
            Classes { old: "e", new: "è" },
            Classes { old: "i", new: "ì" },
            Classes { old: "o", new: "ò" },
            Classes { old: "u", new: "ù" },
        ],
    ),
    Rule::new(
        &["ajout accent circonflexe"],
        1,
        &[
            Classes { old: "a", new: "â" },
            Classes { old: "e", new: "ê" },
            Classes { old: "i", new: "î" },
            Classes { old: "o", new: "ô" },
            Classes { old: "u", new: "û" },
        ],
    ),
    Rule::new(
        &["ajout tréma"],
        1,
        &[
            Classes { old: "a", new: "ä" },
            Classes { old: "e", new: "ë" },
            Classes { old: "i", new: "ï" },
            Classes { old: "o", new: "ö" },
            Classes { old: "u", new: "ü" },
        ],
    ),
    Rule::new(&["retrait accent aigu"], 1, &[Classes { old: "é", new: "e" }]),
    Rule::new(
        &["retrait accent grave"],
        1,
        &[
            Classes { old: "à", new: "a" },
            Classes { old: "è", new: "e" },
            Classes { old: "ì", new: "i" },
            Classes { old: "ò", new: "o" },
            Classes { old: "ù", new: "u" },
        ],
    ),
    Rule::new(
        &["retrait accent circonflexe"],
        1,
        &[
            Classes { old: "â", new: "a" },
            Classes { old: "ê", new: "e" },
            Classes { old: "î", new: "i" },
            Classes { old: "ô", new: "o" },
            Classes { old: "û", new: "u" },
        ],
    ),
    Rule::new(
        &["retrait tréma"],
        1,
        &[
            Classes { old: "ä", new: "a" },
            Classes { old: "ë", new: "e" },
            Classes { old: "ï", new: "i" },
            Classes { old: "ö", new: "o" },
            Classes { old: "ü", new: "u" },
        ],
    ),
    Rule::new(
        &["changement accent"],
        1,
        &[
            Classes { old: "äàâ", new: "äàâ" },
            Classes { old: "ëèê", new: "ëèê" },
            Classes { old: "ïìî", new: "ïìî" },
            Classes { old: "öòô", new: "öòô" },
            Classes { old: "üùû", new: "üùû" },
        ],
    ),
    // Punctuation and word boundaries
    Rule::new(&["apostrophe"], 1, &[Classes { old: "'’", new: "'’" }]),
    Rule::new(&["fusion"], 1, &[Classes { old: " -", new: "-¤" }]),
    Rule::new(&["séparation"], 1, &[Classes { old: "¤-", new: "- " }]),
    Rule::new(&["ajout d/t terminaison"], 1, &[Classes { old: "¤", new: "dt" }]),
    Rule::new(
        &["lettre ramiste"],
        1,
        &[Classes { old: "uv", new: "uv" }, Classes { old: "ij", new: "ij" }],
    ),
    Rule::new(SUPPRESSION_ETYMOLOGIQUE, 1, &[Classes { old: "ſshtdcçb", new: "¤" }]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_rule_is_well_formed() {
        for (i, rule) in FRENCH_RULES.iter().enumerate() {
            assert!(rule.is_well_formed(), "rule {} ({:?}) is malformed", i, rule.labels);
        }
    }

    #[test]
    fn fragments_match_their_window_width() {
        for rule in FRENCH_RULES {
            for pattern in rule.patterns {
                if let Fragments { old, new } = pattern {
                    for f in old.iter().chain(new.iter()) {
                        assert_eq!(f.chars().count(), rule.width, "{:?} in {:?}", f, rule.labels);
                    }
                }
            }
        }
    }

    #[test]
    fn case_rule_comes_first() {
        assert_eq!(FRENCH_CATALOG.rules()[0].labels, &["majuscule"]);
        assert_eq!(FRENCH_CATALOG.version(), CATALOG_VERSION);
    }

    #[test]
    fn catalog_has_about_eighty_entries() {
        let n = FRENCH_CATALOG.len();
        assert!((75..=85).contains(&n), "unexpected catalog size {}", n);
        let labels: HashSet<_> = FRENCH_RULES.iter().flat_map(|r| r.labels.iter()).collect();
        assert!(labels.len() > 60);
    }

    #[test]
    fn specific_rules_precede_generic_ones() {
        let position = |label: &str| {
            FRENCH_RULES
                .iter()
                .position(|r| r.labels.iter().any(|l| *l == label))
                .unwrap()
        };
        assert!(position("es → é") < position("s → z"));
        assert!(position("voyelle + s → accent circonflexe") == position("es → é") + 1);
        assert!(position("ain ↔ ein") < position("an/am ↔ en/em"));
        assert!(position("lettre calligraphique") < position("transformation interne y → i/ï"));
        assert!(position("o → a imparfait/conditionnel") < position("o → a sauf imparfait/conditionnel"));
    }
}
