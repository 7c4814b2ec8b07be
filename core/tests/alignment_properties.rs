// core/tests/alignment_properties.rs
//
// Property tests for the alignment engine.
//
// Tests cover:
// - Equal-length output that strips back to the inputs
// - No column pairs two gap markers
// - Reported score equals the sum of column scores and beats naive alignments
// - Symmetry of the optimal score and determinism of the output

use libancien_core::{align_chars, align_words, AffinityTable, Scorer, ScoringScheme, UnitMode, GAP};
use proptest::prelude::*;

fn affinity() -> AffinityTable {
    AffinityTable::from_rules(&["e=é:2", "e=ê:2", "y=i:3", "u=v:3"])
}

fn strip(units: &[String]) -> String {
    units.iter().filter(|u| u.as_str() != GAP).map(String::as_str).collect()
}

/// Pairs units position by position and pads the tail with gaps.
fn naive_score(old: &str, new: &str, scorer: &Scorer<'_>) -> i32 {
    let a: Vec<char> = old.chars().collect();
    let b: Vec<char> = new.chars().collect();
    let common = a.len().min(b.len());
    let paired: i32 = a
        .iter()
        .zip(&b)
        .map(|(x, y)| scorer.score(&x.to_string(), &y.to_string()))
        .sum();
    let tail = (a.len().max(b.len()) - common) as i32;
    paired + tail * scorer.gap_penalty()
}

proptest! {
    #[test]
    fn aligned_sides_have_equal_length(old in "[abcdeéêsty]{0,10}", new in "[abcdeéêsty]{0,10}") {
        let table = affinity();
        let scorer = Scorer::new(ScoringScheme::default(), UnitMode::Character).with_affinity(&table);
        let al = align_chars(&old, &new, &scorer).unwrap();
        prop_assert_eq!(al.old.len(), al.new.len());
        prop_assert_eq!(strip(&al.old), old);
        prop_assert_eq!(strip(&al.new), new);
    }

    #[test]
    fn no_column_pairs_two_gaps(old in "[abcdeéêsty]{0,10}", new in "[abcdeéêsty]{0,10}") {
        let scorer = Scorer::new(ScoringScheme::default(), UnitMode::Character);
        let al = align_chars(&old, &new, &scorer).unwrap();
        prop_assert!(al.pairs().all(|(a, b)| !(a == GAP && b == GAP)), "double gap in {:?}", al);
    }

    #[test]
    fn score_is_sum_of_columns_and_optimal(old in "[abcdeéêsty]{0,8}", new in "[abcdeéêsty]{0,8}") {
        let table = affinity();
        let scorer = Scorer::new(ScoringScheme::default(), UnitMode::Character).with_affinity(&table);
        let al = align_chars(&old, &new, &scorer).unwrap();
        prop_assert_eq!(al.total_score(&scorer), al.score);
        prop_assert!(al.score >= naive_score(&old, &new, &scorer));
        let all_gaps = (old.chars().count() + new.chars().count()) as i32 * scorer.gap_penalty();
        prop_assert!(al.score >= all_gaps);
    }

    #[test]
    fn optimal_score_is_symmetric(old in "[abcdeéêsty]{0,8}", new in "[abcdeéêsty]{0,8}") {
        let table = affinity();
        let scorer = Scorer::new(ScoringScheme::default(), UnitMode::Character).with_affinity(&table);
        let forward = align_chars(&old, &new, &scorer).unwrap();
        let backward = align_chars(&new, &old, &scorer).unwrap();
        prop_assert_eq!(forward.score, backward.score);
    }

    #[test]
    fn alignment_is_deterministic(old in "[a-e ]{0,12}", new in "[a-e ]{0,12}") {
        let scorer = Scorer::new(ScoringScheme::default(), UnitMode::Word);
        let first = align_words(&old, &new, &scorer).unwrap();
        let second = align_words(&old, &new, &scorer).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn case_never_changes_the_score() {
    let scorer = Scorer::new(ScoringScheme::default(), UnitMode::Character);
    let lower = align_chars("roy", "roi", &scorer).unwrap();
    let upper = align_chars("ROY", "roi", &scorer).unwrap();
    assert_eq!(lower.score, upper.score, "case folding should not affect scores");
    assert_eq!(upper.old_string(), "ROY", "aligned units keep their case");
}
