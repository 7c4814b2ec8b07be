// libfrench/tests/classifier_properties.rs
//
// Property tests for the French catalog over generated pairs.
//
// Tests cover:
// - Diff count equals the number of emitted units
// - Units cover disjoint, increasing spans and every divergent position
// - Fragments are the aligned text under their span
// - Repeated classification yields the same diff list

use libfrench::{Classification, Engine, FRENCH_CATALOG};
use proptest::prelude::*;

const ALPHABET: &[char] = &[
    'a', 'c', 'e', 'é', 'ê', 'i', 'l', 'n', 'o', 'p', 'q', 's', 'ſ', 't', 'u', 'v', 'y', '¤', 'E',
];

fn unit() -> impl Strategy<Value = char> {
    prop::sample::select(ALPHABET.to_vec())
}

fn check_coverage(old: &str, new: &str, result: &Classification) -> Result<(), TestCaseError> {
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();
    prop_assert_eq!(result.count(), result.diffs().len());
    prop_assert_eq!(result.spans().len(), result.diffs().len());

    let mut covered = vec![false; old.len()];
    let mut end = 0;
    for (span, diff) in result.spans().iter().zip(result.diffs()) {
        prop_assert!(span.start >= end, "span {:?} overlaps an earlier unit", span);
        prop_assert!(span.end <= old.len());
        prop_assert_eq!(diff.old.clone(), old[span.clone()].iter().collect::<String>());
        prop_assert_eq!(diff.new.clone(), new[span.clone()].iter().collect::<String>());
        for slot in &mut covered[span.clone()] {
            *slot = true;
        }
        end = span.end;
    }
    for i in 0..old.len() {
        if old[i] != new[i] {
            prop_assert!(covered[i], "divergent position {} left uncovered", i);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn aligned_pairs_are_covered_once(pairs in prop::collection::vec((unit(), unit()), 0..12)) {
        let old: String = pairs.iter().map(|(o, _)| *o).collect();
        let new: String = pairs.iter().map(|(_, n)| *n).collect();
        let result = FRENCH_CATALOG.classify(&old, &new).unwrap();
        check_coverage(&old, &new, &result)?;
    }

    #[test]
    fn labeled_pipeline_is_covered_once(old in "[aceéêilnopqsſtuvy]{0,9}", new in "[aceéêilnopqsſtuvy]{0,9}") {
        let engine = Engine::default();
        let (alignment, result) = engine.label_pair(&old, &new).unwrap();
        check_coverage(&alignment.old_string(), &alignment.new_string(), &result)?;
    }

    #[test]
    fn classification_is_deterministic(pairs in prop::collection::vec((unit(), unit()), 0..12)) {
        let old: String = pairs.iter().map(|(o, _)| *o).collect();
        let new: String = pairs.iter().map(|(_, n)| *n).collect();
        let first = FRENCH_CATALOG.classify(&old, &new).unwrap();
        let second = FRENCH_CATALOG.classify(&old, &new).unwrap();
        prop_assert_eq!(first, second);
    }
}
