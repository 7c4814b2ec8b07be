//! Weighted edit distance between words.
//!
//! Used by word-mode scoring to reward near-identical words. Substitutions
//! between symbols with a positive affinity cost half the regular price, so
//! `estoit`/`étoit` is closer than `estoit`/`exploit`.

use crate::affinity::AffinityTable;

/// Per-operation edit costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditCosts {
    pub insert: u32,
    pub delete: u32,
    pub substitute: u32,
}

impl EditCosts {
    pub const fn new(insert: u32, delete: u32, substitute: u32) -> Self {
        Self {
            insert,
            delete,
            substitute,
        }
    }
}

/// Costs used when scoring word pairs: a substitution is an insert plus a delete.
pub const WORD_COSTS: EditCosts = EditCosts::new(1, 1, 2);

fn substitution_cost(a: char, b: char, costs: EditCosts, table: Option<&AffinityTable>) -> u32 {
    if a == b {
        return 0;
    }
    let related = table
        .and_then(|t| {
            let mut ka = [0u8; 4];
            let mut kb = [0u8; 4];
            t.get(a.encode_utf8(&mut ka), b.encode_utf8(&mut kb))
        })
        .map_or(false, |score| score > 0);
    if related {
        costs.substitute / 2
    } else {
        costs.substitute
    }
}

/// Full weighted Levenshtein distance over chars.
pub fn weighted_levenshtein(
    a: &str,
    b: &str,
    costs: EditCosts,
    table: Option<&AffinityTable>,
) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<u32> = (0..=b.len() as u32).map(|j| j * costs.insert).collect();
    let mut curr: Vec<u32> = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = (i as u32 + 1) * costs.delete;
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = (curr[j] + costs.insert)
                .min(prev[j + 1] + costs.delete)
                .min(prev[j] + substitution_cost(ca, cb, costs, table));
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Weighted distance, or `None` once it provably exceeds `bound`.
///
/// Every path through the matrix crosses each row, so a row whose minimum
/// is already above the bound ends the computation early.
pub fn bounded_levenshtein(
    a: &str,
    b: &str,
    costs: EditCosts,
    table: Option<&AffinityTable>,
    bound: u32,
) -> Option<u32> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<u32> = (0..=b.len() as u32).map(|j| j * costs.insert).collect();
    let mut curr: Vec<u32> = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = (i as u32 + 1) * costs.delete;
        let mut row_min = curr[0];
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = (curr[j] + costs.insert)
                .min(prev[j + 1] + costs.delete)
                .min(prev[j] + substitution_cost(ca, cb, costs, table));
            row_min = row_min.min(curr[j + 1]);
        }
        if row_min > bound {
            return None;
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    Some(prev[b.len()]).filter(|&d| d <= bound)
}
