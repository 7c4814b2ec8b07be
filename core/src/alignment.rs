//! Global sequence alignment (Needleman-Wunsch) between an old spelling and
//! its modern counterpart.
//!
//! The matrix is filled with the [`Scorer`] and traced back from the
//! bottom-right cell with a fixed move preference: diagonal, then left
//! (gap in the old sequence), then top (gap in the new sequence). The
//! preference decides which of several optimal alignments is returned.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::scorer::Scorer;
use crate::GAP;

/// Two equal-length unit sequences padded with [`GAP`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alignment {
    pub old: Vec<String>,
    pub new: Vec<String>,
    /// Value of the final matrix cell
    pub score: i32,
}

impl Alignment {
    pub fn len(&self) -> usize {
        self.old.len()
    }

    pub fn is_empty(&self) -> bool {
        self.old.is_empty()
    }

    /// Iterate aligned `(old, new)` unit pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.old
            .iter()
            .zip(self.new.iter())
            .map(|(a, b)| (a.as_str(), b.as_str()))
    }

    /// Concatenated old side, gap markers included.
    pub fn old_string(&self) -> String {
        self.old.concat()
    }

    /// Concatenated new side, gap markers included.
    pub fn new_string(&self) -> String {
        self.new.concat()
    }

    /// Sum of per-position scores under `scorer`.
    ///
    /// For an alignment produced with the same scorer this equals `score`.
    pub fn total_score(&self, scorer: &Scorer<'_>) -> i32 {
        self.pairs()
            .map(|(a, b)| {
                if a == GAP || b == GAP {
                    scorer.gap_penalty()
                } else {
                    scorer.score(a, b)
                }
            })
            .sum()
    }
}

/// Align two unit sequences globally.
///
/// Fails with [`Error::AlignmentInconsistency`] if traceback reaches a cell no
/// transition explains, which only happens when scoring is inconsistent.
pub fn align<S: AsRef<str>>(a: &[S], b: &[S], scorer: &Scorer<'_>) -> Result<Alignment> {
    let rows = a.len() + 1;
    let cols = b.len() + 1;
    let gap = scorer.gap_penalty();

    let mut matrix = vec![vec![0i32; cols]; rows];
    for (x, row) in matrix.iter_mut().enumerate() {
        row[0] = x as i32 * gap;
    }
    for (y, cell) in matrix[0].iter_mut().enumerate() {
        *cell = y as i32 * gap;
    }

    for x in 1..rows {
        for y in 1..cols {
            let diagonal = matrix[x - 1][y - 1] + scorer.score(a[x - 1].as_ref(), b[y - 1].as_ref());
            let left = matrix[x][y - 1] + gap;
            let top = matrix[x - 1][y] + gap;
            matrix[x][y] = diagonal.max(left).max(top);
        }
    }

    let mut old: Vec<String> = Vec::with_capacity(rows + cols);
    let mut new: Vec<String> = Vec::with_capacity(rows + cols);
    let (mut x, mut y) = (a.len(), b.len());

    while x > 0 || y > 0 {
        let current = matrix[x][y];
        if x > 0
            && y > 0
            && current
                == matrix[x - 1][y - 1] + scorer.score(a[x - 1].as_ref(), b[y - 1].as_ref())
        {
            old.push(a[x - 1].as_ref().to_string());
            new.push(b[y - 1].as_ref().to_string());
            x -= 1;
            y -= 1;
        } else if y > 0 && current == matrix[x][y - 1] + gap {
            old.push(GAP.to_string());
            new.push(b[y - 1].as_ref().to_string());
            y -= 1;
        } else if x > 0 && current == matrix[x - 1][y] + gap {
            old.push(a[x - 1].as_ref().to_string());
            new.push(GAP.to_string());
            x -= 1;
        } else {
            return Err(Error::AlignmentInconsistency { row: x, col: y });
        }
    }

    old.reverse();
    new.reverse();

    let score = matrix[rows - 1][cols - 1];
    tracing::debug!(rows, cols, score, length = old.len(), "aligned sequences");

    Ok(Alignment { old, new, score })
}

/// Align two strings character by character.
pub fn align_chars(old: &str, new: &str, scorer: &Scorer<'_>) -> Result<Alignment> {
    let a: Vec<String> = old.chars().map(String::from).collect();
    let b: Vec<String> = new.chars().map(String::from).collect();
    align(&a, &b, scorer)
}

/// Align two strings word by word (whitespace-separated tokens).
pub fn align_words(old: &str, new: &str, scorer: &Scorer<'_>) -> Result<Alignment> {
    let a: Vec<&str> = old.split_whitespace().collect();
    let b: Vec<&str> = new.split_whitespace().collect();
    align(&a, &b, scorer)
}
