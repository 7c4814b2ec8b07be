//! Error types shared by the alignment, classification and lexicon layers.

use thiserror::Error;

/// Errors raised by `libancien-core`.
///
/// Unclassified divergences are not errors: the classifier reports them as
/// diff units with an empty label list.
#[derive(Debug, Error)]
pub enum Error {
    /// The classifier was handed sequences of different lengths.
    ///
    /// Its input must be the output of the alignment engine, which always
    /// produces equal-length sequences; anything else is a caller bug.
    #[error("aligned sequences differ in length (old: {old}, new: {new})")]
    LengthMismatch { old: usize, new: usize },

    /// Traceback reached a cell that no transition can explain.
    ///
    /// This means the scoring function disagrees with the filled matrix.
    #[error("alignment traceback failed at cell ({row}, {col})")]
    AlignmentInconsistency { row: usize, col: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("fst: {0}")]
    Fst(#[from] fst::Error),
}

/// A specialized `Result` type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
