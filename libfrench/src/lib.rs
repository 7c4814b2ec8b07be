//! libfrench crate root
//!
//! This crate provides the French orthography: the ordered rule catalog that
//! labels differences between old and modern spellings, the candidate
//! rewrites used to guess modern forms, sentence handling and a high-level
//! `Engine` that composes them with the shared `libancien-core` machinery.
//!
//! Public API exported here:
//! - `FRENCH_CATALOG` and `CATALOG_VERSION` from `catalog`
//! - `generate_candidates` from `candidates`
//! - `Engine` and `French` from `engine`
//! - `FrenchConfig` from `config`

pub mod candidates;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod text;

// Re-export the core types callers need alongside the French ones.
pub use libancien_core::{
    Alignment, Classification, Config, DiffUnit, Error, Lexicon, Result, RuleCatalog, GAP,
};

// Convenience re-exports for common types used by callers.
pub use candidates::{baseline, generate_candidates};
pub use catalog::{CATALOG_VERSION, FRENCH_CATALOG, FRENCH_RULES};
pub use config::{french_affinity_rules, FrenchConfig};
pub use engine::{Engine, French};
pub use text::{postprocess, preprocess};
