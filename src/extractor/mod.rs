//! Main content extraction.
//!
//! # Module Structure
//!
//! - `tags`: Tag sets and per-tag scores
//! - `leaf_blocks`: Retags childless `<div>`s to `<p>` before scoring
//! - `scoring`: Element classification and candidate scoring
//! - `siblings`: Winner selection and sibling annexation
//! - `cleaner`: Cleanup of the winning subtree
//! - `assembler`: Output document construction
//! - `pipeline`: Stage orchestration and fallbacks
//!
//! # Usage
//!
//! ```rust,ignore
//! use readable_article::extractor::{find_candidates, select_winner, annex_siblings, clean_document};
//!
//! let (candidates, flagged) = find_candidates(&dom, &options, &NoopDiagnostics);
//! let winner = select_winner(&candidates)?;
//! let node = annex_siblings(&winner, &candidates, &options, &NoopDiagnostics);
//! let cleaned = clean_document(&node, &options, &NoopDiagnostics);
//! ```

pub mod assembler;
pub mod cleaner;
pub mod leaf_blocks;
pub mod pipeline;
pub mod scoring;
pub mod siblings;
pub mod tags;

pub use assembler::{build_base_document, build_error_document};
pub use cleaner::{clean_conditionally, clean_document, ok_embedded_video, remove_orphans};
pub use leaf_blocks::normalize_leaf_blocks;
pub use pipeline::{extract_document, Extraction};
pub use scoring::{
    class_weight, classify, find_candidates, is_bad_link, is_unlikely_node, paragraph_score,
    score_candidates, Candidate, CandidateMap, CandidateScores, Classification, RankedCandidate,
};
pub use siblings::{annex_siblings, select_winner};
