//! Translationese: syntactic feature extraction from dependency parses
//!
//! Computes per-document frequencies of constructions that distinguish
//! translated from non-translated text, over Universal Dependencies trees
//! for English, German, Russian and Spanish.
//! Core implementation in Rust with Python bindings.

// Core modules (leaves first)
pub mod bytes; // Byte-level helpers for token lines
pub mod conllu; // CoNLL-U sentence segmentation
pub mod graph; // Dependency graph metrics (MHD, MDD)
pub mod lang; // Language codes and boundary exceptions
pub mod lists; // Support word lists
pub mod navigation; // Head, children and child selection
pub mod tree; // Tokens, features and sentence trees

// Feature extraction
pub mod config; // TOML extraction settings
pub mod detect; // Detector registry and detector families
pub mod features; // Feature inventory and values
pub mod pipeline; // Per-document aggregation and normalisation

// Corpus input and output
pub mod export; // TSV writer
pub mod iterators; // Corpus discovery and reading

// Python bindings
#[cfg(feature = "pyo3")]
pub mod python;

// Re-exports for convenience
pub use config::ExtractConfig;
pub use conllu::{ParseError, SegmentPolicy, SentenceReader, segment};
pub use detect::{Detection, Detector, Family, Outcome, Registry};
pub use features::{Feature, FeatureVector, Value};
pub use iterators::{Corpus, CorpusError};
pub use lang::Lang;
pub use lists::{LangLists, ListCategory, SupportLists, WordList};
pub use pipeline::{Document, Extractor};
pub use tree::{Features, SentenceTree, Token};
