//! Trigram Predictor - next-word prediction and table-driven autocorrection.
//!
//! # Overview
//!
//! - [`TrigramModel`] learns which words follow each pair of words and ranks
//!   them by frequency
//! - [`CorrectionTable`] maps common misspellings to their corrected form
//! - [`Predictor`] owns one of each and exports them as JSON
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Predictor     │ ← suggest / export / import (predictor.rs)
//! └───┬─────────┬───┘
//!     │         │
//!     ▼         ▼
//! ┌────────┐ ┌─────────────────┐
//! │Trigram │ │ CorrectionTable │ (trigram.rs, corrections.rs)
//! │ Model  │ └─────────────────┘
//! └────────┘
//!     │
//!     ▼
//! ┌─────────────────┐
//! │  ModelSnapshot  │ ← JSON shape, atomic file writes (snapshot.rs)
//! └─────────────────┘
//! ```
//!
//! # Modules
//!
//! - `trigram.rs`: Context, candidate counts, training and ranked prediction
//! - `corrections.rs`: Misspelling lookup table and correction list loading
//! - `predictor.rs`: Composition, keyboard-style suggestions, shared access
//! - `snapshot.rs`: JSON export and import
//! - `config.rs`: Persisted settings for the command-line driver
//! - `error.rs`: Errors at the file and serialization boundary

pub mod config;
pub mod corrections;
pub mod error;
pub mod predictor;
pub mod snapshot;
pub mod trigram;

pub use corrections::{CorrectionTable, DEFAULT_CORRECTIONS};
pub use error::{PredictorError, Result};
pub use predictor::{Predictor, SharedPredictor};
pub use snapshot::ModelSnapshot;
pub use trigram::{
    CandidateCounts, Context, TrigramModel, COMMON_WORDS, DEFAULT_CORPUS,
    DEFAULT_MAX_SUGGESTIONS, SENTENCE_STARTERS,
};
