//! Next-word prediction and autocorrection behind a single type.
//!
//! [`Predictor`] owns a [`TrigramModel`] and a [`CorrectionTable`] and adds
//! the keyboard-style [`Predictor::suggest`] on top of them. The two parts
//! never call each other.
//!
//! [`SharedPredictor`] wraps a predictor in a read/write lock for use from
//! several threads: training takes the write lock, every query takes the read
//! lock.

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::corrections::CorrectionTable;
use crate::error::{PredictorError, Result};
use crate::snapshot::ModelSnapshot;
use crate::trigram::{TrigramModel, DEFAULT_CORPUS};

/// A trigram model paired with a correction table.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: TrigramModel,
    corrections: CorrectionTable,
}

impl Default for Predictor {
    /// Trained on [`DEFAULT_CORPUS`] with the default corrections.
    fn default() -> Self {
        Self::new(DEFAULT_CORPUS)
    }
}

impl Predictor {
    /// Create a predictor trained on `default_corpus`.
    ///
    /// Pass an empty slice for an untrained model.
    pub fn new<I, S>(default_corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_parts(TrigramModel::with_corpus(default_corpus), CorrectionTable::new())
    }

    /// Create a predictor with no training data and the default corrections.
    pub fn empty() -> Self {
        Self::from_parts(TrigramModel::new(), CorrectionTable::new())
    }

    pub fn from_parts(model: TrigramModel, corrections: CorrectionTable) -> Self {
        Self { model, corrections }
    }

    pub fn model(&self) -> &TrigramModel {
        &self.model
    }

    pub fn corrections(&self) -> &CorrectionTable {
        &self.corrections
    }

    pub fn corrections_mut(&mut self) -> &mut CorrectionTable {
        &mut self.corrections
    }

    pub fn train<I, S>(&mut self, sentences: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.model.train(sentences);
    }

    /// Train on a text file holding one sentence per line.
    ///
    /// Returns the number of non-blank lines read.
    pub fn train_file(&mut self, path: &Path) -> Result<usize> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| PredictorError::io("reading training corpus", path, e))?;
        let sentences: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        self.model.train(sentences.iter());
        info!(
            path = %path.display(),
            sentences = sentences.len(),
            contexts = self.model.context_count(),
            "trained on corpus file"
        );
        Ok(sentences.len())
    }

    pub fn predict(&self, context: &str, max_suggestions: usize) -> Vec<String> {
        self.model.predict(context, max_suggestions)
    }

    pub fn autocorrect(&self, word: &str) -> Option<String> {
        self.corrections.lookup(word)
    }

    /// The correction for `word`, or `word` unchanged when there is none.
    pub fn correct_or_keep(&self, word: &str) -> String {
        self.autocorrect(word).unwrap_or_else(|| word.to_string())
    }

    /// Suggestions for text being typed.
    ///
    /// - Input ending in whitespace: next-word predictions for the text so far
    /// - Otherwise: the correction for the word being typed, if it differs
    ///   from what was typed
    /// - Otherwise nothing
    pub fn suggest(&self, input: &str, max_suggestions: usize) -> Vec<String> {
        if input.ends_with(char::is_whitespace) {
            return self.predict(input, max_suggestions);
        }

        let Some(last_word) = input.split_whitespace().last() else {
            return Vec::new();
        };

        match self.autocorrect(last_word) {
            Some(correction) if correction != last_word => {
                debug!(word = last_word, %correction, "suggesting correction");
                vec![correction]
            }
            _ => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot::capture(&self.model, &self.corrections)
    }

    /// Export as the `{"trigrams": ..., "corrections": ...}` JSON object.
    pub fn to_json(&self) -> Result<String> {
        self.snapshot().to_json()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let (model, corrections) = ModelSnapshot::from_json(json)?.restore()?;
        Ok(Self::from_parts(model, corrections))
    }

    /// Write the JSON export to `path`, replacing it atomically.
    pub fn export_file(&self, path: &Path) -> Result<()> {
        self.snapshot().write_file(path)?;
        info!(path = %path.display(), "exported model");
        Ok(())
    }

    pub fn import_file(path: &Path) -> Result<Self> {
        let (model, corrections) = ModelSnapshot::read_file(path)?.restore()?;
        info!(
            path = %path.display(),
            contexts = model.context_count(),
            corrections = corrections.len(),
            "imported model"
        );
        Ok(Self::from_parts(model, corrections))
    }
}

/// A [`Predictor`] shared between threads.
///
/// Clones share the same underlying predictor.
#[derive(Debug, Clone, Default)]
pub struct SharedPredictor {
    inner: Arc<RwLock<Predictor>>,
}

impl SharedPredictor {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            inner: Arc::new(RwLock::new(predictor)),
        }
    }

    pub fn train<I, S>(&self, sentences: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.inner.write().train(sentences);
    }

    pub fn insert_correction(&self, misspelling: &str, correction: &str) -> Option<String> {
        self.inner.write().corrections_mut().insert(misspelling, correction)
    }

    pub fn predict(&self, context: &str, max_suggestions: usize) -> Vec<String> {
        self.inner.read().predict(context, max_suggestions)
    }

    pub fn autocorrect(&self, word: &str) -> Option<String> {
        self.inner.read().autocorrect(word)
    }

    pub fn suggest(&self, input: &str, max_suggestions: usize) -> Vec<String> {
        self.inner.read().suggest(input, max_suggestions)
    }

    pub fn to_json(&self) -> Result<String> {
        self.inner.read().to_json()
    }

    pub fn export_file(&self, path: &Path) -> Result<()> {
        // Snapshot under the read lock, write without holding it.
        let snapshot = self.inner.read().snapshot();
        snapshot.write_file(path)
    }
}

impl From<Predictor> for SharedPredictor {
    fn from(predictor: Predictor) -> Self {
        Self::new(predictor)
    }
}
