//! Trigram frequency model for next-word prediction.
//!
//! The model maps a two-word [`Context`] to the words observed directly after
//! it, together with how often each one was seen. Prediction looks up the last
//! two words of the input and returns the most frequent continuations.
//!
//! # Fallbacks
//!
//! Prediction never fails:
//! - Fewer than two words of input returns [`SENTENCE_STARTERS`]
//! - A context never seen during training returns [`COMMON_WORDS`]
//!
//! # Ranking
//!
//! Candidates are ordered by count, highest first. Equal counts are ordered
//! alphabetically so the output is the same on every run.
//!
//! # Usage
//!
//! ```rust
//! use trigram_predictor::TrigramModel;
//!
//! let mut model = TrigramModel::new();
//! model.train(["I am going to the store", "I am happy to see you"]);
//! let next = model.predict("I am", 5);
//! assert_eq!(next, vec!["going", "happy"]);
//! ```

use std::fmt;

use ahash::AHashMap;
use tracing::debug;

use crate::error::{PredictorError, Result};

/// Number of suggestions returned when the caller does not ask for a count.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Returned when the input has fewer than two words.
pub const SENTENCE_STARTERS: [&str; 5] = ["the", "i", "we", "this", "that"];

/// Returned when the last two words were never seen during training.
pub const COMMON_WORDS: [&str; 5] = ["the", "to", "a", "and", "is"];

/// Sample sentences a seeded model is trained on.
pub const DEFAULT_CORPUS: [&str; 8] = [
    "I am going to the store",
    "I am happy to see you",
    "Would you like to join us",
    "Thank you for your help",
    "I need to finish this work",
    "I want to learn more",
    "Going to be a great day",
    "Need to get some rest",
];

/// Split text on whitespace and lowercase every token.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(|s| s.to_lowercase()).collect()
}

/// The two most recent words, used as the lookup key for a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Context {
    first: String,
    second: String,
}

impl Context {
    /// Build a context from two words. Both are lowercased.
    pub fn new(first: &str, second: &str) -> Self {
        Self {
            first: first.to_lowercase(),
            second: second.to_lowercase(),
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    /// Parse the `"<first> <second>"` form produced by `Display`.
    ///
    /// Returns `None` unless the key holds exactly two words separated by a
    /// single space.
    pub fn parse_key(key: &str) -> Option<Self> {
        let (first, second) = key.split_once(' ')?;
        let is_word = |w: &str| !w.is_empty() && !w.contains(char::is_whitespace);
        if !is_word(first) || !is_word(second) {
            return None;
        }
        Some(Self::new(first, second))
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first, self.second)
    }
}

/// Occurrence counts of the words seen after one context.
///
/// Every stored count is at least 1. A word that was never recorded is absent
/// rather than present with zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateCounts {
    counts: AHashMap<String, u64>,
}

impl CandidateCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more occurrence of `word`, inserting it at 1 if unseen.
    ///
    /// Returns the updated count. A count already at `u64::MAX` stays there.
    pub fn record(&mut self, word: &str) -> u64 {
        match self.counts.get_mut(word) {
            Some(count) => {
                *count = count.saturating_add(1);
                *count
            }
            None => {
                self.counts.insert(word.to_string(), 1);
                1
            }
        }
    }

    /// Add `occurrences` to the count of `word`. Adding zero is a no-op and
    /// never creates an entry.
    ///
    /// Returns `None`, leaving the count unchanged, if the sum does not fit
    /// in a `u64`.
    pub fn add(&mut self, word: &str, occurrences: u64) -> Option<u64> {
        if occurrences == 0 {
            return Some(self.get(word));
        }
        match self.counts.get_mut(word) {
            Some(count) => {
                *count = count.checked_add(occurrences)?;
                Some(*count)
            }
            None => {
                self.counts.insert(word.to_string(), occurrences);
                Some(occurrences)
            }
        }
    }

    /// Count recorded for `word`, or 0 if it was never seen.
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }

    /// All candidates, highest count first, ties in alphabetical order.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// A trigram model: two-word contexts mapped to their observed continuations.
///
/// The table only grows. There is no removal or decay.
#[derive(Debug, Clone, Default)]
pub struct TrigramModel {
    contexts: AHashMap<Context, CandidateCounts>,
}

impl TrigramModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model trained on `corpus`.
    pub fn with_corpus<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut model = Self::new();
        model.train(corpus);
        model
    }

    /// Create a model trained on [`DEFAULT_CORPUS`].
    pub fn seeded() -> Self {
        Self::with_corpus(DEFAULT_CORPUS)
    }

    /// Train the model on a corpus of sentences.
    ///
    /// Each sentence is split on whitespace and lowercased. Sentences with
    /// fewer than three words are skipped. Every run of three consecutive
    /// words adds one occurrence of the third word under the context formed
    /// by the first two.
    pub fn train<I, S>(&mut self, sentences: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut used = 0usize;
        let mut skipped = 0usize;
        let mut trigrams = 0usize;

        for sentence in sentences {
            let words = tokenize(sentence.as_ref());
            if words.len() < 3 {
                skipped += 1;
                continue;
            }

            for window in words.windows(3) {
                let context = Context {
                    first: window[0].clone(),
                    second: window[1].clone(),
                };
                self.record(context, &window[2]);
                trigrams += 1;
            }
            used += 1;
        }

        debug!(
            used,
            skipped,
            trigrams,
            contexts = self.contexts.len(),
            "trained trigram model"
        );
    }

    /// Add one occurrence of `next` after `context`.
    pub fn record(&mut self, context: Context, next: &str) -> u64 {
        let next = next.to_lowercase();
        match self.contexts.get_mut(&context) {
            Some(candidates) => candidates.record(&next),
            None => {
                let mut candidates = CandidateCounts::new();
                let count = candidates.record(&next);
                self.contexts.insert(context, candidates);
                count
            }
        }
    }

    /// Add `occurrences` of `next` after `context`.
    ///
    /// A zero count leaves the model untouched, so no empty context entry is
    /// ever created.
    ///
    /// # Errors
    /// Returns [`PredictorError::CountOverflow`] if the summed count does not
    /// fit in a `u64`. The model is left unchanged.
    pub fn insert_count(&mut self, context: Context, next: &str, occurrences: u64) -> Result<u64> {
        if occurrences == 0 {
            return Ok(self.count(context.first(), context.second(), next));
        }
        let next = next.to_lowercase();
        let added = match self.contexts.get_mut(&context) {
            Some(candidates) => candidates.add(&next, occurrences),
            None => {
                let mut candidates = CandidateCounts::new();
                let count = candidates.add(&next, occurrences);
                self.contexts.insert(context.clone(), candidates);
                count
            }
        };
        added.ok_or_else(|| PredictorError::CountOverflow {
            context: context.to_string(),
            word: next,
        })
    }

    /// Predict up to `max_suggestions` words likely to follow `context`.
    ///
    /// Only the last two words of `context` are used. See the module docs for
    /// the fallback lists returned when there is not enough data.
    pub fn predict(&self, context: &str, max_suggestions: usize) -> Vec<String> {
        let words = tokenize(context.trim());

        if words.len() < 2 {
            return SENTENCE_STARTERS.iter().map(|w| w.to_string()).collect();
        }

        let key = Context {
            first: words[words.len() - 2].clone(),
            second: words[words.len() - 1].clone(),
        };

        match self.contexts.get(&key) {
            Some(candidates) if !candidates.is_empty() => candidates
                .ranked()
                .into_iter()
                .take(max_suggestions)
                .map(|(word, _)| word.to_string())
                .collect(),
            _ => COMMON_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Candidates recorded after the context `(first, second)`.
    pub fn candidates(&self, first: &str, second: &str) -> Option<&CandidateCounts> {
        self.contexts.get(&Context::new(first, second))
    }

    /// Times `next` was seen after `(first, second)`, or 0.
    pub fn count(&self, first: &str, second: &str, next: &str) -> u64 {
        self.candidates(first, second)
            .map(|c| c.get(&next.to_lowercase()))
            .unwrap_or(0)
    }

    /// Number of distinct contexts recorded.
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Context, &CandidateCounts)> {
        self.contexts.iter()
    }
}
