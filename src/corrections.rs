//! Table-driven spelling correction.
//!
//! A [`CorrectionTable`] maps known misspellings to their corrected form.
//! Lookups are case-insensitive and a word missing from the table is not an
//! error, it simply has no correction.
//!
//! # Correction List Format
//!
//! Extra entries can be loaded from a text file:
//! ```text
//! # Comments start with #
//! misspelling correction
//! teh the
//! wich which
//! ```
//!
//! Every non-comment line needs both columns. Anything after the second
//! column is ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use tracing::{debug, info};

use crate::error::{PredictorError, Result};

/// Misspellings every new table starts with.
pub const DEFAULT_CORRECTIONS: [(&str, &str); 8] = [
    ("teh", "the"),
    ("recieve", "receive"),
    ("wierd", "weird"),
    ("theyre", "they're"),
    ("im", "i'm"),
    ("dont", "don't"),
    ("cant", "can't"),
    ("wont", "won't"),
];

/// Lookup table from misspelled words to corrections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrectionTable {
    /// Lowercase misspelling → corrected form.
    entries: AHashMap<String, String>,
}

impl Default for CorrectionTable {
    fn default() -> Self {
        Self::with_entries(DEFAULT_CORRECTIONS)
    }
}

impl CorrectionTable {
    /// Create a table holding [`DEFAULT_CORRECTIONS`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table with no entries.
    pub fn empty() -> Self {
        Self {
            entries: AHashMap::new(),
        }
    }

    /// Create a table from `(misspelling, correction)` pairs.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::empty();
        for (misspelling, correction) in entries {
            table.insert(misspelling.as_ref(), correction);
        }
        table
    }

    /// Look up the correction for `word`, ignoring case.
    ///
    /// # Example
    /// ```rust
    /// use trigram_predictor::CorrectionTable;
    ///
    /// let table = CorrectionTable::new();
    /// assert_eq!(table.lookup("TEH").as_deref(), Some("the"));
    /// assert_eq!(table.lookup("hello"), None);
    /// ```
    pub fn lookup(&self, word: &str) -> Option<String> {
        self.entries.get(&word.to_lowercase()).cloned()
    }

    /// Add or replace an entry. The misspelling is stored lowercased.
    ///
    /// Returns the correction previously stored for this misspelling.
    pub fn insert(&mut self, misspelling: &str, correction: impl Into<String>) -> Option<String> {
        self.entries
            .insert(misspelling.to_lowercase(), correction.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(misspelling, correction)| (misspelling.as_str(), correction.as_str()))
    }

    /// Add entries from a correction list file.
    ///
    /// Returns how many lines were loaded.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or a line has only one
    /// column.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let file = File::open(path)
            .map_err(|e| PredictorError::io("opening correction list", path, e))?;
        let loaded = self.load_reader(BufReader::new(file), path)?;
        info!(path = %path.display(), loaded, "loaded correction list");
        Ok(loaded)
    }

    fn load_reader<R: BufRead>(&mut self, reader: R, path: &Path) -> Result<usize> {
        let mut loaded = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| PredictorError::io("reading correction list", path, e))?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(misspelling), Some(correction)) => {
                    if let Some(previous) = self.insert(misspelling, correction) {
                        debug!(misspelling, previous = %previous, correction, "replaced correction");
                    }
                    loaded += 1;
                }
                _ => {
                    return Err(PredictorError::MalformedCorrection {
                        line: index + 1,
                        content: line.to_string(),
                    });
                }
            }
        }

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_seeded_entries() {
        let table = CorrectionTable::new();
        assert_eq!(table.len(), 8);
        for (misspelling, correction) in DEFAULT_CORRECTIONS {
            assert_eq!(table.lookup(misspelling), Some(correction.to_string()));
        }
    }

    #[test]
    fn test_lookup_ignores_case() {
        let table = CorrectionTable::new();
        assert_eq!(table.lookup("TEH"), Some("the".to_string()));
        assert_eq!(table.lookup("Recieve"), Some("receive".to_string()));
        assert_eq!(table.lookup("Im"), Some("i'm".to_string()));
    }

    #[test]
    fn test_unknown_word_is_absent() {
        let table = CorrectionTable::new();
        assert_eq!(table.lookup("hello"), None);
        assert_eq!(table.lookup(""), None);
        assert_eq!(table.lookup("the"), None);
    }

    #[test]
    fn test_insert_lowercases_key() {
        let mut table = CorrectionTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.insert("WICH", "which"), None);
        assert_eq!(table.lookup("wich"), Some("which".to_string()));
        assert_eq!(table.insert("wich", "witch"), Some("which".to_string()));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# extra corrections").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "wich which").unwrap();
        writeln!(file, "  Becuase   because  trailing").unwrap();
        file.flush().unwrap();

        let mut table = CorrectionTable::new();
        let loaded = table.load_file(file.path()).unwrap();

        assert_eq!(loaded, 2);
        assert_eq!(table.len(), 10);
        assert_eq!(table.lookup("becuase"), Some("because".to_string()));
        assert_eq!(table.lookup("teh"), Some("the".to_string()));
    }

    #[test]
    fn test_load_file_rejects_single_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "wich which").unwrap();
        writeln!(file, "lonely").unwrap();
        file.flush().unwrap();

        let mut table = CorrectionTable::empty();
        let err = table.load_file(file.path()).unwrap_err();
        assert!(matches!(
            err,
            PredictorError::MalformedCorrection { line: 2, .. }
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = CorrectionTable::new();
        let err = table.load_file(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, PredictorError::Io { .. }));
    }
}
