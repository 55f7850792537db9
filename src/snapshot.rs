//! JSON export and import of a trained predictor.
//!
//! # Format
//!
//! ```text
//! {
//!   "trigrams": { "i am": { "going": 1, "happy": 1 }, ... },
//!   "corrections": { "teh": "the", ... }
//! }
//! ```
//!
//! Keys are written in sorted order so the same model always produces the
//! same bytes.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::corrections::CorrectionTable;
use crate::error::{PredictorError, Result};
use crate::trigram::{Context, TrigramModel};

/// Serializable view of a trigram model and its correction table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    /// `"<first> <second>"` → candidate → count.
    pub trigrams: BTreeMap<String, BTreeMap<String, u64>>,
    /// Misspelling → correction.
    pub corrections: BTreeMap<String, String>,
}

impl ModelSnapshot {
    /// Copy the contents of a model and correction table.
    pub fn capture(model: &TrigramModel, corrections: &CorrectionTable) -> Self {
        let trigrams = model
            .iter()
            .map(|(context, candidates)| {
                let counts = candidates
                    .iter()
                    .map(|(word, count)| (word.to_string(), count))
                    .collect();
                (context.to_string(), counts)
            })
            .collect();

        let corrections = corrections
            .iter()
            .map(|(misspelling, correction)| (misspelling.to_string(), correction.to_string()))
            .collect();

        Self {
            trigrams,
            corrections,
        }
    }

    /// Rebuild a model and correction table.
    ///
    /// Zero counts are dropped so that no context ends up without
    /// candidates.
    ///
    /// Keys and words are lowercased, so entries differing only in case are
    /// summed.
    ///
    /// # Errors
    /// Returns an error if a trigram key is not two space-separated words, or
    /// if summed counts do not fit in a `u64`.
    pub fn restore(&self) -> Result<(TrigramModel, CorrectionTable)> {
        let mut model = TrigramModel::new();

        for (key, candidates) in &self.trigrams {
            let context = Context::parse_key(key)
                .ok_or_else(|| PredictorError::InvalidContextKey(key.clone()))?;

            for (word, &count) in candidates {
                if count == 0 {
                    warn!(context = %key, word = %word, "dropping zero count on import");
                    continue;
                }
                model.insert_count(context.clone(), word, count)?;
            }
        }

        let corrections = CorrectionTable::with_entries(
            self.corrections
                .iter()
                .map(|(misspelling, correction)| (misspelling, correction.clone())),
        );

        Ok((model, corrections))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a snapshot previously written with [`ModelSnapshot::write_file`].
    pub fn read_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| PredictorError::io("reading model file", path, e))?;
        Self::from_json(&json)
    }

    /// Write the snapshot as JSON to `path`.
    ///
    /// The file is written to a temporary file in the same directory and then
    /// renamed into place, so a failed write leaves no partial file behind.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        write_atomic(path, json.as_bytes())?;
        debug!(path = %path.display(), contexts = self.trigrams.len(), "wrote model file");
        Ok(())
    }
}

/// Replace `path` with `contents` via a temporary file and rename.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)
        .map_err(|e| PredictorError::io("creating temporary file", dir, e))?;
    if let Err(e) = file.write_all(contents).and_then(|_| file.flush()) {
        return Err(PredictorError::io("writing temporary file", file.path(), e));
    }

    file.persist(path).map_err(|e| PredictorError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample_model() -> TrigramModel {
        let mut model = TrigramModel::new();
        model.train(["I am going to the store", "I am happy to see you", "i am going home"]);
        model
    }

    #[test]
    fn test_export_shape() {
        let model = sample_model();
        let table = CorrectionTable::new();
        let json = ModelSnapshot::capture(&model, &table).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["trigrams"]["i am"], json!({"going": 2, "happy": 1}));
        assert_eq!(value["trigrams"]["to the"], json!({"store": 1}));
        assert_eq!(value["corrections"]["teh"], json!("the"));
        assert_eq!(value["corrections"].as_object().unwrap().len(), 8);
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_json_round_trip_preserves_counts() {
        let model = sample_model();
        let mut table = CorrectionTable::new();
        table.insert("wich", "which");

        let snapshot = ModelSnapshot::capture(&model, &table);
        let parsed = ModelSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(parsed, snapshot);

        let (restored, corrections) = parsed.restore().unwrap();
        assert_eq!(restored.context_count(), model.context_count());
        assert_eq!(restored.count("i", "am", "going"), 2);
        assert_eq!(restored.predict("i am", 5), model.predict("i am", 5));
        assert_eq!(corrections, table);
    }

    #[test]
    fn test_large_counts_survive() {
        let mut model = TrigramModel::new();
        model
            .insert_count(Context::new("a", "b"), "c", u64::MAX - 1)
            .unwrap();
        let snapshot = ModelSnapshot::capture(&model, &CorrectionTable::empty());

        let parsed = ModelSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        let (restored, _) = parsed.restore().unwrap();
        assert_eq!(restored.count("a", "b", "c"), u64::MAX - 1);
    }

    #[test]
    fn test_restore_rejects_bad_key() {
        let snapshot = ModelSnapshot::from_json(
            r#"{"trigrams": {"just": {"one": 1}}, "corrections": {}}"#,
        )
        .unwrap();
        assert!(matches!(
            snapshot.restore(),
            Err(PredictorError::InvalidContextKey(key)) if key == "just"
        ));
    }

    #[test]
    fn test_restore_merges_case_variants() {
        let snapshot = ModelSnapshot::from_json(
            r#"{"trigrams": {"I Am": {"Going": 2}, "i am": {"going": 1, "happy": 1}}, "corrections": {}}"#,
        )
        .unwrap();
        let (model, _) = snapshot.restore().unwrap();

        assert_eq!(model.context_count(), 1);
        assert_eq!(model.count("i", "am", "going"), 3);
        assert_eq!(model.count("i", "am", "happy"), 1);
    }

    #[test]
    fn test_restore_rejects_overflowing_counts() {
        let snapshot = ModelSnapshot::from_json(
            r#"{"trigrams": {"A B": {"c": 18446744073709551615}, "a b": {"c": 1}}, "corrections": {}}"#,
        )
        .unwrap();

        assert!(matches!(
            snapshot.restore(),
            Err(PredictorError::CountOverflow { context, word }) if context == "a b" && word == "c"
        ));
    }

    #[test]
    fn test_restore_drops_zero_counts() {
        let snapshot = ModelSnapshot::from_json(
            r#"{"trigrams": {"a b": {"c": 0}, "x y": {"z": 3, "w": 0}}, "corrections": {}}"#,
        )
        .unwrap();
        let (model, _) = snapshot.restore().unwrap();

        assert_eq!(model.context_count(), 1);
        assert_eq!(model.count("x", "y", "z"), 3);
        assert_eq!(model.candidates("x", "y").map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            ModelSnapshot::from_json("not json"),
            Err(PredictorError::Json(_))
        ));
    }

    #[test]
    fn test_write_and_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_data.json");
        let snapshot = ModelSnapshot::capture(&sample_model(), &CorrectionTable::new());

        snapshot.write_file(&path).unwrap();
        assert_eq!(ModelSnapshot::read_file(&path).unwrap(), snapshot);

        // Overwrites in place.
        let empty = ModelSnapshot::default();
        empty.write_file(&path).unwrap();
        assert_eq!(ModelSnapshot::read_file(&path).unwrap(), empty);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_into_missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("model_data.json");

        let err = ModelSnapshot::default().write_file(&path).unwrap_err();
        assert!(matches!(err, PredictorError::Io { .. }));
        assert!(!path.exists());
    }
}
