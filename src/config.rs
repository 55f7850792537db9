use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::trigram::DEFAULT_MAX_SUGGESTIONS;

const APP_NAME: &str = "trigram-predictor";
const CONFIG_NAME: &str = "config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_suggestions: usize,
    /// Train new models on the built-in sample sentences.
    pub seed_default_corpus: bool,
    pub output_path: PathBuf,
    /// Extra `misspelling correction` list loaded at startup.
    pub corrections_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            seed_default_corpus: true,
            output_path: PathBuf::from("model_data.json"),
            corrections_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, confy::ConfyError> {
        match confy::load(APP_NAME, Some(CONFIG_NAME)) {
            Ok(config) => Ok(config),
            Err(err) => {
                warn!("Failed to load config, using defaults: {err}");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self) -> Result<(), confy::ConfyError> {
        confy::store(APP_NAME, Some(CONFIG_NAME), self)
    }

    /// Read a config from an explicit file instead of the per-user location.
    pub fn load_path(path: &std::path::Path) -> Result<Self, confy::ConfyError> {
        confy::load_path(path)
    }

    pub fn save_path(&self, path: &std::path::Path) -> Result<(), confy::ConfyError> {
        confy::store_path(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_suggestions, 5);
        assert!(config.seed_default_corpus);
        assert_eq!(config.output_path, PathBuf::from("model_data.json"));
        assert_eq!(config.corrections_path, None);
    }

    #[test]
    fn test_save_and_load_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            max_suggestions: 3,
            seed_default_corpus: false,
            output_path: PathBuf::from("out.json"),
            corrections_path: Some(PathBuf::from("extra.txt")),
        };
        config.save_path(&path).unwrap();

        assert_eq!(Config::load_path(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert_eq!(Config::load_path(&path).unwrap(), Config::default());
    }
}
