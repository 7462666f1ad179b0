//! Runtime settings
//!
//! Layered in order: built-in defaults, an optional TOML file, then
//! environment variables prefixed with `WORDSIM_` (nested keys use `__`).
//!
//! ```toml
//! bind = "127.0.0.1:8080"
//! default_dataset = "wiki"
//!
//! [[datasets]]
//! name = "wiki"
//! path = "data/word_vectors_wiki.bin"
//! ```

use crate::catalog::DatasetInfo;
use crate::engine::TOP_K;
use crate::suggest::MAX_SUGGESTIONS;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "wordsim.toml";

/// Environment variable naming an explicit settings file.
pub const CONFIG_PATH_ENV: &str = "WORDSIM_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Address the HTTP server binds to
    pub bind: String,
    /// Dataset selected when the REPL starts and when a request names none
    pub default_dataset: String,
    pub top_k: usize,
    pub max_suggestions: usize,
    pub datasets: Vec<DatasetInfo>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            bind: "0.0.0.0:7878".to_string(),
            default_dataset: "twitter".to_string(),
            top_k: TOP_K,
            max_suggestions: MAX_SUGGESTIONS,
            datasets: vec![
                DatasetInfo {
                    name: "twitter".to_string(),
                    path: PathBuf::from("data/word_vectors.json"),
                    description: "The most common 1,000 words from the GloVe Twitter \
                                  25-dimensional word embeddings model."
                        .to_string(),
                    model_label: "GloVe Twitter 25".to_string(),
                    model_link: "https://huggingface.co/jkrukowski/glove-twitter-25".to_string(),
                },
                DatasetInfo {
                    name: "wiki".to_string(),
                    path: PathBuf::from("data/word_vectors_wiki.json"),
                    description: "5,000 high-frequency words from the GloVe Wiki-Gigaword \
                                  50-dimensional word embeddings model."
                        .to_string(),
                    model_label: "GloVe Wiki-Gigaword 50".to_string(),
                    model_link: "https://nlp.stanford.edu/projects/glove/".to_string(),
                },
            ],
        }
    }
}

impl Settings {
    /// Loads settings from `$WORDSIM_CONFIG`, else `wordsim.toml` if present.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::from_sources(Some(Path::new(&path)), true),
            None => Self::from_sources(Some(Path::new(DEFAULT_CONFIG_FILE)), false),
        }
    }

    /// Builds settings from defaults, an optional file and the environment.
    pub fn from_sources(file: Option<&Path>, required: bool) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(path) = file {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("WORDSIM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn dataset(&self, name: &str) -> Option<&DatasetInfo> {
        self.datasets.iter().find(|d| d.name == name)
    }
}
