//! Named datasets and the active selection.

use crate::engine::{ExplainOutcome, SearchOutcome, SimilarityEngine, TOP_K};
use crate::error::CatalogError;
use crate::loader::load_dataset_file;
use crate::store::VectorStore;
use crate::suggest::{suggest, MAX_SUGGESTIONS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Where a named dataset lives and how to describe it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub model_label: String,
    #[serde(default)]
    pub model_link: String,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    datasets: Vec<DatasetInfo>,
}

impl Catalog {
    pub fn new(datasets: Vec<DatasetInfo>) -> Self {
        Catalog { datasets }
    }

    pub fn get(&self, name: &str) -> Option<&DatasetInfo> {
        self.datasets.iter().find(|d| d.name == name)
    }

    pub fn datasets(&self) -> &[DatasetInfo] {
        &self.datasets
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.datasets.iter().map(|d| d.name.as_str())
    }

    /// Reads and validates the named dataset from disk.
    pub fn load(&self, name: &str) -> Result<Arc<VectorStore>, CatalogError> {
        let info = self
            .get(name)
            .ok_or_else(|| CatalogError::UnknownDataset(name.to_string()))?;

        let store = load_dataset_file(&info.name, &info.path).map_err(|source| CatalogError::Load {
            name: info.name.clone(),
            source,
        })?;

        Ok(Arc::new(store))
    }
}

/// The dataset currently selected by a user.
///
/// Selecting another dataset replaces the table wholesale; nothing computed
/// against the previous table is carried over.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    name: String,
    store: Arc<VectorStore>,
    top_k: usize,
    max_suggestions: usize,
}

impl Session {
    pub fn open(catalog: Catalog, name: &str) -> Result<Self, CatalogError> {
        let store = catalog.load(name)?;
        Ok(Session {
            catalog,
            name: name.to_string(),
            store,
            top_k: TOP_K,
            max_suggestions: MAX_SUGGESTIONS,
        })
    }

    /// Starts a session on an already loaded table.
    pub fn from_store(catalog: Catalog, store: Arc<VectorStore>) -> Self {
        Session {
            catalog,
            name: store.name().to_string(),
            store,
            top_k: TOP_K,
            max_suggestions: MAX_SUGGESTIONS,
        }
    }

    pub fn with_limits(mut self, top_k: usize, max_suggestions: usize) -> Self {
        self.top_k = top_k;
        self.max_suggestions = max_suggestions;
        self
    }

    /// Switches to `name`. On failure the current dataset stays selected.
    pub fn select(&mut self, name: &str) -> Result<(), CatalogError> {
        let store = self.catalog.load(name)?;
        info!(from = %self.name, to = name, "dataset switched");
        self.name = name.to_string();
        self.store = store;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn info(&self) -> Option<&DatasetInfo> {
        self.catalog.get(&self.name)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    pub fn engine(&self) -> SimilarityEngine<'_> {
        SimilarityEngine::new(&self.store).with_top_k(self.top_k)
    }

    pub fn search(&self, word: &str) -> SearchOutcome {
        self.engine().search(word)
    }

    pub fn explain(&self, word: &str, candidate: &str) -> ExplainOutcome {
        self.engine().explain(word, candidate)
    }

    pub fn suggest(&self, input: &str) -> Vec<&str> {
        suggest(input, self.store.words(), self.max_suggestions)
    }
}

#[cfg(test)]
mod catalog_test {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, file: &str, json: &str) -> DatasetInfo {
        let path = dir.path().join(file);
        std::fs::write(&path, json).unwrap();
        DatasetInfo {
            name: file.trim_end_matches(".json").to_string(),
            path,
            description: String::new(),
            model_label: String::new(),
            model_link: String::new(),
        }
    }

    fn catalog(dir: &TempDir) -> Catalog {
        Catalog::new(vec![
            write(dir, "small.json", r#"{"words":["cat","dog","fish"],"vectors":[[1,0],[0.9,0.1],[0,1]]}"#),
            write(
                dir,
                "other.json",
                r#"{"words":["cat","lion","tiger","mouse"],"vectors":[[1,0,0],[0,1,0],[0.1,0.9,0],[0,0,1]]}"#,
            ),
        ])
    }

    #[test]
    fn test_catalog_load_and_unknown() {
        let dir = TempDir::new().unwrap();
        let catalog = catalog(&dir);

        let store = catalog.load("small").unwrap();
        assert_eq!(store.size(), 3);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["small", "other"]);

        assert!(matches!(catalog.load("reddit"), Err(CatalogError::UnknownDataset(_))));
    }

    #[test]
    fn test_catalog_load_error_names_dataset() {
        let dir = TempDir::new().unwrap();
        let broken = write(&dir, "broken.json", r#"{"words":["a"],"vectors":[]}"#);
        let catalog = Catalog::new(vec![broken]);

        let err = catalog.load("broken").unwrap_err();
        assert!(err.to_string().starts_with("failed to load dataset 'broken'"));
    }

    #[test]
    fn test_switching_datasets_uses_only_new_table() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::open(catalog(&dir), "small").unwrap();

        let before = match session.search("cat") {
            SearchOutcome::Found(results) => results,
            other => panic!("expected Found, got {:?}", other),
        };
        assert_eq!(before[0].word, "dog");

        session.select("other").unwrap();
        assert_eq!(session.name(), "other");
        assert_eq!(session.store().dimensionality(), 3);

        let after = match session.search("cat") {
            SearchOutcome::Found(results) => results,
            other => panic!("expected Found, got {:?}", other),
        };
        let words: Vec<&str> = after.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words.len(), 3);
        assert!(words.iter().all(|w| ["lion", "tiger", "mouse"].contains(w)));
        assert_eq!(session.search("dog"), SearchOutcome::NotFound("dog".to_string()));
    }

    #[test]
    fn test_failed_select_keeps_current() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::open(catalog(&dir), "small").unwrap();

        assert!(session.select("reddit").is_err());
        assert_eq!(session.name(), "small");
        assert_eq!(session.store().size(), 3);
    }

    #[test]
    fn test_session_limits() {
        let dir = TempDir::new().unwrap();
        let session = Session::open(catalog(&dir), "other").unwrap().with_limits(1, 1);

        match session.search("tiger") {
            SearchOutcome::Found(results) => {
                assert_eq!(results.len(), 1);
                assert_eq!(results[0].word, "lion");
            }
            other => panic!("expected Found, got {:?}", other),
        }
        assert_eq!(session.suggest("t"), vec!["tiger"]);
    }
}
