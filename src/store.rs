//! The vector store module
//! Provide an immutable word -> vector table for one dataset

use crate::error::DatasetError;
use serde::{Deserialize, Serialize};

/// A dataset definition as supplied by a loader.
///
/// This is also the on-disk shape of a dataset file:
/// `{"words": [...], "vectors": [[...], ...]}`. `name` and `dimension` are
/// optional in files; the dimension is inferred from the first vector when
/// not declared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dimension: Option<usize>,
    pub words: Vec<String>,
    pub vectors: Vec<Vec<f64>>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, words: Vec<String>, vectors: Vec<Vec<f64>>) -> Self {
        Dataset { name: name.into(), dimension: None, words, vectors }
    }

    /// Declares the dimensionality every vector must match.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = Some(dimension);
        self
    }
}

/// One row of the table, borrowed from the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<'a> {
    pub index: usize,
    pub word: &'a str,
    pub vector: &'a [f64],
}

/// Read-only table of word vectors.
///
/// Vectors are stored contiguously as `[w0_d0, w0_d1, ..., w1_d0, ...]`.
/// The store is never mutated after [`load`](VectorStore::load); switching
/// datasets means building a new store.
#[derive(Debug, Clone)]
pub struct VectorStore {
    name: String,
    words: Vec<String>,
    folded: Vec<String>,
    vectors: Vec<f64>,
    dimension: usize,
}

impl VectorStore {
    /// Builds a store from a dataset definition.
    ///
    /// # Errors
    ///
    /// * [`DatasetError::LengthMismatch`] - word and vector lists differ in length
    /// * [`DatasetError::DimensionMismatch`] - a vector disagrees with the dimensionality
    /// * [`DatasetError::NonFinite`] - a vector holds NaN or infinity
    /// * [`DatasetError::EmptyDimension`] - dimensionality is zero or cannot be inferred
    ///
    /// # Examples
    ///
    /// ```
    /// use wordsim::{Dataset, VectorStore};
    ///
    /// let dataset = Dataset::new(
    ///     "pets",
    ///     vec!["cat".to_string(), "dog".to_string()],
    ///     vec![vec![1.0, 0.0], vec![0.9, 0.1]],
    /// );
    /// let store = VectorStore::load(dataset).unwrap();
    /// assert_eq!(store.size(), 2);
    /// assert_eq!(store.dimensionality(), 2);
    ///
    /// let broken = Dataset::new("broken", vec!["cat".to_string()], vec![]);
    /// assert!(VectorStore::load(broken).is_err());
    /// ```
    pub fn load(dataset: Dataset) -> Result<VectorStore, DatasetError> {
        let Dataset { name, dimension, words, vectors } = dataset;

        if words.len() != vectors.len() {
            return Err(DatasetError::LengthMismatch {
                words: words.len(),
                vectors: vectors.len(),
            });
        }

        let dim = match dimension.or_else(|| vectors.first().map(Vec::len)) {
            Some(d) if d > 0 => d,
            _ => return Err(DatasetError::EmptyDimension),
        };

        let mut flat = Vec::with_capacity(vectors.len() * dim);
        for (index, (word, vector)) in words.iter().zip(vectors.iter()).enumerate() {
            if vector.len() != dim {
                return Err(DatasetError::DimensionMismatch {
                    index,
                    word: word.clone(),
                    expected: dim,
                    found: vector.len(),
                });
            }
            if vector.iter().any(|x| !x.is_finite()) {
                return Err(DatasetError::NonFinite { index, word: word.clone() });
            }
            flat.extend_from_slice(vector);
        }

        let folded = words.iter().map(|w| w.to_lowercase()).collect();

        Ok(VectorStore { name, words, folded, vectors: flat, dimension: dim })
    }

    /// Finds the first entry whose word matches `word` case-insensitively,
    /// ignoring surrounding whitespace.
    ///
    /// Returns `None` for a missing word; absence is not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use wordsim::{Dataset, VectorStore};
    ///
    /// let store = VectorStore::load(Dataset::new(
    ///     "pets",
    ///     vec!["Cat".to_string()],
    ///     vec![vec![1.0, 0.0]],
    /// )).unwrap();
    ///
    /// let entry = store.lookup("  cAT ").unwrap();
    /// assert_eq!(entry.word, "Cat");
    /// assert_eq!(entry.vector, &[1.0, 0.0]);
    /// assert!(store.lookup("dog").is_none());
    /// ```
    pub fn lookup(&self, word: &str) -> Option<Entry<'_>> {
        let needle = fold(word);
        if needle.is_empty() {
            return None;
        }
        self.folded
            .iter()
            .position(|w| *w == needle)
            .map(|index| self.entry(index))
    }

    /// Number of entries in the table.
    pub fn size(&self) -> usize {
        self.words.len()
    }

    pub fn dimensionality(&self) -> usize {
        self.dimension
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Words in table order, original casing.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Iterates every entry in table order.
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> + '_ {
        (0..self.words.len()).map(move |index| self.entry(index))
    }

    /// Retrieves the entry at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn entry(&self, index: usize) -> Entry<'_> {
        Entry {
            index,
            word: &self.words[index],
            vector: self.get_vector(index),
        }
    }

    fn get_vector(&self, index: usize) -> &[f64] {
        let start = index * self.dimension;
        &self.vectors[start..start + self.dimension]
    }
}

/// Lookup normalization: surrounding whitespace trimmed, lower-cased.
pub fn fold(word: &str) -> String {
    word.trim().to_lowercase()
}
