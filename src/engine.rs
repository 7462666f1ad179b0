//! The similarity engine module
//! Provide top-K cosine search and per-pair explanations over a `VectorStore`

use crate::breakdown::CalculationBreakdown;
use crate::store::{fold, VectorStore};
use crate::vector::cosine_similarity;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

/// Number of results returned by a search.
pub const TOP_K: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub word: String,
    pub similarity: f64,
}

/// Result of [`SimilarityEngine::search`].
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Blank input; nothing to display.
    Empty,
    /// The normalized query word is not in the table.
    NotFound(String),
    /// Ranked results, best first.
    Found(Vec<SearchResult>),
}

/// Result of [`SimilarityEngine::explain`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExplainOutcome {
    Found(CalculationBreakdown),
    /// The first of the two words that could not be resolved.
    NotFound(String),
}

/// Stateless search over one borrowed store.
///
/// # Examples
///
/// ```
/// use wordsim::{Dataset, SearchOutcome, SimilarityEngine, VectorStore};
///
/// let store = VectorStore::load(Dataset::new(
///     "pets",
///     vec!["cat".to_string(), "dog".to_string(), "fish".to_string()],
///     vec![vec![1.0, 0.0], vec![0.9, 0.1], vec![0.0, 1.0]],
/// )).unwrap();
///
/// let engine = SimilarityEngine::new(&store);
/// match engine.search("cat") {
///     SearchOutcome::Found(results) => {
///         assert_eq!(results[0].word, "dog");
///         assert_eq!(results[1].word, "fish");
///     }
///     other => panic!("unexpected outcome: {:?}", other),
/// }
/// assert_eq!(engine.search("   "), SearchOutcome::Empty);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SimilarityEngine<'a> {
    store: &'a VectorStore,
    top_k: usize,
}

impl<'a> SimilarityEngine<'a> {
    pub fn new(store: &'a VectorStore) -> Self {
        SimilarityEngine { store, top_k: TOP_K }
    }

    /// Overrides how many results a search returns.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn store(&self) -> &'a VectorStore {
        self.store
    }

    /// Ranks every other entry of the store against `word`.
    ///
    /// Only the matched table index is excluded, so a duplicate spelling
    /// stored elsewhere is still scored. Equal scores keep table order.
    pub fn search(&self, word: &str) -> SearchOutcome {
        let query = fold(word);
        if query.is_empty() {
            return SearchOutcome::Empty;
        }

        let Some(entry) = self.store.lookup(&query) else {
            debug!(word = %query, dataset = self.store.name(), "search word not found");
            return SearchOutcome::NotFound(query);
        };

        let mut scored: Vec<(usize, f64)> = self
            .store
            .entries()
            .filter(|candidate| candidate.index != entry.index)
            .map(|candidate| {
                debug_assert_eq!(candidate.vector.len(), entry.vector.len());
                (candidate.index, cosine_similarity(entry.vector, candidate.vector))
            })
            .collect();

        // sort_by is stable: ties stay in table order
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(self.top_k);

        debug!(
            word = %query,
            dataset = self.store.name(),
            candidates = self.store.size().saturating_sub(1),
            "search ranked"
        );

        SearchOutcome::Found(
            scored
                .into_iter()
                .map(|(index, similarity)| SearchResult {
                    word: self.store.entry(index).word.to_string(),
                    similarity,
                })
                .collect(),
        )
    }

    /// Recomputes the cosine similarity of two words step by step.
    pub fn explain(&self, query_word: &str, candidate_word: &str) -> ExplainOutcome {
        let Some(query) = self.store.lookup(query_word) else {
            return ExplainOutcome::NotFound(fold(query_word));
        };
        let Some(candidate) = self.store.lookup(candidate_word) else {
            return ExplainOutcome::NotFound(fold(candidate_word));
        };

        ExplainOutcome::Found(CalculationBreakdown::compute(
            query.word,
            query.vector,
            candidate.word,
            candidate.vector,
        ))
    }
}
