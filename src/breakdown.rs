//! Worked cosine-similarity calculation for one pair of words.

use crate::vector::{normalize, overlap, sum_of_squares};
use serde::Serialize;
use std::fmt;

/// `query_value × candidate_value` for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionProduct {
    pub dimension: usize,
    pub query_value: f64,
    pub candidate_value: f64,
    pub product: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MagnitudeBreakdown {
    pub sum_of_squares: f64,
    pub magnitude: f64,
}

impl MagnitudeBreakdown {
    fn of(vector: &[f64]) -> Self {
        let sum_of_squares = sum_of_squares(vector);
        MagnitudeBreakdown { sum_of_squares, magnitude: sum_of_squares.sqrt() }
    }
}

/// Every intermediate value of `cos(query, candidate)`.
///
/// Built with the same arithmetic as ranking, so `similarity` is bit-identical
/// to the score [`SimilarityEngine::search`](crate::SimilarityEngine::search)
/// reported for the pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationBreakdown {
    pub query_word: String,
    pub candidate_word: String,
    pub products: Vec<DimensionProduct>,
    pub dot_product: f64,
    pub query_magnitude: MagnitudeBreakdown,
    pub candidate_magnitude: MagnitudeBreakdown,
    pub similarity: f64,
}

impl CalculationBreakdown {
    pub fn compute(
        query_word: &str,
        query: &[f64],
        candidate_word: &str,
        candidate: &[f64],
    ) -> Self {
        let (query, candidate) = overlap(query, candidate);
        let products: Vec<DimensionProduct> = query
            .iter()
            .zip(candidate.iter())
            .enumerate()
            .map(|(dimension, (q, c))| DimensionProduct {
                dimension,
                query_value: *q,
                candidate_value: *c,
                product: q * c,
            })
            .collect();

        let dot_product = products.iter().map(|p| p.product).sum();
        let query_magnitude = MagnitudeBreakdown::of(query);
        let candidate_magnitude = MagnitudeBreakdown::of(candidate);
        let similarity = normalize(
            dot_product,
            query_magnitude.magnitude,
            candidate_magnitude.magnitude,
        );

        CalculationBreakdown {
            query_word: query_word.to_string(),
            candidate_word: candidate_word.to_string(),
            products,
            dot_product,
            query_magnitude,
            candidate_magnitude,
            similarity,
        }
    }
}

impl fmt::Display for CalculationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (q, c) = (&self.query_word, &self.candidate_word);

        writeln!(f, "\"{}\" · \"{}\" = {:.6}", q, c, self.similarity)?;
        writeln!(f)?;
        writeln!(f, "{:>9}  {:>12}     {:>12}     {:>12}", "dimension", q, c, "product")?;
        for p in &self.products {
            writeln!(
                f,
                "{:>9}  {:>12.6}  ×  {:>12.6}  =  {:>12.6}",
                p.dimension, p.query_value, p.candidate_value, p.product
            )?;
        }
        writeln!(f)?;
        writeln!(f, "dot product      = {:.6}", self.dot_product)?;
        writeln!(
            f,
            "|{}| = sqrt({:.6}) = {:.6}",
            q, self.query_magnitude.sum_of_squares, self.query_magnitude.magnitude
        )?;
        writeln!(
            f,
            "|{}| = sqrt({:.6}) = {:.6}",
            c, self.candidate_magnitude.sum_of_squares, self.candidate_magnitude.magnitude
        )?;
        write!(
            f,
            "similarity = {:.6} / ({:.6} × {:.6}) = {:.6}",
            self.dot_product,
            self.query_magnitude.magnitude,
            self.candidate_magnitude.magnitude,
            self.similarity
        )
    }
}

#[cfg(test)]
mod breakdown_test {
    use super::*;
    use crate::vector::cosine_similarity;

    #[test]
    fn test_cat_dog_breakdown() {
        let b = CalculationBreakdown::compute("cat", &[1.0, 0.0], "dog", &[0.9, 0.1]);

        assert_eq!(b.products.len(), 2);
        assert_eq!(b.products[0].product, 0.9);
        assert_eq!(b.products[1].product, 0.0);
        assert!((b.dot_product - 0.9).abs() < 1e-12);
        assert_eq!(b.query_magnitude.magnitude, 1.0);
        assert!((b.candidate_magnitude.sum_of_squares - 0.82).abs() < 1e-12);
        assert!((b.candidate_magnitude.magnitude - 0.9055).abs() < 1e-4);
        assert!((b.similarity - 0.9939).abs() < 1e-4);
    }

    #[test]
    fn test_similarity_matches_cosine_bits() {
        let a = [0.418, 0.24968, -0.41242, 0.1217, 0.34527];
        let b = [0.013441, 0.23682, -0.16899, 0.40951, 0.63812];

        let breakdown = CalculationBreakdown::compute("the", &a, "of", &b);
        assert_eq!(
            breakdown.similarity.to_bits(),
            cosine_similarity(&a, &b).to_bits()
        );
    }

    #[test]
    fn test_unequal_lengths_use_overlap() {
        let a = [3.0, 4.0, 7.0];
        let b = [3.0, 0.0];

        let breakdown = CalculationBreakdown::compute("a", &a, "b", &b);
        assert_eq!(breakdown.products.len(), 2);
        assert_eq!(breakdown.query_magnitude.sum_of_squares, 25.0);
        assert_eq!(breakdown.similarity.to_bits(), cosine_similarity(&a, &b).to_bits());
    }

    #[test]
    fn test_zero_vector_breakdown() {
        let b = CalculationBreakdown::compute("void", &[0.0, 0.0], "dog", &[0.9, 0.1]);
        assert_eq!(b.query_magnitude.magnitude, 0.0);
        assert_eq!(b.similarity, 0.0);
    }

    #[test]
    fn test_display_rounds_to_six_decimals() {
        let b = CalculationBreakdown::compute("cat", &[1.0, 0.0], "dog", &[0.9, 0.1]);
        let text = b.to_string();

        assert!(text.starts_with("\"cat\" · \"dog\" = 0.993884"));
        assert!(text.contains("dot product      = 0.900000"));
        assert!(text.contains("|dog| = sqrt(0.820000) = 0.905539"));
    }
}
