//! This is the vector math module
//! Provide dot product, magnitude and cosine similarity

/// Dot Product
/// dot_prod = sum(a[i] * b[i]) over the shared dimensions
/// Vectors of different length are compared over the overlapping prefix only
pub fn dot_product(left: &[f64], right: &[f64]) -> f64 {
    left.iter()
        .zip(right.iter())
        .map(|(x, y)| x * y)
        .sum()
}

/// Sum of squares
/// sum(v[i] * v[i])
pub fn sum_of_squares(vector: &[f64]) -> f64 {
    vector.iter()
        .map(|x| x * x)
        .sum()
}

/// L2 magnitude
/// ||v|| = sqrt(sum(v[i]^2))
pub fn magnitude(vector: &[f64]) -> f64 {
    sum_of_squares(vector).sqrt()
}

/// Cosine Similarity
/// cos = dot(a, b) / (||a|| * ||b||)
///
/// Returns exactly `0.0` when either vector has zero magnitude.
///
/// Vectors of unequal length are compared over the overlapping prefix only:
/// the dot product and both magnitudes ignore the longer vector's tail. A
/// loaded [`VectorStore`](crate::VectorStore) never produces such a pair.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let (a, b) = overlap(a, b);
    normalize(dot_product(a, b), magnitude(a), magnitude(b))
}

/// Both slices cut to their shared length.
pub(crate) fn overlap<'a>(a: &'a [f64], b: &'a [f64]) -> (&'a [f64], &'a [f64]) {
    let n = a.len().min(b.len());
    (&a[..n], &b[..n])
}

/// Final ratio of the cosine pipeline, shared with the calculation breakdown so
/// both paths produce the same bits.
pub(crate) fn normalize(dot: f64, magnitude_a: f64, magnitude_b: f64) -> f64 {
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }
    dot / (magnitude_a * magnitude_b)
}

#[cfg(test)]
mod vector_test {
    use super::*;

    // ========== Dot Product Tests ==========

    #[test]
    fn test_dot_product_basic() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        // Expected: 1*4 + 2*5 + 3*6 = 4 + 10 + 18 = 32
        assert!((dot_product(&a, &b) - 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_dot_product_orthogonal() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(dot_product(&a, &b), 0.0);
    }

    #[test]
    fn test_dot_product_overlapping_prefix() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0];
        // Only the first two dimensions take part: 4 + 10
        assert!((dot_product(&a, &b) - 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_dot_product_empty_vectors() {
        assert_eq!(dot_product(&[], &[]), 0.0);
    }

    // ========== Magnitude Tests ==========

    #[test]
    fn test_magnitude_basic() {
        // ||[3,4]|| = sqrt(9+16) = 5
        assert!((magnitude(&[3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert!((sum_of_squares(&[3.0, 4.0]) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_magnitude_zero_vector() {
        assert_eq!(magnitude(&[0.0, 0.0, 0.0]), 0.0);
    }

    // ========== Cosine Similarity Tests ==========

    #[test]
    fn test_cosine_identical_vectors() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_identical_25_dimensions() {
        let a = vec![0.5; 25];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_opposite_vectors() {
        let a = vec![0.3, -1.2, 4.5, 0.01];
        let negated: Vec<f64> = a.iter().map(|x| -x).collect();
        assert!((cosine_similarity(&a, &negated) + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_is_symmetric() {
        let a = vec![0.12, -0.5, 0.33, 0.9];
        let b = vec![-0.7, 0.25, 0.1, 0.4];
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_cosine_is_scale_invariant() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![0.4, -0.2, 0.9];
        let scaled: Vec<f64> = b.iter().map(|x| x * 7.5).collect();
        assert!((cosine_similarity(&a, &scaled) - cosine_similarity(&a, &b)).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_zero_vector_is_exactly_zero() {
        let zero = vec![0.0, 0.0, 0.0];
        let b = vec![1.0, 2.0, 3.0];

        let one_zero = cosine_similarity(&zero, &b);
        let both_zero = cosine_similarity(&zero, &zero);

        assert_eq!(one_zero, 0.0);
        assert_eq!(both_zero, 0.0);
        assert!(!both_zero.is_nan());
    }

    #[test]
    fn test_cosine_unequal_lengths_use_prefix() {
        // the trailing 1.0 lies outside the overlap
        let sim = cosine_similarity(&[1.0, 0.0], &[1.0, 0.0, 1.0]);
        assert!((sim - 1.0).abs() < 1e-12);
        assert_eq!(sim, cosine_similarity(&[1.0, 0.0, 1.0], &[1.0, 0.0]));

        // [3, 4] . [3, 0] = 9 over magnitudes 5 and 3
        let sim = cosine_similarity(&[3.0, 4.0, 7.0, 7.0], &[3.0, 0.0]);
        assert!((sim - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_negative_values() {
        let a = vec![-1.0, -2.0, -3.0];
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_cat_dog() {
        // dot = 0.9, ||cat|| = 1, ||dog|| = sqrt(0.82)
        let sim = cosine_similarity(&[1.0, 0.0], &[0.9, 0.1]);
        assert!((sim - 0.9 / 0.82_f64.sqrt()).abs() < 1e-12);
        assert!((sim - 0.9939).abs() < 1e-4);
    }
}
