//! Vector normalization and cosine scoring.

use phrasal_core::constants::NORM_EPSILON;

/// Scale `v` to unit length. The epsilon in the denominator maps a zero
/// vector to a zero vector instead of dividing by zero.
pub fn normalize(v: &[f32]) -> Vec<f32> {
    let norm = v
        .iter()
        .map(|x| (*x as f64) * (*x as f64))
        .sum::<f64>()
        .sqrt();
    let denom = norm + NORM_EPSILON;
    v.iter().map(|x| (*x as f64 / denom) as f32).collect()
}

/// Dot product of two normalized vectors. Non-finite results score 0.0.
pub fn similarity(a: &[f32], b: &[f32]) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| (*x as f64) * (*y as f64))
        .sum();
    if dot.is_finite() {
        dot
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cosine of two raw vectors, the way the DP scores them.
    fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
        similarity(&normalize(a), &normalize(b))
    }

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_have_similarity_minus_one() {
        let a = vec![1.0, 0.0];
        let b = vec![-2.0, 0.0];
        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn orthogonal_vectors_have_similarity_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert!(cosine_similarity(&a, &b).abs() < 1e-9);
    }

    #[test]
    fn zero_vector_scores_zero_not_nan() {
        let zero = vec![0.0; 8];
        let v = vec![0.5; 8];
        let sim = cosine_similarity(&zero, &v);
        assert_eq!(sim, 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn nan_input_scores_zero() {
        let a = vec![f32::NAN, 1.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn normalize_produces_unit_length() {
        let n = normalize(&[3.0, 4.0]);
        let len: f32 = n.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((len - 1.0).abs() < 1e-6);
    }
}
