//! Cosine similarity between person feature vectors.
//!
//! The similarity doubles as the Bernoulli bias for edge formation, so the
//! result is clamped onto `[0, 1]`: feature vectors are non-negative, which
//! keeps the theoretical range inside the unit interval, but floating-point
//! noise can spill past either boundary.

use crate::person::Person;

/// Computes the cosine similarity between two slices.
///
/// Returns `0.0` when either vector has zero norm (including empty inputs);
/// that case cannot arise for generated people, whose residency invariant
/// guarantees a non-zero feature vector, but it is handled rather than
/// propagated.
///
/// # Examples
/// ```
/// use mingle_core::cosine_similarity;
///
/// let parallel = cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]);
/// assert!((parallel - 1.0).abs() < 1e-12);
///
/// let orthogonal = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
/// assert_eq!(orthogonal, 0.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity requires floating-point arithmetic"
)]
#[must_use]
pub fn cosine_similarity(left: &[f64], right: &[f64]) -> f64 {
    let mut dot = 0.0_f64;
    let mut left_squares = 0.0_f64;
    let mut right_squares = 0.0_f64;
    for (&l, &r) in left.iter().zip(right.iter()) {
        dot += l * r;
        left_squares += l * l;
        right_squares += r * r;
    }

    let denominator = left_squares.sqrt() * right_squares.sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    (dot / denominator).clamp(0.0, 1.0)
}

/// Similarity between two people, computed over their feature vectors.
#[must_use]
pub fn person_similarity(left: &Person, right: &Person) -> f64 {
    cosine_similarity(&left.feature_vector(), &right.feature_vector())
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn identical_vectors_score_one() {
        let v = [0.3, 0.7, 1.0, 0.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn zero_norm_inputs_score_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    proptest! {
        #[test]
        fn non_negative_vectors_score_within_the_unit_interval(
            pairs in proptest::collection::vec((0.0_f64..=1.0, 0.0_f64..=1.0), 1..32)
        ) {
            let left: Vec<f64> = pairs.iter().map(|&(l, _)| l).collect();
            let right: Vec<f64> = pairs.iter().map(|&(_, r)| r).collect();
            let similarity = cosine_similarity(&left, &right);
            prop_assert!((0.0..=1.0).contains(&similarity));
        }

        #[test]
        fn similarity_is_symmetric(
            pairs in proptest::collection::vec((0.0_f64..=1.0, 0.0_f64..=1.0), 1..32)
        ) {
            let left: Vec<f64> = pairs.iter().map(|&(l, _)| l).collect();
            let right: Vec<f64> = pairs.iter().map(|&(_, r)| r).collect();
            prop_assert_eq!(
                cosine_similarity(&left, &right).to_bits(),
                cosine_similarity(&right, &left).to_bits()
            );
        }
    }
}
