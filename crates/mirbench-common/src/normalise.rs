//! Score normalisation functions.

/// Tolerance under which a score range is treated as degenerate.
const RANGE_EPSILON: f64 = 1e-12;

/// Min-max normalisation within a given range [min_val, max_val].
pub fn minmax_normalise(value: f64, min_val: f64, max_val: f64) -> f64 {
    if (max_val - min_val).abs() < RANGE_EPSILON {
        return 0.5; // degenerate case
    }
    ((value - min_val) / (max_val - min_val)).clamp(0.0, 1.0)
}

/// Rescale a whole score list to [0, 1] using its own minimum and maximum.
/// Order is preserved. A constant list maps every entry to 0.5.
pub fn minmax_normalise_all(scores: &[f64]) -> Vec<f64> {
    let Some((min, max)) = bounds(scores) else {
        return vec![];
    };
    scores.iter().map(|&s| minmax_normalise(s, min, max)).collect()
}

fn bounds(scores: &[f64]) -> Option<(f64, f64)> {
    let first = *scores.first()?;
    Some(
        scores
            .iter()
            .fold((first, first), |(lo, hi), &s| (lo.min(s), hi.max(s))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minmax_normalise_all_hits_bounds() {
        let scores = vec![23.4, -1.5, 7.0, 12.25];
        let normed = minmax_normalise_all(&scores);

        let min = normed.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = normed.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((min - 0.0).abs() < 1e-12);
        assert!((max - 1.0).abs() < 1e-12);
        assert!((normed[1] - 0.0).abs() < 1e-12); // -1.5 is the minimum
        assert!((normed[0] - 1.0).abs() < 1e-12); // 23.4 is the maximum
    }

    #[test]
    fn test_minmax_normalise_all_preserves_order() {
        let scores = vec![3.0, 1.0, 2.0, 5.0, 4.0];
        let normed = minmax_normalise_all(&scores);
        for i in 0..scores.len() {
            for j in 0..scores.len() {
                if scores[i] < scores[j] {
                    assert!(normed[i] < normed[j]);
                }
            }
        }
    }

    #[test]
    fn test_minmax_degenerate_range() {
        assert_eq!(minmax_normalise_all(&[4.2, 4.2, 4.2]), vec![0.5, 0.5, 0.5]);
        assert!(minmax_normalise_all(&[]).is_empty());
        assert_eq!(minmax_normalise(1.0, 2.0, 2.0), 0.5);
    }
}
