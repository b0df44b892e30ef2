/// Computes the Pearson correlation coefficient of paired observations.
///
/// Each pair is `(x, y)`: one user's score and another user's score for the
/// same item. The coefficient is the centered cross-product sum divided by the
/// square root of the product of the two centered sums of squares.
///
/// Returns 0.0 when either side has zero variance (every `x` equal, or every
/// `y` equal), since no linear relationship can be measured. An empty slice
/// also yields 0.0. A single pair always has zero variance and therefore
/// yields 0.0 as well.
///
/// Each side is rescaled by a power of two before the products are taken, so
/// scores of any finite magnitude neither overflow nor change the result.
pub fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let Some(&(first_x, first_y)) = pairs.first() else {
        return 0.0;
    };

    // Constant sides are detected on the raw scores: a rounded mean would
    // leave a tiny non-zero spread behind.
    if pairs.iter().all(|&(x, _)| x == first_x) || pairs.iter().all(|&(_, y)| y == first_y) {
        return 0.0;
    }

    let scale_x = unit_scale(pairs.iter().fold(0.0, |m: f64, (x, _)| m.max(x.abs())));
    let scale_y = unit_scale(pairs.iter().fold(0.0, |m: f64, (_, y)| m.max(y.abs())));

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x * scale_x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y * scale_y).sum::<f64>() / n;

    let (cross, sum_sq_x, sum_sq_y) =
        pairs
            .iter()
            .fold((0.0, 0.0, 0.0), |(cross, sx, sy), &(x, y)| {
                let dx = x * scale_x - mean_x;
                let dy = y * scale_y - mean_y;
                (cross + dx * dy, sx + dx * dx, sy + dy * dy)
            });

    if sum_sq_x == 0.0 || sum_sq_y == 0.0 {
        return 0.0;
    }

    let r = cross / (sum_sq_x * sum_sq_y).sqrt();
    if r.is_finite() {
        r
    } else {
        0.0
    }
}

/// Power of two that brings `max_abs` into `[0.5, 1)`
///
/// Multiplying by a power of two is exact, so scaled scores keep every bit of
/// their relative spread.
fn unit_scale(max_abs: f64) -> f64 {
    if max_abs == 0.0 || !max_abs.is_finite() {
        return 1.0;
    }
    let exponent = ((max_abs.to_bits() >> 52) & 0x7ff) as i64 - 1023;
    let biased = 1023 - (exponent + 1);
    if biased >= 1 {
        f64::from_bits((biased as u64) << 52)
    } else {
        // 2^-1023 and 2^-1024 are subnormal
        f64::from_bits(1_u64 << (51 + biased))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_perfect_positive_correlation() {
        let pairs = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        assert!((pearson(&pairs) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let pairs = [(1.0, 5.0), (2.0, 3.0), (3.0, 1.0)];
        assert!((pearson(&pairs) + 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_known_coefficient() {
        // x̄ = 3, ȳ = 3; cross = 7, Σdx² = 10, Σdy² = 10
        let pairs = [(1.0, 2.0), (2.0, 3.0), (3.0, 1.0), (4.0, 4.0), (5.0, 5.0)];
        assert!((pearson(&pairs) - 0.7).abs() < EPSILON);
    }

    #[test]
    fn test_zero_variance_in_x_is_zero() {
        let pairs = [(5.0, 1.0), (5.0, 3.0), (5.0, 4.0)];
        assert_eq!(pearson(&pairs), 0.0);
    }

    #[test]
    fn test_zero_variance_in_y_is_zero() {
        let pairs = [(1.0, 2.0), (4.0, 2.0)];
        assert_eq!(pearson(&pairs), 0.0);
    }

    #[test]
    fn test_single_pair_is_zero() {
        assert_eq!(pearson(&[(4.0, 2.0)]), 0.0);
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(pearson(&[]), 0.0);
    }

    #[test]
    fn test_constant_fractional_scores_are_zero() {
        for constant in [0.1, 0.2, 0.7, 3.3] {
            let pairs = [(constant, 1.0), (constant, 2.0), (constant, 4.0)];
            assert_eq!(pearson(&pairs), 0.0);

            let swapped = [(1.0, constant), (2.0, constant), (4.0, constant)];
            assert_eq!(pearson(&swapped), 0.0);
        }
    }

    #[test]
    fn test_large_scores_do_not_overflow() {
        let pairs = [(1e200, 1e200), (-1e200, -1e200)];
        assert!((pearson(&pairs) - 1.0).abs() < EPSILON);

        let pairs = [(f64::MAX, 1.0), (-f64::MAX, 2.0), (0.0, 3.0)];
        let r = pearson(&pairs);
        assert!(r.is_finite());
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn test_tiny_scores_keep_their_correlation() {
        let pairs = [(1e-300, 2e-300), (2e-300, 4e-300), (3e-300, 6e-300)];
        assert!((pearson(&pairs) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_non_finite_input_is_zero() {
        assert_eq!(pearson(&[(f64::NAN, 1.0), (2.0, 3.0)]), 0.0);
        assert_eq!(pearson(&[(f64::INFINITY, 1.0), (2.0, 3.0)]), 0.0);
    }

    #[test]
    fn test_unit_scale_is_power_of_two() {
        assert_eq!(unit_scale(5.0), 0.125);
        assert_eq!(unit_scale(1.0), 0.5);
        assert_eq!(unit_scale(0.0), 1.0);
        assert!((0.5..1.0).contains(&(1e200 * unit_scale(1e200))));
        assert!((0.5..1.0).contains(&(f64::MAX * unit_scale(f64::MAX))));
    }

    #[test]
    fn test_swapped_pairs_are_identical() {
        let pairs = [(1.0, 4.0), (3.0, 2.0), (5.0, 5.0), (2.0, 1.0)];
        let swapped: Vec<(f64, f64)> = pairs.iter().map(|&(x, y)| (y, x)).collect();
        assert_eq!(pearson(&pairs), pearson(&swapped));
    }
}
