//! Small numeric helpers shared by the feature extractors and the models.

/// Round `value` to `decimals` places, halves away from zero.
///
/// ```
/// use tweetsieve::util::numeric::round_to;
///
/// assert_eq!(round_to(2.25, 1), 2.3);
/// assert_eq!(round_to(-2.25, 1), -2.3);
/// assert_eq!(round_to(1.0, 4), 1.0);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Dot product of two equally long slices.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Numerically stable softmax, in place.
pub fn softmax_in_place(values: &mut [f64]) {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        let uniform = 1.0 / values.len().max(1) as f64;
        values.iter_mut().for_each(|v| *v = uniform);
        return;
    }

    let mut sum = 0.0;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v;
    }
    for v in values.iter_mut() {
        *v /= sum;
    }
}

/// Index of the largest value; the first one wins ties.
pub fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, best_value), (i, &v)| {
            if v > best_value { (i, v) } else { (best, best_value) }
        })
        .0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.12345, 4), 0.1235);
        assert_eq!(round_to(-15.59, 1), -15.6);
        assert_eq!(round_to(206.835, 0), 207.0);
        assert_eq!(round_to(0.0, 3), 0.0);
    }

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]), 32.0);
        assert_eq!(dot(&[], &[]), 0.0);
    }

    #[test]
    fn test_softmax() {
        let mut values = [1.0, 1.0, 1.0, 1.0];
        softmax_in_place(&mut values);
        assert!(values.iter().all(|v| (v - 0.25).abs() < 1e-12));

        let mut values = [1000.0, 0.0];
        softmax_in_place(&mut values);
        assert!((values[0] - 1.0).abs() < 1e-12);
        assert!(values[1] >= 0.0);
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), 1);
        assert_eq!(argmax(&[0.5, 0.5]), 0);
    }
}
