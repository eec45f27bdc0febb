//! Ratio arithmetic shared by the filter stores.

/// Clamp a ratio into `[0, 1]`; NaN maps to 0
pub fn clamp_unit(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}

/// Whether a ratio lies in `[0, 1]`
pub fn is_unit(ratio: f64) -> bool {
    (0.0..=1.0).contains(&ratio)
}

/// Arithmetic mean, `None` for an empty input
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// `part / whole`, or 1 when the whole is empty
pub fn share_of(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        return 1.0;
    }
    part as f64 / whole as f64
}

/// Scale a raw count, rounding to the nearest integer
pub fn scale_count(raw: u64, factor: f64) -> u64 {
    if !factor.is_finite() || factor <= 0.0 {
        return 0;
    }
    (raw as f64 * factor).round() as u64
}

/// Floor of `count * share`, the per-category part of a bucket
pub fn portion(count: u64, share: f64) -> u64 {
    (count as f64 * clamp_unit(share)).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn clamp_unit_bounds() {
        assert_eq!(clamp_unit(-0.5), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_abs_diff_eq!(clamp_unit(0.42), 0.42);
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_abs_diff_eq!(mean([0.4, 0.6]).unwrap_or_default(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn share_of_empty_whole_is_one() {
        assert_eq!(share_of(0, 0), 1.0);
        assert_abs_diff_eq!(share_of(30, 120), 0.25);
    }

    #[test]
    fn scale_count_rounds() {
        assert_eq!(scale_count(10, 0.25), 3);
        assert_eq!(scale_count(10, 0.24), 2);
        assert_eq!(scale_count(10, f64::NAN), 0);
        assert_eq!(scale_count(10, -1.0), 0);
    }

    #[test]
    fn portion_floors() {
        assert_eq!(portion(99, 0.35), 34);
        assert_eq!(portion(10, 1.5), 10);
    }
}
