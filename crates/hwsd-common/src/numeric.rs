//! Numeric helpers for consolidated measurements.
//!
//! Rounding is half-to-even at the requested precision so exported values
//! match the reference exports bit for bit.

/// Round `value` to `digits` decimals, ties to even.
///
/// # Examples
///
/// ```
/// use hwsd_common::round_half_even;
///
/// assert_eq!(round_half_even(2.5, 0), 2.0);
/// assert_eq!(round_half_even(3.5, 0), 4.0);
/// assert_eq!(round_half_even(1.23456, 3), 1.235);
/// ```
pub fn round_half_even(value: f64, digits: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if digits == 0 {
        return value.round_ties_even();
    }
    let factor = 10f64.powi(digits);
    (value * factor).round_ties_even() / factor
}

/// Round to the nearest integer (ties to even), using `default` when the
/// value is undefined.
pub fn round_to_int(value: Option<f64>, default: i64) -> i64 {
    match value {
        Some(v) if v.is_finite() => v.round_ties_even() as i64,
        _ => default,
    }
}

/// Clamp an optional value into `[min, max]`. Undefined values stay undefined.
pub fn clamp(value: Option<f64>, min: f64, max: f64) -> Option<f64> {
    value.filter(|v| !v.is_nan()).map(|v| v.clamp(min, max))
}

/// Arithmetic mean over the defined values; `None` when there are none.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values.into_iter().flatten() {
        if value.is_nan() {
            continue;
        }
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn mean_skips_missing_values() {
        assert_eq!(mean([Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean(Vec::<Option<f64>>::new()), None);
        assert_eq!(mean([Some(f64::NAN), Some(4.0)]), Some(4.0));
    }

    #[test]
    fn round_to_int_falls_back_on_undefined() {
        assert_eq!(round_to_int(None, 100), 100);
        assert_eq!(round_to_int(Some(f64::NAN), 0), 0);
        assert_eq!(round_to_int(Some(44.5), 0), 44);
        assert_eq!(round_to_int(Some(45.5), 0), 46);
        assert_eq!(round_to_int(Some(-0.4), 0), 0);
    }

    #[test]
    fn rounds_to_decimals() {
        assert_eq!(round_half_even(9.25, 1), 9.2);
        assert_eq!(round_half_even(6.0, 1), 6.0);
        assert_eq!(round_half_even(1.5, 3), 1.5);
    }

    #[test]
    fn clamp_keeps_none() {
        assert_eq!(clamp(None, 3.0, 11.0), None);
        assert_eq!(clamp(Some(f64::NAN), 3.0, 11.0), None);
        assert_eq!(clamp(Some(2.0), 3.0, 11.0), Some(3.0));
        assert_eq!(clamp(Some(12.5), 3.0, 11.0), Some(11.0));
    }

    proptest! {
        #[test]
        fn clamp_stays_within_bounds(value in -1.0e6f64..1.0e6) {
            let clamped = clamp(Some(value), 0.0, 100.0).unwrap();
            prop_assert!((0.0..=100.0).contains(&clamped));
        }

        #[test]
        fn mean_lies_between_min_and_max(values in proptest::collection::vec(-1.0e3f64..1.0e3, 1..20)) {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let avg = mean(values.iter().copied().map(Some)).unwrap();
            prop_assert!(avg >= min - 1e-9 && avg <= max + 1e-9);
        }
    }
}
