//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

use crate::constants::{MS_PER_DAY, MS_PER_SECOND, STAT_MAX, STAT_MIN};

/// Clamp a value into the attribute range, returning the floor for NaN.
#[must_use]
pub fn clamp_stat(value: f64) -> f64 {
    if value.is_nan() {
        return STAT_MIN;
    }
    value.clamp(STAT_MIN, STAT_MAX)
}

/// Sanitize an elapsed duration; negative or non-finite spans count as zero.
#[must_use]
pub fn sanitize_elapsed(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// Seconds between two epoch-millisecond instants, never negative.
#[must_use]
pub fn elapsed_seconds(from_ms: i64, to_ms: i64) -> f64 {
    let delta = to_ms.saturating_sub(from_ms).max(0);
    i64_to_f64(delta) / MS_PER_SECOND
}

/// Whole days elapsed between two epoch-millisecond instants, floored and
/// never negative.
#[must_use]
pub fn whole_days_between(from_ms: i64, to_ms: i64) -> u32 {
    let days = to_ms.saturating_sub(from_ms).max(0) / MS_PER_DAY;
    cast::<i64, u32>(days).unwrap_or(u32::MAX)
}

/// Round an attribute to a display percentage in `0..=100`.
#[must_use]
pub fn round_stat_pct(value: f64) -> u8 {
    let clamped = clamp_stat(value).round();
    cast::<f64, u8>(clamped).unwrap_or(0)
}

/// Convert i64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn i64_to_f64(value: i64) -> f64 {
    cast::<i64, f64>(value).unwrap_or(0.0)
}

/// Convert a JavaScript-style millisecond timestamp to whole milliseconds.
/// NaN maps to zero; out-of-range values saturate.
#[must_use]
pub fn f64_to_epoch_ms(value: f64) -> i64 {
    if value.is_nan() {
        return 0;
    }
    cast::<f64, i64>(value.floor()).unwrap_or(if value > 0.0 { i64::MAX } else { i64::MIN })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_ms_conversion_saturates() {
        assert_eq!(f64_to_epoch_ms(1_700_000_000_123.9), 1_700_000_000_123);
        assert_eq!(f64_to_epoch_ms(f64::NAN), 0);
        assert_eq!(f64_to_epoch_ms(f64::INFINITY), i64::MAX);
        assert_eq!(f64_to_epoch_ms(-1.0e30), i64::MIN);
    }

    #[test]
    fn clamp_handles_non_finite() {
        assert!((clamp_stat(f64::NAN) - 0.0).abs() < f64::EPSILON);
        assert!((clamp_stat(f64::INFINITY) - 100.0).abs() < f64::EPSILON);
        assert!((clamp_stat(f64::NEG_INFINITY) - 0.0).abs() < f64::EPSILON);
        assert!((clamp_stat(42.5) - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn elapsed_never_negative() {
        assert!((elapsed_seconds(5_000, 1_000) - 0.0).abs() < f64::EPSILON);
        assert!((elapsed_seconds(1_000, 3_500) - 2.5).abs() < f64::EPSILON);
        assert!((sanitize_elapsed(-3.0) - 0.0).abs() < f64::EPSILON);
        assert!((sanitize_elapsed(f64::NAN) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn whole_days_floor_and_clamp() {
        assert_eq!(whole_days_between(0, MS_PER_DAY - 1), 0);
        assert_eq!(whole_days_between(0, MS_PER_DAY), 1);
        assert_eq!(whole_days_between(0, MS_PER_DAY * 7 + 5), 7);
        assert_eq!(whole_days_between(MS_PER_DAY, 0), 0);
    }

    #[test]
    fn pct_rounds_half_up() {
        assert_eq!(round_stat_pct(49.5), 50);
        assert_eq!(round_stat_pct(-4.0), 0);
        assert_eq!(round_stat_pct(250.0), 100);
    }
}
