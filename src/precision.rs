//! Precision predicates shared by the encoder and decoder.
//!
//! A value counts as an integer when its fractional part lies within
//! [`EPSILON`] of 0 or 1. The same absolute tolerance decides whether a
//! narrower representation (a scaled integer or an `f32`) is close enough to
//! the original double to be used in its place, so the fractional part is
//! never off by more than 10^-9.

/// Maximum tolerated rounding error, absolute below 1 and relative above.
pub const EPSILON: f64 = 1e-9;

/// Exclusive magnitude bound for the integer analysis (2^55).
///
/// Beyond this every double is integral anyway and its varuint would need
/// more than eight bytes, so the encoder goes straight to the float fallbacks.
pub const INTEGER_RANGE: f64 = 36_028_797_018_963_968.0;

/// Exclusive magnitude bound for scaled values (2^53).
///
/// Above it a double can no longer represent every integer, so a product
/// `v * 10^k` could look integral purely because of rounding.
pub const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Powers of ten indexed by scale step.
pub const SCALES: [f64; 5] = [1.0, 10.0, 100.0, 1_000.0, 10_000.0];

/// Get the power of ten for a scale step.
///
/// # Panics
/// Panics if `power` exceeds [`MAX_SCALE`](crate::tag::MAX_SCALE).
#[inline]
pub fn scale_factor(power: u8) -> f64 {
    SCALES[power as usize]
}

/// Check whether the fractional part of `v` is within [`EPSILON`] of 0 or 1.
///
/// Always false for NaN and infinities.
#[inline]
pub fn is_near_integer(v: f64) -> bool {
    let frac = v.abs().fract();
    frac < EPSILON || frac > 1.0 - EPSILON
}

/// Check whether `v` is inside the range the integer analysis accepts.
#[inline]
pub fn in_integer_range(v: f64) -> bool {
    v < INTEGER_RANGE && v > -INTEGER_RANGE
}

/// Check whether `v` would be encoded as an integer.
///
/// # Example
/// ```
/// use sfpc_rs::precision::is_integral;
///
/// assert!(is_integral(5.0));
/// assert!(is_integral(-5.0000000001));
/// assert!(!is_integral(5.1));
/// assert!(!is_integral(f64::MAX));
/// ```
#[inline]
pub fn is_integral(v: f64) -> bool {
    in_integer_range(v) && is_near_integer(v)
}

/// Check whether `a` and `b` agree within the codec's tolerance.
///
/// The error bound is [`EPSILON`] absolute for magnitudes below 1 and
/// relative above. Identical values (including equal infinities) always
/// agree, and two NaNs are treated as equal. Otherwise a NaN or an infinity
/// never agrees with anything.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    if a == b || (a.is_nan() && b.is_nan()) {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let magnitude = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= EPSILON * magnitude
}

/// Round `|v|` to the nearest integer, for values already known to be integral
/// and inside [`INTEGER_RANGE`].
#[inline]
pub fn round_magnitude(v: f64) -> u64 {
    v.abs().round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_integral() {
        let table = [
            (5.0, true),
            (5.1, false),
            (5.01, false),
            (5.0000001, false),
            (5.0000000001, true),
            (4.9999999999, true),
            (-5.0, true),
            (-5.1, false),
            (-5.0000001, false),
            (-5.0000000001, true),
            (0.0, true),
            (-0.0, true),
            (1e-12, true),
            (f64::MAX, false),
            (-f64::MAX, false),
            (i64::MIN as f64, false),
            (i64::MAX as f64, false),
            (f64::NAN, false),
            (f64::INFINITY, false),
        ];

        for (v, expected) in table {
            assert_eq!(is_integral(v), expected, "is_integral({})", v);
        }
    }

    #[test]
    fn test_integer_range_bounds() {
        assert!(in_integer_range(INTEGER_RANGE - 8.0));
        assert!(!in_integer_range(INTEGER_RANGE));
        assert!(!in_integer_range(-INTEGER_RANGE));
        assert!(!in_integer_range(f64::NAN));
    }

    #[test]
    fn test_approx_eq() {
        let table = [
            (0.2, 0.2 + 1e-10, true),
            (0.2, 0.2 + 1e-8, false),
            (5.0, 5.000000002, true),
            (5.0, 5.0001, false),
            (1e12, 1e12 + 100.0, true),
            (1e12, 1e12 + 10_000.0, false),
            (f64::INFINITY, f64::INFINITY, true),
            (f64::INFINITY, f64::NEG_INFINITY, false),
            (f64::INFINITY, 0.0, false),
            (f64::NEG_INFINITY, 1e300, false),
            (f64::INFINITY, f64::MAX, false),
            (f64::NAN, f64::INFINITY, false),
            (f64::NAN, f64::NAN, true),
            (f64::NAN, 0.0, false),
        ];

        for (a, b, expected) in table {
            assert_eq!(approx_eq(a, b), expected, "approx_eq({}, {})", a, b);
            assert_eq!(approx_eq(b, a), expected, "approx_eq({}, {})", b, a);
        }
    }

    #[test]
    fn test_scale_factor() {
        assert_eq!(scale_factor(0), 1.0);
        assert_eq!(scale_factor(3), 1_000.0);
        assert_eq!(scale_factor(4), 10_000.0);
    }

    #[test]
    #[should_panic]
    fn test_scale_factor_out_of_range() {
        scale_factor(crate::tag::MAX_SCALE + 1);
    }

    #[test]
    fn test_round_magnitude() {
        assert_eq!(round_magnitude(-128.0), 128);
        assert_eq!(round_magnitude(199.9999999999), 200);
        assert_eq!(round_magnitude(2.0000000001), 2);
    }

    #[test]
    fn test_limits() {
        assert_eq!(INTEGER_RANGE, 2f64.powi(55));
        assert_eq!(MAX_EXACT_INTEGER, 2f64.powi(53));
    }
}
