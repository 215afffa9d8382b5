//! Fixed-point arithmetic conventions shared by the block transforms.
//!
//! Every exact transform and the quantizer norm correction work on integers
//! scaled by [`SCALE`] = 2^20. The trigonometric constants below are the
//! cosines and sines used by the butterfly decomposition, pre-multiplied by
//! `SCALE` and rounded. All multiply-accumulates on these constants must run
//! in `i64`; 32-bit intermediates overflow on the outer products.

/// Base fixed-point scale, 2^20.
pub const SCALE: i64 = 1 << 20;

/// cos(pi/16) * SCALE
pub const C1: i64 = 1_028_428;
/// sin(pi/16) * SCALE
pub const S1: i64 = 204_567;
/// cos(3*pi/16) * SCALE
pub const C3: i64 = 871_859;
/// sin(3*pi/16) * SCALE
pub const S3: i64 = 582_558;
/// cos(6*pi/16) * SCALE
pub const C6: i64 = 401_273;
/// sin(6*pi/16) * SCALE
pub const S6: i64 = 968_758;
/// sqrt(2) * SCALE
pub const SQRT2: i64 = 1_482_910;
/// sqrt(2)/2 * SCALE (exact half of [`SQRT2`])
pub const SQRT2_H: i64 = SQRT2 / 2;
/// SCALE / sqrt(8), rounded. Normalization of the DC basis row.
pub const INV_SQRT8: i64 = 370_728;

/// Signed division with rounding half away from zero.
///
/// For numerator `n` and positive denominator `d`:
/// `sign(n) * (|n| + d/2) / d`, truncating toward zero.
#[inline(always)]
pub fn div_round(n: i64, d: i64) -> i64 {
    debug_assert!(d > 0);
    let half = d / 2;
    if n >= 0 {
        (n + half) / d
    } else {
        -((-n + half) / d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div_round_positive() {
        assert_eq!(div_round(10, 4), 3); // 2.5 rounds away
        assert_eq!(div_round(9, 4), 2); // 2.25 rounds down
        assert_eq!(div_round(11, 4), 3); // 2.75 rounds up
        assert_eq!(div_round(0, 7), 0);
    }

    #[test]
    fn test_div_round_negative_is_symmetric() {
        for n in -1000..1000i64 {
            for d in [1, 2, 3, 7, 24, 1000] {
                assert_eq!(div_round(-n, d), -div_round(n, d));
            }
        }
    }

    #[test]
    fn test_constants_are_scaled_trig() {
        // Each constant must be the rounded product of SCALE and its ratio.
        let cases = [
            (C1, (std::f64::consts::PI / 16.0).cos()),
            (S1, (std::f64::consts::PI / 16.0).sin()),
            (C3, (3.0 * std::f64::consts::PI / 16.0).cos()),
            (S3, (3.0 * std::f64::consts::PI / 16.0).sin()),
            (C6, (6.0 * std::f64::consts::PI / 16.0).cos()),
            (S6, (6.0 * std::f64::consts::PI / 16.0).sin()),
            (SQRT2, 2.0f64.sqrt()),
            (INV_SQRT8, 1.0 / 8.0f64.sqrt()),
        ];
        for (fixed, real) in cases {
            assert_eq!(fixed, (real * SCALE as f64).round() as i64);
        }
    }
}
