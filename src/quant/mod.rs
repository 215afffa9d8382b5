//! Scalar quantization: quality-scaled tables, reciprocal fast path, and
//! the norm correction required by the approximate transform.
//!
//! Tables start from the standard Q=50 luminance/chrominance matrices. The
//! quality factor k in [1, 8] scales every entry in 10-bit fixed point
//! (smaller k = finer quantization); entries are floored at 1 so division
//! is always defined. When the approximate transform is selected, each
//! entry is additionally multiplied by the product of that row's and
//! column's basis norms, so the approximation's inflated coefficients see
//! an equally inflated step size.

use crate::config::{Parameters, TransformKind};
use crate::fixed::div_round;
use crate::tiles::{TILE_DIM, TILE_LEN};

/// Standard luminance table at quality 50.
pub const Q50_LUMA: [u16; TILE_LEN] = [
    16, 11, 10, 16, 24, 40, 51, 61,
    12, 12, 14, 19, 26, 58, 60, 55,
    14, 13, 16, 24, 40, 57, 69, 56,
    14, 17, 22, 29, 51, 87, 80, 62,
    18, 22, 37, 56, 68, 109, 103, 77,
    24, 35, 55, 64, 81, 104, 113, 92,
    49, 64, 78, 87, 103, 121, 120, 101,
    72, 92, 95, 98, 112, 100, 103, 99,
];

/// Standard chrominance table at quality 50.
pub const Q50_CHROMA: [u16; TILE_LEN] = [
    17, 18, 24, 47, 99, 99, 99, 99,
    18, 21, 26, 66, 99, 99, 99, 99,
    24, 26, 56, 99, 99, 99, 99, 99,
    47, 66, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
    99, 99, 99, 99, 99, 99, 99, 99,
];

/// Basis row norms of the approximate transform, scaled by 1024:
/// sqrt(8), sqrt(6), sqrt(4), sqrt(6), repeated mirrored.
const NORM_FIX: [i64; TILE_DIM] = [2896, 2508, 2048, 2508, 2896, 2508, 2048, 2508];

/// Reciprocal shift. Wide enough that `(a * recip) >> SHIFT` equals `a / q`
/// for every `a * q < 2^35`, which covers coefficients to +/-2^20 against
/// every runtime table entry, norm-corrected ones included.
const RECIP_SHIFT: u32 = 35;

/// A quality-scaled quantization table with its precomputed reciprocals.
pub struct QuantTable {
    values: [i32; TILE_LEN],
    reciprocals: [i64; TILE_LEN],
}

impl QuantTable {
    /// Build the table selected by `params` for the luma or chroma channel.
    pub fn new(params: &Parameters, luma: bool) -> Self {
        let base = if luma { &Q50_LUMA } else { &Q50_CHROMA };
        let mut values = scale_quant_table(base, params.quality_factor);
        if params.transform == TransformKind::Approx {
            apply_norm_correction(&mut values);
        }
        let reciprocals = std::array::from_fn(|i| compute_reciprocal(values[i]));
        QuantTable { values, reciprocals }
    }

    /// Table entry at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> i32 {
        self.values[index]
    }

    /// Quantize through the reciprocal fast path.
    #[inline]
    pub fn quantize(&self, value: i32, index: usize) -> i32 {
        let q = self.values[index] as i64;
        let a = value.unsigned_abs() as i64 + q / 2;
        let magnitude = ((a * self.reciprocals[index]) >> RECIP_SHIFT) as i32;
        if value < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Quantize through plain division. Reference for [`Self::quantize`];
    /// the two must agree on every representable coefficient.
    #[inline]
    pub fn quantize_div(&self, value: i32, index: usize) -> i32 {
        let q = self.values[index] as i64;
        let a = value.unsigned_abs() as i64 + q / 2;
        let magnitude = (a / q) as i32;
        if value < 0 {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Reverse quantization: a plain multiply.
    #[inline]
    pub fn dequantize(&self, value: i32, index: usize) -> i32 {
        value * self.values[index]
    }
}

/// Scale a canonical table by quality factor `k` in 10-bit fixed point,
/// flooring every entry at 1.
pub fn scale_quant_table(base: &[u16; TILE_LEN], quality_factor: f32) -> [i32; TILE_LEN] {
    let k_fixed = (quality_factor * 1024.0).round() as i64;
    std::array::from_fn(|i| (((base[i] as i64 * k_fixed) >> 10).max(1)) as i32)
}

/// Pre-multiply a table by the approximate transform's basis norms so one
/// quality factor governs exact and approximate transforms alike.
pub fn apply_norm_correction(table: &mut [i32; TILE_LEN]) {
    for row in 0..TILE_DIM {
        for col in 0..TILE_DIM {
            let i = row * TILE_DIM + col;
            let scaled = table[i] as i64 * NORM_FIX[row] * NORM_FIX[col];
            table[i] = div_round(scaled, 1 << 20).max(1) as i32;
        }
    }
}

/// Ceiling reciprocal of a positive divisor at [`RECIP_SHIFT`] bits.
fn compute_reciprocal(divisor: i32) -> i64 {
    let d = divisor as i64;
    ((1i64 << RECIP_SHIFT) + d - 1) / d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Parameters;

    fn table(quality: f32, transform: TransformKind, luma: bool) -> QuantTable {
        let params = Parameters::new(quality, transform);
        QuantTable::new(&params, luma)
    }

    #[test]
    fn test_unit_quality_is_identity_scaling() {
        let t = table(1.0, TransformKind::Fast, true);
        for i in 0..TILE_LEN {
            assert_eq!(t.get(i), Q50_LUMA[i] as i32);
        }
        let t = table(1.0, TransformKind::Fast, false);
        for i in 0..TILE_LEN {
            assert_eq!(t.get(i), Q50_CHROMA[i] as i32);
        }
    }

    #[test]
    fn test_integer_quality_scales_linearly() {
        let t = table(2.0, TransformKind::Fast, true);
        for i in 0..TILE_LEN {
            assert_eq!(t.get(i), Q50_LUMA[i] as i32 * 2);
        }
        let t = table(8.0, TransformKind::Fast, false);
        for i in 0..TILE_LEN {
            assert_eq!(t.get(i), Q50_CHROMA[i] as i32 * 8);
        }
    }

    #[test]
    fn test_fractional_quality_floors_at_one() {
        // Scaling is a truncating 10-bit shift; nothing drops below 1.
        let scaled = scale_quant_table(&Q50_LUMA, 1.5);
        assert_eq!(scaled[0], 24); // 16 * 1536 >> 10
        assert_eq!(scaled[2], 15); // 10 * 1536 >> 10
        for &v in scaled.iter() {
            assert!(v >= 1);
        }
    }

    #[test]
    fn test_quantize_rounds_ties_away_from_zero() {
        let t = table(1.0, TransformKind::Fast, true);
        // Entry 0 is 16: |c| + 8 then divide.
        assert_eq!(t.quantize(8, 0), 1);
        assert_eq!(t.quantize(7, 0), 0);
        assert_eq!(t.quantize(-8, 0), -1);
        assert_eq!(t.quantize(-7, 0), 0);
        assert_eq!(t.quantize(24, 0), 2);
        assert_eq!(t.quantize(0, 0), 0);
    }

    #[test]
    fn test_reciprocal_agrees_with_division_exhaustively() {
        // Every base table magnitude in [1, 255], swept over coefficients
        // to +/-2^20 including the tie boundaries of each divisor.
        for q in 1..=255i32 {
            let recip = compute_reciprocal(q);
            let check = |c: i32| {
                let a = c.unsigned_abs() as i64 + (q / 2) as i64;
                let fast = ((a * recip) >> RECIP_SHIFT) as i32;
                let slow = (a / q as i64) as i32;
                assert_eq!(fast, slow, "divisor {q}, coefficient {c}");
            };
            let mut c = -(1 << 20);
            while c <= (1 << 20) {
                check(c);
                c += 9973; // prime stride
            }
            for m in [1i32, 2, 3, 100, 4096, (1 << 20) / q] {
                let edge = m.saturating_mul(q);
                for delta in -2..=2 {
                    let c = (edge + delta).clamp(-(1 << 20), 1 << 20);
                    check(c);
                    check(-c);
                }
            }
        }
    }

    #[test]
    fn test_dequantize_is_multiply() {
        let t = table(2.0, TransformKind::Fast, true);
        assert_eq!(t.dequantize(3, 0), 3 * 32);
        assert_eq!(t.dequantize(-5, 63), -5 * t.get(63));
    }

    #[test]
    fn test_norm_correction_matches_hand_computation() {
        let mut tbl = scale_quant_table(&Q50_LUMA, 1.0);
        apply_norm_correction(&mut tbl);
        // Entry (0,0): 16 * 2896 * 2896 / 2^20 = 127.99 -> 128.
        assert_eq!(tbl[0], 128);
        // Entry (2,2): 16 * 2048 * 2048 / 2^20 = 64 exactly.
        assert_eq!(tbl[2 * TILE_DIM + 2], 64);
        // Entry (0,2): 10 * 2896 * 2048 / 2^20 = 56.56 -> 57.
        assert_eq!(tbl[2], 57);
    }

    #[test]
    fn test_norm_correction_applied_for_approx_only() {
        let plain = table(1.0, TransformKind::Fast, true);
        let corrected = table(1.0, TransformKind::Approx, true);
        assert_eq!(plain.get(0), 16);
        assert_eq!(corrected.get(0), 128);
        for i in 0..TILE_LEN {
            assert!(corrected.get(i) >= plain.get(i));
        }
    }

    #[test]
    fn test_double_correction_is_more_conservative_than_double_quality() {
        // Correcting twice must be at least as coarse as correcting a
        // doubled-quality table once; the norm products are all >= 2.
        let mut twice = scale_quant_table(&Q50_LUMA, 1.0);
        apply_norm_correction(&mut twice);
        apply_norm_correction(&mut twice);

        let mut doubled = scale_quant_table(&Q50_LUMA, 2.0);
        apply_norm_correction(&mut doubled);

        for i in 0..TILE_LEN {
            assert!(twice[i] >= doubled[i], "entry {i}: {} < {}", twice[i], doubled[i]);
        }
    }

    #[test]
    fn test_reciprocals_cover_norm_corrected_range() {
        // Largest possible runtime divisor: 121 * 8 (quality) * 8 (norms).
        let t = table(8.0, TransformKind::Approx, true);
        let max_q = (0..TILE_LEN).map(|i| t.get(i)).max().unwrap();
        assert!(max_q <= 16320);
        for c in [-(1 << 20), -65536, -1, 0, 1, 12345, 65536, 1 << 20] {
            for i in [0, 9, 35, 63] {
                assert_eq!(t.quantize(c, i), t.quantize_div(c, i), "c={c} i={i}");
            }
        }
    }
}
