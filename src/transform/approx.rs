//! Multiplierless approximate transform (Cintra–Bayer 2011).
//!
//! The forward matrix `T` holds only -1, 0 and 1, so the forward pass is
//! pure addition and subtraction. Its rows are orthogonal but not unit
//! length (squared norms 8, 6, 4, 6, 8, 6, 4, 6); the quantizer pre-scales
//! its tables by those norms so one quality factor governs this transform
//! and the exact ones alike.
//!
//! The inverse is `T` transposed with per-coefficient prescales 3, 4, 6, 4,
//! 3, 4, 6, 4 — the row norms expressed over the common denominator 24 — so
//! each output needs a single rounded division.

use crate::fixed::div_round;
use crate::tiles::{TILE_DIM, TILE_LEN};

/// Signed-ternary forward matrix.
const T: [[i64; 8]; 8] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 1, 1, 0, 0, -1, -1, -1],
    [1, 0, 0, -1, -1, 0, 0, 1],
    [1, 0, -1, -1, 1, 1, 0, -1],
    [1, -1, -1, 1, 1, -1, -1, 1],
    [1, -1, 0, 1, -1, 0, 1, -1],
    [0, -1, 1, 0, 0, 1, -1, 0],
    [0, -1, 1, -1, 1, -1, 1, 0],
];

/// Row norms over the common denominator 24: `PRESCALE[k] / 24 = 1 / |T_k|^2`.
const PRESCALE: [i64; 8] = [3, 4, 6, 4, 3, 4, 6, 4];

/// Forward 2D transform: add/sub only, rows then columns.
pub fn forward(input: &[i32; TILE_LEN], output: &mut [i32; TILE_LEN]) {
    let mut scratch = [0i32; TILE_LEN];
    for r in 0..TILE_DIM {
        let row: [i64; 8] = std::array::from_fn(|c| input[r * TILE_DIM + c] as i64);
        let out = forward_1d(&row);
        for c in 0..TILE_DIM {
            scratch[r * TILE_DIM + c] = out[c] as i32;
        }
    }
    for c in 0..TILE_DIM {
        let col: [i64; 8] = std::array::from_fn(|r| scratch[r * TILE_DIM + c] as i64);
        let out = forward_1d(&col);
        for r in 0..TILE_DIM {
            output[r * TILE_DIM + c] = out[r] as i32;
        }
    }
}

/// Inverse 2D transform: prescaled transpose, columns then rows.
pub fn inverse(input: &[i32; TILE_LEN], output: &mut [i32; TILE_LEN]) {
    let mut scratch = [0i32; TILE_LEN];
    for c in 0..TILE_DIM {
        let col: [i64; 8] = std::array::from_fn(|r| input[r * TILE_DIM + c] as i64);
        let out = inverse_1d(&col);
        for r in 0..TILE_DIM {
            scratch[r * TILE_DIM + c] = out[r] as i32;
        }
    }
    for r in 0..TILE_DIM {
        let row: [i64; 8] = std::array::from_fn(|c| scratch[r * TILE_DIM + c] as i64);
        let out = inverse_1d(&row);
        for c in 0..TILE_DIM {
            output[r * TILE_DIM + c] = out[c] as i32;
        }
    }
}

fn forward_1d(x: &[i64; 8]) -> [i64; 8] {
    std::array::from_fn(|k| {
        let mut acc = 0i64;
        for n in 0..8 {
            match T[k][n] {
                1 => acc += x[n],
                -1 => acc -= x[n],
                _ => {}
            }
        }
        acc
    })
}

fn inverse_1d(x: &[i64; 8]) -> [i64; 8] {
    std::array::from_fn(|n| {
        let mut acc = 0i64;
        for k in 0..8 {
            acc += x[k] * PRESCALE[k] * T[k][n];
        }
        div_round(acc, 24)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_orthogonal_with_expected_norms() {
        let expected = [8i64, 6, 4, 6, 8, 6, 4, 6];
        for a in 0..8 {
            for b in 0..8 {
                let dot: i64 = (0..8).map(|n| T[a][n] * T[b][n]).sum();
                if a == b {
                    assert_eq!(dot, expected[a]);
                } else {
                    assert_eq!(dot, 0, "rows {a} and {b} not orthogonal");
                }
            }
        }
    }

    #[test]
    fn test_round_trip_is_exact() {
        // T^T * diag(PRESCALE)/24 * T is the identity over the integers, so
        // the fixed-point round trip is exact, not merely close.
        let mut state = 12345u32;
        let mut next = move || {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            (state >> 16) as i32 % 2049 - 1024
        };
        for _ in 0..64 {
            let tile: [i32; TILE_LEN] = std::array::from_fn(|_| next());
            let mut freq = [0i32; TILE_LEN];
            let mut back = [0i32; TILE_LEN];
            forward(&tile, &mut freq);
            inverse(&freq, &mut back);
            assert_eq!(back, tile);
        }
    }

    #[test]
    fn test_forward_is_sum_for_dc() {
        let tile: [i32; TILE_LEN] = std::array::from_fn(|i| (i as i32 % 17) - 8);
        let mut freq = [0i32; TILE_LEN];
        forward(&tile, &mut freq);
        let total: i32 = tile.iter().sum();
        assert_eq!(freq[0], total);
    }
}
