//! Reference DCT-II by direct cosine-matrix summation.
//!
//! Slower than the butterfly form but trivially auditable: `COS[k][n]` is
//! cos(pi*k*(2n+1)/16) at scale 2^20 and `NORM` carries the orthonormal
//! row weights. Every entry is spelled from the constants in
//! [`crate::fixed`], which is what makes this module and [`super::fast`]
//! produce identical integers rather than merely close ones.

use crate::fixed::{div_round, C1, C3, C6, INV_SQRT8, S1, S3, S6, SCALE, SQRT2_H};
use crate::tiles::{TILE_DIM, TILE_LEN};

/// Scaled 8×8 DCT basis, `COS[k][n]` = cos(pi*k*(2n+1)/16) * SCALE.
const COS: [[i64; 8]; 8] = [
    [SCALE, SCALE, SCALE, SCALE, SCALE, SCALE, SCALE, SCALE],
    [C1, C3, S3, S1, -S1, -S3, -C3, -C1],
    [S6, C6, -C6, -S6, -S6, -C6, C6, S6],
    [C3, -S1, -C1, -S3, S3, C1, S1, -C3],
    [SQRT2_H, -SQRT2_H, -SQRT2_H, SQRT2_H, SQRT2_H, -SQRT2_H, -SQRT2_H, SQRT2_H],
    [S3, -C1, S1, C3, -C3, -S1, C1, -S3],
    [C6, -S6, S6, -C6, -C6, S6, -S6, C6],
    [S1, -S3, C3, -C1, C1, -C3, S3, -S1],
];

/// Orthonormal row weights: 1/sqrt(8) for DC, sqrt(2/8) = 1/2 for the rest.
const NORM: [i64; 8] = [
    INV_SQRT8,
    SCALE / 2,
    SCALE / 2,
    SCALE / 2,
    SCALE / 2,
    SCALE / 2,
    SCALE / 2,
    SCALE / 2,
];

/// Forward 2D transform by direct summation: rows, then columns.
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

/// Inverse 2D transform by direct summation: columns, then rows.
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
            acc += x[n] * COS[k][n];
        }
        div_round(NORM[k] * acc, SCALE * SCALE)
    })
}

fn inverse_1d(x: &[i64; 8]) -> [i64; 8] {
    std::array::from_fn(|n| {
        let mut acc = 0i64;
        for k in 0..8 {
            acc += x[k] * NORM[k] * COS[k][n];
        }
        div_round(acc, SCALE * SCALE)
    })
}
