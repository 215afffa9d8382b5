//! Butterfly DCT-II with orthonormal scaling.
//!
//! The 1D forward pass folds the 8 samples into symmetric sums and
//! differences, solves the even half with a 6π/16 rotation plus the √8
//! normalization of the DC/coefficient-4 pair, and the odd half with a full
//! 4×4 rotation through C1/S1/C3/S3. One rounded division lands each output
//! on the orthonormal scale.
//!
//! The inverse defers every division: the even and odd halves are carried at
//! doubled fixed-point scale with no intermediate truncation, and the final
//! butterfly performs exactly one rounded division per output sample.
//! Dividing at each stage instead would cascade truncation error into
//! visible single-LSB pixel deviations.

use crate::fixed::{div_round, C1, C3, C6, INV_SQRT8, S1, S3, S6, SCALE, SQRT2_H};
use crate::tiles::{TILE_DIM, TILE_LEN};

/// Forward 2D transform: rows, then columns of the row result.
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

/// Inverse 2D transform: columns, then rows.
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
    // Symmetric sums feed the even half, differences the odd half.
    let s0 = x[0] + x[7];
    let s1 = x[1] + x[6];
    let s2 = x[2] + x[5];
    let s3 = x[3] + x[4];
    let d0 = x[0] - x[7];
    let d1 = x[1] - x[6];
    let d2 = x[2] - x[5];
    let d3 = x[3] - x[4];

    let e0 = s0 + s3;
    let e1 = s1 + s2;
    let e2 = s1 - s2;
    let e3 = s0 - s3;

    let mut out = [0i64; 8];

    // Even half: DC/4 pair through the sqrt(8) normalization, 2/6 pair
    // through the 6pi/16 rotation.
    out[0] = div_round((e0 + e1) * INV_SQRT8, SCALE);
    out[4] = div_round((e0 - e1) * SQRT2_H, 2 * SCALE);
    out[2] = div_round(e3 * S6 + e2 * C6, 2 * SCALE);
    out[6] = div_round(e3 * C6 - e2 * S6, 2 * SCALE);

    // Odd half: full rotation through C1/S1/C3/S3.
    out[1] = div_round(d0 * C1 + d1 * C3 + d2 * S3 + d3 * S1, 2 * SCALE);
    out[3] = div_round(d0 * C3 - d1 * S1 - d2 * C1 - d3 * S3, 2 * SCALE);
    out[5] = div_round(d0 * S3 - d1 * C1 + d2 * S1 + d3 * C3, 2 * SCALE);
    out[7] = div_round(d0 * S1 - d1 * S3 + d2 * C3 - d3 * C1, 2 * SCALE);

    out
}

fn inverse_1d(x: &[i64; 8]) -> [i64; 8] {
    // Even half at doubled scale, no intermediate division.
    let p = 2 * x[0] * INV_SQRT8;
    let u = x[2] * S6 + x[6] * C6;
    let v = x[2] * C6 - x[6] * S6;
    let w = x[4] * SQRT2_H;

    let e = [p + u + w, p + v - w, p - v - w, p - u + w];

    // Odd half on the same scale: transpose of the forward rotation.
    let o = [
        x[1] * C1 + x[3] * C3 + x[5] * S3 + x[7] * S1,
        x[1] * C3 - x[3] * S1 - x[5] * C1 - x[7] * S3,
        x[1] * S3 - x[3] * C1 + x[5] * S1 + x[7] * C3,
        x[1] * S1 - x[3] * S3 + x[5] * C3 - x[7] * C1,
    ];

    // Final butterfly; the only division in the whole pass.
    let mut out = [0i64; 8];
    for n in 0..4 {
        out[n] = div_round(e[n] + o[n], 2 * SCALE);
        out[7 - n] = div_round(e[n] - o[n], 2 * SCALE);
    }
    out
}
