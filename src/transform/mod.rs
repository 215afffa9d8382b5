//! The four interchangeable 8×8 block transforms.
//!
//! All four share one shape: 64 signed samples in, 64 signed samples out,
//! computed as a 1D pass over the 8 rows into a scratch tile followed by a
//! 1D pass over the 8 columns (the inverse mirrors this as columns first).
//! Tiles are independent; there is no cross-tile state.
//!
//! - [`fast`]: butterfly DCT-II with orthonormal scaling.
//! - [`matrix`]: the same DCT-II by direct cosine-matrix summation. Kept as
//!   the correctness reference; it produces bit-identical output to `fast`
//!   because both draw their scaled cosines from [`crate::fixed`].
//! - [`approx`]: the Cintra–Bayer signed-ternary approximation; the forward
//!   pass is multiplier-free and its non-orthonormal row norms are absorbed
//!   by the quantizer.
//! - Identity: copy-through, for isolating non-transform pipeline error.

pub mod approx;
pub mod fast;
pub mod matrix;

use crate::config::TransformKind;
use crate::tiles::TILE_LEN;

/// Apply the forward transform selected by `kind`.
pub fn forward(kind: TransformKind, input: &[i32; TILE_LEN], output: &mut [i32; TILE_LEN]) {
    match kind {
        TransformKind::Fast => fast::forward(input, output),
        TransformKind::Matrix => matrix::forward(input, output),
        TransformKind::Approx => approx::forward(input, output),
        TransformKind::Identity => output.copy_from_slice(input),
    }
}

/// Apply the inverse transform selected by `kind`.
pub fn inverse(kind: TransformKind, input: &[i32; TILE_LEN], output: &mut [i32; TILE_LEN]) {
    match kind {
        TransformKind::Fast => fast::inverse(input, output),
        TransformKind::Matrix => matrix::inverse(input, output),
        TransformKind::Approx => approx::inverse(input, output),
        TransformKind::Identity => output.copy_from_slice(input),
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::tiles::TILE_LEN;

    /// Deterministic pseudo-random tiles for transform tests.
    pub fn lcg_tiles(seed: u32, count: usize, amplitude: i32) -> Vec<[i32; TILE_LEN]> {
        let mut state = seed;
        let mut next = move || {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            (state >> 16) as i32 % (2 * amplitude + 1) - amplitude
        };
        (0..count)
            .map(|_| std::array::from_fn(|_| next()))
            .collect()
    }
}
