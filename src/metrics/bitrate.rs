//! Bits-per-pixel proxy from post-quantization sparsity.

use crate::codec::CompressedImage;
use crate::tiles::TILE_LEN;

/// Zig-zag scan order: position `p` visits natural index `ZIGZAG[p]`.
pub const ZIGZAG: [usize; TILE_LEN] = [
    0, 1, 8, 16, 9, 2, 3, 10,
    17, 24, 32, 25, 18, 11, 4, 5,
    12, 19, 26, 33, 40, 48, 41, 34,
    27, 20, 13, 6, 7, 14, 21, 28,
    35, 42, 49, 56, 57, 50, 43, 36,
    29, 22, 15, 23, 30, 37, 44, 51,
    58, 59, 52, 45, 38, 31, 39, 46,
    53, 60, 61, 54, 47, 55, 62, 63,
];

/// Estimated bits per pixel for a compressed image.
///
/// Each block contributes `(last_nonzero + 1) * 8` bits, where
/// `last_nonzero` is the highest zig-zag position holding a non-zero
/// coefficient; the scan bottoms out at the DC slot, so even an all-zero
/// block is charged one 8-bit coefficient. The result is total bits over
/// total coefficients across all three channels, at most 8.0.
pub fn bitrate_proxy(compressed: &CompressedImage) -> f64 {
    let mut total_bits = 0u64;
    let mut total_blocks = 0u64;

    for channel in [&compressed.luma, &compressed.chroma_b, &compressed.chroma_r] {
        for block in channel.chunks_exact(TILE_LEN) {
            total_bits += (last_nonzero(block) as u64 + 1) * 8;
            total_blocks += 1;
        }
    }

    if total_blocks == 0 {
        return 0.0;
    }
    total_bits as f64 / (total_blocks * TILE_LEN as u64) as f64
}

/// Highest zig-zag position with a non-zero coefficient, 0 when none.
fn last_nonzero(block: &[i32]) -> usize {
    for pos in (1..TILE_LEN).rev() {
        if block[ZIGZAG[pos]] != 0 {
            return pos;
        }
    }
    0
}
