//! Extraction and reassembly of 8×8 tiles from a rectangular sample plane.
//!
//! Tiles are stored contiguously in row-major tile order; inside each tile,
//! 8 rows of 8 samples, row-major. A tile at tile-column `c`, tile-row `r`
//! covers source rows `[8r, 8r+8)` and columns `[8c, 8c+8)`. Samples past
//! the right or bottom edge are zero-filled on extraction and skipped on
//! reassembly, so padding never leaks back into the image.

/// Tile edge length in samples.
pub const TILE_DIM: usize = 8;
/// Samples per tile.
pub const TILE_LEN: usize = TILE_DIM * TILE_DIM;

/// Number of tiles needed to cover a `width` × `height` plane.
pub fn tile_count(width: u32, height: u32) -> usize {
    let across = (width as usize).div_ceil(TILE_DIM);
    let down = (height as usize).div_ceil(TILE_DIM);
    across * down
}

/// Split a plane into zero-padded tiles.
///
/// `tiles` must hold exactly `tile_count(width, height) * TILE_LEN` samples.
pub fn extract_tiles(plane: &[i32], width: u32, height: u32, tiles: &mut [i32]) {
    let (w, h) = (width as usize, height as usize);
    debug_assert_eq!(plane.len(), w * h);
    debug_assert_eq!(tiles.len(), tile_count(width, height) * TILE_LEN);

    let across = w.div_ceil(TILE_DIM);
    let down = h.div_ceil(TILE_DIM);

    for tr in 0..down {
        for tc in 0..across {
            let tile = &mut tiles[(tr * across + tc) * TILE_LEN..][..TILE_LEN];
            for row in 0..TILE_DIM {
                let sy = tr * TILE_DIM + row;
                for col in 0..TILE_DIM {
                    let sx = tc * TILE_DIM + col;
                    tile[row * TILE_DIM + col] = if sy < h && sx < w {
                        plane[sy * w + sx]
                    } else {
                        0
                    };
                }
            }
        }
    }
}

/// Copy tile samples back into a plane, ignoring padded positions.
pub fn assemble_plane(tiles: &[i32], width: u32, height: u32, plane: &mut [i32]) {
    let (w, h) = (width as usize, height as usize);
    debug_assert_eq!(plane.len(), w * h);
    debug_assert_eq!(tiles.len(), tile_count(width, height) * TILE_LEN);

    let across = w.div_ceil(TILE_DIM);
    let down = h.div_ceil(TILE_DIM);

    for tr in 0..down {
        for tc in 0..across {
            let tile = &tiles[(tr * across + tc) * TILE_LEN..][..TILE_LEN];
            for row in 0..TILE_DIM {
                let sy = tr * TILE_DIM + row;
                if sy >= h {
                    break;
                }
                for col in 0..TILE_DIM {
                    let sx = tc * TILE_DIM + col;
                    if sx >= w {
                        break;
                    }
                    plane[sy * w + sx] = tile[row * TILE_DIM + col];
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_count() {
        assert_eq!(tile_count(8, 8), 1);
        assert_eq!(tile_count(16, 8), 2);
        assert_eq!(tile_count(9, 9), 4);
        assert_eq!(tile_count(320, 240), 40 * 30);
        assert_eq!(tile_count(1, 1), 1);
    }

    #[test]
    fn test_exact_multiple_round_trips() {
        let (w, h) = (16u32, 8u32);
        let plane: Vec<i32> = (0..w as i32 * h as i32).collect();
        let mut tiles = vec![0i32; tile_count(w, h) * TILE_LEN];
        extract_tiles(&plane, w, h, &mut tiles);

        // First tile starts at the top-left corner, second at column 8.
        assert_eq!(tiles[0], 0);
        assert_eq!(tiles[1], 1);
        assert_eq!(tiles[TILE_DIM], 16); // second row of tile 0 = plane row 1
        assert_eq!(tiles[TILE_LEN], 8); // tile 1, first sample

        let mut back = vec![0i32; plane.len()];
        assemble_plane(&tiles, w, h, &mut back);
        assert_eq!(back, plane);
    }

    #[test]
    fn test_ragged_edges_are_zero_padded() {
        let (w, h) = (9u32, 9u32);
        let plane: Vec<i32> = vec![7; 81];
        let mut tiles = vec![-1i32; tile_count(w, h) * TILE_LEN];
        extract_tiles(&plane, w, h, &mut tiles);
        assert_eq!(tiles.len(), 4 * TILE_LEN);

        // Tile 1 covers columns 8..16: only its first column is in bounds.
        let right = &tiles[TILE_LEN..2 * TILE_LEN];
        for row in 0..TILE_DIM {
            assert_eq!(right[row * TILE_DIM], 7);
            for col in 1..TILE_DIM {
                assert_eq!(right[row * TILE_DIM + col], 0);
            }
        }
        // Tile 3 (bottom-right) has a single in-bounds sample.
        let corner = &tiles[3 * TILE_LEN..];
        assert_eq!(corner[0], 7);
        assert_eq!(corner.iter().filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn test_ragged_reassembly_ignores_padding() {
        let (w, h) = (9u32, 9u32);
        let plane: Vec<i32> = (0..81).collect();
        let mut tiles = vec![0i32; tile_count(w, h) * TILE_LEN];
        extract_tiles(&plane, w, h, &mut tiles);

        // Poison every padded slot; reassembly must never read them.
        let mut poisoned = tiles.clone();
        let mut reference = vec![0i32; 81];
        assemble_plane(&tiles, w, h, &mut reference);
        for t in 0..4 {
            for row in 0..TILE_DIM {
                for col in 0..TILE_DIM {
                    let sy = (t / 2) * TILE_DIM + row;
                    let sx = (t % 2) * TILE_DIM + col;
                    if sy >= 9 || sx >= 9 {
                        poisoned[t * TILE_LEN + row * TILE_DIM + col] = i32::MAX;
                    }
                }
            }
        }
        let mut back = vec![0i32; 81];
        assemble_plane(&poisoned, w, h, &mut back);
        assert_eq!(back, plane);
        assert_eq!(back, reference);
    }
}
