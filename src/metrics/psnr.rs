//! PSNR (Peak Signal-to-Noise Ratio) against an 8-bit peak of 255.

use crate::error::Result;
use crate::RasterImage;

use super::validate_pair;

/// Sentinel returned for effectively identical rasters.
pub const PSNR_IDENTICAL: f64 = 100.0;

/// PSNR in decibels between two rasters of identical layout.
///
/// The mean squared error runs over every byte of the pixel buffers. An
/// MSE below 1e-10 returns [`PSNR_IDENTICAL`]; the function is symmetric
/// in its arguments and never negative for 8-bit data.
pub fn psnr(original: &RasterImage, reconstructed: &RasterImage) -> Result<f64> {
    validate_pair(original, reconstructed)?;

    let sum: f64 = original
        .pixels
        .iter()
        .zip(reconstructed.pixels.iter())
        .map(|(&a, &b)| {
            let diff = a as f64 - b as f64;
            diff * diff
        })
        .sum();
    let mse = sum / original.pixels.len() as f64;

    if mse < 1e-10 {
        return Ok(PSNR_IDENTICAL);
    }
    Ok(10.0 * (255.0 * 255.0 / mse).log10())
}
