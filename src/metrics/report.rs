//! Combined quality report for codec experiments.

use crate::codec::CompressedImage;
use crate::error::Result;
use crate::RasterImage;

use super::{bitrate_proxy, psnr, validate_pair, PSNR_IDENTICAL};

/// PSNR, estimated rate, and error statistics for one round trip.
#[derive(Debug, Clone)]
pub struct QualityReport {
    /// PSNR in decibels.
    pub psnr_db: f64,
    /// Bitrate proxy in bits per pixel.
    pub bits_per_pixel: f64,
    /// Largest absolute byte difference.
    pub max_error: u8,
    /// Mean absolute byte difference.
    pub mean_error: f64,
    /// Number of differing bytes.
    pub diff_bytes: usize,
    /// Total bytes compared.
    pub total_bytes: usize,
}

impl QualityReport {
    /// True when not a single byte differs.
    pub fn is_exact(&self) -> bool {
        self.diff_bytes == 0
    }
}

impl std::fmt::Display for QualityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.psnr_db >= PSNR_IDENTICAL {
            writeln!(f, "PSNR: identical ({} dB sentinel)", PSNR_IDENTICAL)?;
        } else {
            writeln!(f, "PSNR: {:.2} dB", self.psnr_db)?;
        }
        writeln!(f, "Rate proxy: {:.3} bpp", self.bits_per_pixel)?;
        write!(
            f,
            "Errors: max {}, mean {:.4}, {} / {} bytes differ",
            self.max_error, self.mean_error, self.diff_bytes, self.total_bytes
        )
    }
}

/// Build a [`QualityReport`] for a reconstruction against its source.
pub fn quality_report(
    original: &RasterImage,
    reconstructed: &RasterImage,
    compressed: &CompressedImage,
) -> Result<QualityReport> {
    validate_pair(original, reconstructed)?;

    let mut max_error = 0u8;
    let mut abs_sum = 0u64;
    let mut diff_bytes = 0usize;
    for (&a, &b) in original.pixels.iter().zip(reconstructed.pixels.iter()) {
        let diff = a.abs_diff(b);
        if diff > 0 {
            diff_bytes += 1;
            abs_sum += diff as u64;
            max_error = max_error.max(diff);
        }
    }

    Ok(QualityReport {
        psnr_db: psnr(original, reconstructed)?,
        bits_per_pixel: bitrate_proxy(compressed),
        max_error,
        mean_error: abs_sum as f64 / original.pixels.len() as f64,
        diff_bytes,
        total_bytes: original.pixels.len(),
    })
}
