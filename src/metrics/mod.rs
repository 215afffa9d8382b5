//! Quality metrics that drive codec experiments.
//!
//! - **PSNR**: pixel-level fidelity of a reconstruction against its source.
//! - **Bitrate proxy**: a cheap per-block estimate of coded size from
//!   post-quantization sparsity. It corresponds to no real entropy coder;
//!   treat it as a comparative number between configurations, not a rate.
//! - [`QualityReport`]: both of the above plus error statistics, for the
//!   experiment CLI.

mod bitrate;
mod psnr;
mod report;

pub use bitrate::{bitrate_proxy, ZIGZAG};
pub use psnr::{psnr, PSNR_IDENTICAL};
pub use report::{quality_report, QualityReport};

use crate::error::{CodecError, Result};
use crate::RasterImage;

/// Check that two rasters are comparable sample for sample.
pub(crate) fn validate_pair(original: &RasterImage, reconstructed: &RasterImage) -> Result<()> {
    if original.width != reconstructed.width || original.height != reconstructed.height {
        return Err(CodecError::InvalidDimensions(format!(
            "metric inputs disagree: {}x{} vs {}x{}",
            original.width, original.height, reconstructed.width, reconstructed.height
        )));
    }
    if original.pixels.len() != reconstructed.pixels.len() {
        return Err(CodecError::InvalidDimensions(format!(
            "metric buffers disagree: {} vs {} bytes",
            original.pixels.len(),
            reconstructed.pixels.len()
        )));
    }
    if original.pixels.is_empty() {
        return Err(CodecError::MissingInput("metric pixel buffer"));
    }
    Ok(())
}
