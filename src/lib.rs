//! Lossy Block-Transform Image Codec
//!
//! A portable, fixed-point still-image codec shaped like the JPEG baseline
//! pipeline: BT.601 color transform, 8×8 tiling with zero padding, a block
//! transform, and scalar quantization. It stops at quantized coefficients —
//! there is no entropy coder and the output is not a JPEG file.
//!
//! The block transform is interchangeable so quality, arithmetic cost and
//! multiplier count can be compared on identical inputs:
//!
//! - **Fast**: butterfly DCT-II, few multiplications
//! - **Matrix**: the same DCT-II in reference matrix form
//! - **Approx**: a multiplierless signed-ternary approximation
//! - **Identity**: passthrough for isolating pipeline error
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use tilepress::{compress, decompress, Parameters, RasterImage, TransformKind};
//!
//! let image = RasterImage::new_rgb(width, height, pixels);
//! let params = Parameters::new(2.0, TransformKind::Fast);
//! let compressed = compress(&image, &params)?;
//! let reconstructed = decompress(&compressed)?;
//! ```
//!
//! Everything runs in fixed-point integer arithmetic; there is no shared
//! mutable state, so independent compressions may run on separate threads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod fixed;
pub mod metrics;
pub mod progress;
pub mod quant;
pub mod tiles;
pub mod transform;

// Re-export commonly used types
pub use codec::wire::{read_compressed, write_compressed};
pub use codec::{compress, compress_observed, decompress, decompress_observed, CompressedImage};
pub use config::{Parameters, TransformKind, MAX_QUALITY, MIN_QUALITY};
pub use error::{CodecError, Result};
pub use metrics::{bitrate_proxy, psnr, quality_report, QualityReport, PSNR_IDENTICAL};
pub use progress::{CallbackObserver, NullObserver, TileObserver};

/// How the pixel buffer of a [`RasterImage`] is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Colorspace {
    /// Interleaved 8-bit R, G, B triplets.
    Rgb,
    /// One 8-bit sample per pixel.
    Grayscale,
}

impl Colorspace {
    /// Bytes per pixel.
    pub fn channels(self) -> usize {
        match self {
            Colorspace::Rgb => 3,
            Colorspace::Grayscale => 1,
        }
    }
}

/// A rectangular 8-bit image, row-major from the top-left corner.
#[derive(Debug, Clone)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel layout of `pixels`.
    pub colorspace: Colorspace,
    /// Raw samples, `width * height * channels` bytes.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// An RGB image over an interleaved pixel buffer.
    pub fn new_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            colorspace: Colorspace::Rgb,
            pixels,
        }
    }

    /// A grayscale image over a one-byte-per-pixel buffer.
    pub fn new_grayscale(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            colorspace: Colorspace::Grayscale,
            pixels,
        }
    }

    /// Expected length of `pixels` for the stated dimensions.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.colorspace.channels()
    }

    /// Check that the buffer agrees with the stated dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.pixels.is_empty() {
            return Err(CodecError::MissingInput("pixel buffer"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(CodecError::InvalidDimensions(format!(
                "{}x{}",
                self.width, self.height
            )));
        }
        if self.pixels.len() != self.expected_len() {
            return Err(CodecError::InvalidDimensions(format!(
                "{}x{} {:?} needs {} bytes, buffer holds {}",
                self.width,
                self.height,
                self.colorspace,
                self.expected_len(),
                self.pixels.len()
            )));
        }
        Ok(())
    }
}

/// Library version information.
pub mod version {
    /// Library version string.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// Library name.
    pub const NAME: &str = env!("CARGO_PKG_NAME");

    /// Get full version string.
    pub fn full_version() -> String {
        format!("{} {}", NAME, VERSION)
    }
}
