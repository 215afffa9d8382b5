//! Compression and decompression orchestration.
//!
//! Compress: raster → three signed planes (biased YCbCr) → zero-padded 8×8
//! tiles → forward transform per tile → quantized coefficients stored
//! contiguously per channel. Decompress reverses every step and always
//! produces an RGB raster of the original dimensions.
//!
//! Both directions are synchronous and share no mutable state; two calls on
//! two threads only share the read-only canonical tables.

pub mod wire;

use crate::color;
use crate::config::{Parameters, TransformKind};
use crate::error::{CodecError, Result};
use crate::progress::{NullObserver, TileObserver, TILE_CHUNK};
use crate::quant::QuantTable;
use crate::tiles::{self, TILE_LEN};
use crate::transform;
use crate::{Colorspace, RasterImage};

/// Quantized frequency-domain image, the output of [`compress`].
///
/// Each channel holds `num_tiles * 64` coefficients in row-major tile
/// order, row-major inside each tile (natural order, not zig-zag). The
/// quality factor and transform are carried along because decompression
/// needs both to rebuild the quantization tables and pick the inverse.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    /// Source image width in pixels.
    pub width: u32,
    /// Source image height in pixels.
    pub height: u32,
    /// Quality factor the tables were scaled with.
    pub quality_factor: f32,
    /// Transform the tiles went through.
    pub transform: TransformKind,
    /// Whether coefficients were stored unquantized.
    pub skip_quantization: bool,
    /// Tile count, always ⌈W/8⌉·⌈H/8⌉.
    pub num_tiles: usize,
    /// Quantized luma coefficients.
    pub luma: Vec<i32>,
    /// Quantized blue-difference chroma coefficients.
    pub chroma_b: Vec<i32>,
    /// Quantized red-difference chroma coefficients.
    pub chroma_r: Vec<i32>,
}

impl CompressedImage {
    /// Check the internal size invariants.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CodecError::InvalidDimensions(format!(
                "{}x{}",
                self.width, self.height
            )));
        }
        let expected_tiles = tiles::tile_count(self.width, self.height);
        if self.num_tiles != expected_tiles {
            return Err(CodecError::InvalidDimensions(format!(
                "tile count {} does not cover {}x{} (expected {})",
                self.num_tiles, self.width, self.height, expected_tiles
            )));
        }
        let expected_len = self.num_tiles * TILE_LEN;
        for (name, channel) in [
            ("luma", &self.luma),
            ("chroma_b", &self.chroma_b),
            ("chroma_r", &self.chroma_r),
        ] {
            if channel.is_empty() {
                return Err(CodecError::MissingInput("coefficient channel"));
            }
            if channel.len() != expected_len {
                return Err(CodecError::InvalidDimensions(format!(
                    "{name} holds {} coefficients, expected {expected_len}",
                    channel.len()
                )));
            }
        }
        Ok(())
    }
}

/// Allocate a zeroed signed plane, reporting failure instead of aborting.
fn alloc_signed(len: usize) -> Result<Vec<i32>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| CodecError::AllocationFailed(len * std::mem::size_of::<i32>()))?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Allocate a zeroed byte buffer, reporting failure instead of aborting.
fn alloc_bytes(len: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| CodecError::AllocationFailed(len))?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Compress a raster into quantized frequency coefficients.
pub fn compress(image: &RasterImage, params: &Parameters) -> Result<CompressedImage> {
    compress_observed(image, params, &mut NullObserver)
}

/// [`compress`] with a progress observer for cooperative platforms.
pub fn compress_observed(
    image: &RasterImage,
    params: &Parameters,
    observer: &mut dyn TileObserver,
) -> Result<CompressedImage> {
    image.validate()?;
    params.validate()?;

    let (width, height) = (image.width, image.height);
    let num_tiles = tiles::tile_count(width, height);
    let plane_len = width as usize * height as usize;

    log::debug!(
        "compress {}x{} {:?}: {:?} k={} ({} tiles)",
        width,
        height,
        image.colorspace,
        params.transform,
        params.quality_factor,
        num_tiles
    );

    let luma_table = QuantTable::new(params, true);
    let chroma_table = QuantTable::new(params, false);

    // Plane split. Grayscale maps straight onto the biased luma plane with
    // silent chroma.
    let mut plane_y = alloc_signed(plane_len)?;
    let mut plane_cb = alloc_signed(plane_len)?;
    let mut plane_cr = alloc_signed(plane_len)?;
    match image.colorspace {
        Colorspace::Rgb => {
            color::rgb_to_ycbcr_planes(&image.pixels, &mut plane_y, &mut plane_cb, &mut plane_cr);
        }
        Colorspace::Grayscale => {
            for (dst, &src) in plane_y.iter_mut().zip(image.pixels.iter()) {
                *dst = src as i32 - 128;
            }
        }
    }

    let coeff_len = num_tiles * TILE_LEN;
    let mut tiles_y = alloc_signed(coeff_len)?;
    let mut tiles_cb = alloc_signed(coeff_len)?;
    let mut tiles_cr = alloc_signed(coeff_len)?;
    tiles::extract_tiles(&plane_y, width, height, &mut tiles_y);
    tiles::extract_tiles(&plane_cb, width, height, &mut tiles_cb);
    tiles::extract_tiles(&plane_cr, width, height, &mut tiles_cr);
    drop(plane_y);
    drop(plane_cb);
    drop(plane_cr);

    let mut out_y = alloc_signed(coeff_len)?;
    let mut out_cb = alloc_signed(coeff_len)?;
    let mut out_cr = alloc_signed(coeff_len)?;

    // The identity transform bypasses quantization unconditionally: it has
    // no scaling semantics for a step size to be meaningful against.
    let quantize = params.transform != TransformKind::Identity && !params.skip_quantization;

    for b in 0..num_tiles {
        let span = b * TILE_LEN..(b + 1) * TILE_LEN;
        for (src, dst, table) in [
            (&tiles_y, &mut out_y, &luma_table),
            (&tiles_cb, &mut out_cb, &chroma_table),
            (&tiles_cr, &mut out_cr, &chroma_table),
        ] {
            let mut input = [0i32; TILE_LEN];
            input.copy_from_slice(&src[span.clone()]);
            let mut freq = [0i32; TILE_LEN];
            transform::forward(params.transform, &input, &mut freq);

            let out = &mut dst[span.clone()];
            if quantize {
                for (i, &c) in freq.iter().enumerate() {
                    out[i] = table.quantize(c, i);
                }
            } else {
                out.copy_from_slice(&freq);
            }
        }
        if (b + 1) % TILE_CHUNK == 0 {
            observer.on_tiles(b + 1, num_tiles);
        }
    }
    observer.on_tiles(num_tiles, num_tiles);

    Ok(CompressedImage {
        width,
        height,
        quality_factor: params.quality_factor,
        transform: params.transform,
        skip_quantization: params.skip_quantization,
        num_tiles,
        luma: out_y,
        chroma_b: out_cb,
        chroma_r: out_cr,
    })
}

/// Reconstruct an RGB raster from quantized coefficients.
pub fn decompress(compressed: &CompressedImage) -> Result<RasterImage> {
    decompress_observed(compressed, &mut NullObserver)
}

/// [`decompress`] with a progress observer for cooperative platforms.
pub fn decompress_observed(
    compressed: &CompressedImage,
    observer: &mut dyn TileObserver,
) -> Result<RasterImage> {
    compressed.validate()?;

    let (width, height) = (compressed.width, compressed.height);
    let num_tiles = compressed.num_tiles;
    let plane_len = width as usize * height as usize;

    log::debug!(
        "decompress {}x{}: {:?} k={} ({} tiles)",
        width,
        height,
        compressed.transform,
        compressed.quality_factor,
        num_tiles
    );

    // Rebuild the tables the encoder used. Dequantization is a multiply,
    // so the reciprocal halves of these sit unused.
    let params = Parameters {
        quality_factor: compressed.quality_factor,
        transform: compressed.transform,
        ..Default::default()
    };
    params.validate()?;
    let luma_table = QuantTable::new(&params, true);
    let chroma_table = QuantTable::new(&params, false);

    let coeff_len = num_tiles * TILE_LEN;
    let mut tiles_y = alloc_signed(coeff_len)?;
    let mut tiles_cb = alloc_signed(coeff_len)?;
    let mut tiles_cr = alloc_signed(coeff_len)?;

    let dequantize =
        compressed.transform != TransformKind::Identity && !compressed.skip_quantization;

    for b in 0..num_tiles {
        let span = b * TILE_LEN..(b + 1) * TILE_LEN;
        for (src, dst, table) in [
            (&compressed.luma, &mut tiles_y, &luma_table),
            (&compressed.chroma_b, &mut tiles_cb, &chroma_table),
            (&compressed.chroma_r, &mut tiles_cr, &chroma_table),
        ] {
            let coeffs = &src[span.clone()];
            let mut freq = [0i32; TILE_LEN];
            if dequantize {
                for (i, &c) in coeffs.iter().enumerate() {
                    freq[i] = table.dequantize(c, i);
                }
            } else {
                freq.copy_from_slice(coeffs);
            }
            let mut sample = [0i32; TILE_LEN];
            transform::inverse(compressed.transform, &freq, &mut sample);
            dst[span.clone()].copy_from_slice(&sample);
        }
        if (b + 1) % TILE_CHUNK == 0 {
            observer.on_tiles(b + 1, num_tiles);
        }
    }
    observer.on_tiles(num_tiles, num_tiles);

    let mut plane_y = alloc_signed(plane_len)?;
    let mut plane_cb = alloc_signed(plane_len)?;
    let mut plane_cr = alloc_signed(plane_len)?;
    tiles::assemble_plane(&tiles_y, width, height, &mut plane_y);
    tiles::assemble_plane(&tiles_cb, width, height, &mut plane_cb);
    tiles::assemble_plane(&tiles_cr, width, height, &mut plane_cr);
    drop(tiles_y);
    drop(tiles_cb);
    drop(tiles_cr);

    let mut rgb = alloc_bytes(plane_len * 3)?;
    color::ycbcr_to_rgb_planes(&plane_y, &plane_cb, &plane_cr, &mut rgb);

    Ok(RasterImage {
        width,
        height,
        colorspace: Colorspace::Rgb,
        pixels: rgb,
    })
}
