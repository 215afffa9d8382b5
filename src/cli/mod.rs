//! Command-line interface for running codec experiments.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;

use crate::codec::{compress, decompress, wire};
use crate::config::{Parameters, TransformKind};
use crate::metrics::{bitrate_proxy, psnr, quality_report};
use crate::RasterImage;

/// Block-Transform Codec Experiment Tool
///
/// Compresses rasters through the four interchangeable 8×8 transforms and
/// reports PSNR and estimated rate, so transform trade-offs can be compared
/// on identical inputs.
#[derive(Parser, Debug)]
#[command(name = "tilepress")]
#[command(version)]
#[command(about = "Lossy block-transform codec experiments")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the transform × quality matrix over one input
    Compare {
        /// Input image file; a synthetic 320x240 test raster when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Quality factors to sweep
        #[arg(short = 'Q', long, value_delimiter = ',', default_value = "1,2,4")]
        quality: Vec<f32>,

        /// Write the result table as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Compress and reconstruct one image, reporting quality
    Roundtrip {
        /// Input image file
        #[arg(short, long)]
        input: PathBuf,

        /// Where to write the reconstructed image
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Quality factor
        #[arg(short = 'Q', long, default_value = "2.0")]
        quality: f32,

        /// Block transform
        #[arg(short, long, value_enum, default_value = "fast")]
        transform: TransformArg,

        /// TOML parameter file overriding the flags above
        #[arg(long)]
        params_file: Option<PathBuf>,

        /// Also dump the quantized coefficient stream
        #[arg(long)]
        coefficients: Option<PathBuf>,
    },
}

/// Block transform argument.
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum TransformArg {
    /// Butterfly DCT-II
    Fast,
    /// Cosine-matrix DCT-II (reference)
    Matrix,
    /// Multiplierless approximation
    Approx,
    /// Copy-through
    Identity,
}

impl From<TransformArg> for TransformKind {
    fn from(arg: TransformArg) -> Self {
        match arg {
            TransformArg::Fast => TransformKind::Fast,
            TransformArg::Matrix => TransformKind::Matrix,
            TransformArg::Approx => TransformKind::Approx,
            TransformArg::Identity => TransformKind::Identity,
        }
    }
}

/// One row of the comparison matrix.
#[derive(Debug, Clone, Serialize)]
pub struct CompareRow {
    /// Transform under test.
    pub transform: TransformKind,
    /// Quality factor.
    pub quality: f32,
    /// Reconstruction PSNR in dB.
    pub psnr_db: f64,
    /// Bitrate proxy in bits per pixel.
    pub bits_per_pixel: f64,
    /// Compression wall time in microseconds.
    pub compress_us: u128,
}

/// Run the CLI application.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else if !cli.quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match cli.command {
        Commands::Compare {
            input,
            quality,
            json,
        } => run_compare(input, quality, json, cli.quiet),
        Commands::Roundtrip {
            input,
            output,
            quality,
            transform,
            params_file,
            coefficients,
        } => run_roundtrip(
            input,
            output,
            quality,
            transform.into(),
            params_file,
            coefficients,
            cli.quiet,
        ),
    }
}

/// Run the comparison matrix.
fn run_compare(
    input: Option<PathBuf>,
    qualities: Vec<f32>,
    json: Option<PathBuf>,
    quiet: bool,
) -> anyhow::Result<()> {
    let image = match input {
        Some(path) => load_image(&path)?,
        None => synthetic_raster(320, 240),
    };

    let transforms = [
        TransformKind::Fast,
        TransformKind::Matrix,
        TransformKind::Approx,
        TransformKind::Identity,
    ];
    let configs: Vec<(TransformKind, f32)> = transforms
        .iter()
        .flat_map(|&t| qualities.iter().map(move |&q| (t, q)))
        .collect();

    // Each configuration owns its inputs and outputs; the codec has no
    // shared mutable state, so the matrix can fan out freely.
    let rows: Vec<CompareRow> = configs
        .par_iter()
        .map(|&(transform, quality)| {
            let params = Parameters::new(quality, transform);
            let start = Instant::now();
            let compressed = compress(&image, &params)?;
            let compress_us = start.elapsed().as_micros();
            let recon = decompress(&compressed)?;
            Ok(CompareRow {
                transform,
                quality,
                psnr_db: psnr(&image, &recon)?,
                bits_per_pixel: bitrate_proxy(&compressed),
                compress_us,
            })
        })
        .collect::<Result<_, anyhow::Error>>()?;

    if !quiet {
        println!(
            "Transform comparison over {}x{} input",
            image.width, image.height
        );
        println!("{:<10} {:>8} {:>10} {:>8} {:>12}", "transform", "quality", "psnr", "bpp", "time");
        for row in &rows {
            println!(
                "{:<10} {:>8.2} {:>8.2}dB {:>8.3} {:>10}us",
                format!("{:?}", row.transform),
                row.quality,
                row.psnr_db,
                row.bits_per_pixel,
                row.compress_us
            );
        }
    }

    if let Some(path) = json {
        let text = serde_json::to_string_pretty(&rows)?;
        std::fs::write(&path, text)
            .with_context(|| format!("writing report to {}", path.display()))?;
        log::info!("wrote JSON report to {}", path.display());
    }
    Ok(())
}

/// Run one round trip.
fn run_roundtrip(
    input: PathBuf,
    output: Option<PathBuf>,
    quality: f32,
    transform: TransformKind,
    params_file: Option<PathBuf>,
    coefficients: Option<PathBuf>,
    quiet: bool,
) -> anyhow::Result<()> {
    let params = match params_file {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            toml::from_str::<Parameters>(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => Parameters::new(quality, transform),
    };

    let image = load_image(&input)?;
    let start = Instant::now();
    let compressed = compress(&image, &params)?;
    let elapsed = start.elapsed();
    let recon = decompress(&compressed)?;
    let report = quality_report(&image, &recon, &compressed)?;

    if !quiet {
        println!("Round trip: {}", input.display());
        println!(
            "  {:?} at k={} over {} tiles in {} us",
            params.transform,
            params.quality_factor,
            compressed.num_tiles,
            elapsed.as_micros()
        );
        println!("{report}");
    }

    if let Some(path) = coefficients {
        wire::write_compressed(
            &compressed,
            std::fs::File::create(&path)
                .with_context(|| format!("creating {}", path.display()))?,
        )?;
        log::info!("wrote coefficient stream to {}", path.display());
    }

    if let Some(path) = output {
        save_image(&recon, &path)?;
        log::info!("wrote reconstruction to {}", path.display());
    }
    Ok(())
}

/// Load any picture file as an RGB raster.
fn load_image(path: &Path) -> anyhow::Result<RasterImage> {
    let decoded = image::open(path).with_context(|| format!("opening {}", path.display()))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(RasterImage::new_rgb(width, height, rgb.into_raw()))
}

/// Write an RGB raster to a picture file.
fn save_image(raster: &RasterImage, path: &Path) -> anyhow::Result<()> {
    let buffer = image::RgbImage::from_raw(raster.width, raster.height, raster.pixels.clone())
        .context("reconstruction buffer does not match its dimensions")?;
    buffer
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Deterministic stand-in for a photographic test input: smooth gradients
/// with a little textured noise.
fn synthetic_raster(width: u32, height: u32) -> RasterImage {
    let mut state = 12345u32;
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
    for y in 0..height {
        for x in 0..width {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            let noise = ((state >> 16) & 0x1F) as i32 - 16;
            let base = (x as i32 * 255 / width as i32 + y as i32 * 255 / height as i32) / 2;
            let r = (base + noise).clamp(0, 255) as u8;
            let g = (255 - base + noise / 2).clamp(0, 255) as u8;
            let b = ((base + 128) % 256) as u8;
            pixels.extend_from_slice(&[r, g, b]);
        }
    }
    RasterImage::new_rgb(width, height, pixels)
}
