//! Compression parameters and the transform selector.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, Result};

/// Smallest accepted quality factor (finest quantization).
pub const MIN_QUALITY: f32 = 1.0;
/// Largest accepted quality factor (coarsest quantization).
pub const MAX_QUALITY: f32 = 8.0;

/// The four interchangeable 8×8 block transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// Butterfly DCT-II (exact, few multiplications).
    #[default]
    Fast,
    /// Cosine-matrix DCT-II (exact, correctness reference).
    Matrix,
    /// Multiplierless signed-ternary approximation.
    Approx,
    /// Copy-through; isolates non-transform pipeline error.
    Identity,
}

impl TransformKind {
    /// Stable tag used by the wire format.
    pub fn tag(self) -> u8 {
        match self {
            TransformKind::Fast => 0,
            TransformKind::Matrix => 1,
            TransformKind::Approx => 2,
            TransformKind::Identity => 3,
        }
    }

    /// Inverse of [`Self::tag`].
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(TransformKind::Fast),
            1 => Ok(TransformKind::Matrix),
            2 => Ok(TransformKind::Approx),
            3 => Ok(TransformKind::Identity),
            other => Err(CodecError::InvalidTransform(other)),
        }
    }
}

/// Knobs for one compression call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Quality factor in [1, 8]; smaller means finer quantization and
    /// higher fidelity.
    pub quality_factor: f32,
    /// Which block transform to run.
    pub transform: TransformKind,
    /// Use the standard Q50 tables. Alternative table sets are reserved;
    /// only `true` validates.
    pub use_standard_tables: bool,
    /// Pass transform coefficients through unquantized.
    pub skip_quantization: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            quality_factor: 2.0,
            transform: TransformKind::Fast,
            use_standard_tables: true,
            skip_quantization: false,
        }
    }
}

impl Parameters {
    /// Parameters with the given quality factor and transform.
    pub fn new(quality_factor: f32, transform: TransformKind) -> Self {
        Self {
            quality_factor,
            transform,
            ..Default::default()
        }
    }

    /// Finest quantization on the fast exact transform.
    pub fn archival() -> Self {
        Self::new(1.0, TransformKind::Fast)
    }

    /// The default trade-off.
    pub fn balanced() -> Self {
        Self::new(2.0, TransformKind::Fast)
    }

    /// Coarse quantization on the multiplierless transform.
    pub fn preview() -> Self {
        Self::new(4.0, TransformKind::Approx)
    }

    /// Check that the parameter set is one the codec specifies.
    pub fn validate(&self) -> Result<()> {
        if !self.quality_factor.is_finite()
            || self.quality_factor < MIN_QUALITY
            || self.quality_factor > MAX_QUALITY
        {
            return Err(CodecError::Config(format!(
                "quality factor {} outside [{MIN_QUALITY}, {MAX_QUALITY}]",
                self.quality_factor
            )));
        }
        if !self.use_standard_tables {
            return Err(CodecError::Config(
                "non-standard quantization tables are not supported".into(),
            ));
        }
        Ok(())
    }
}
