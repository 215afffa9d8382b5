//! Byte-stream form of [`CompressedImage`].
//!
//! The codec itself mandates no file format; this is the layout our tools
//! speak: a little-endian header (magic, width, height, tile count,
//! transform tag, skip flag, quality factor) followed by the three
//! coefficient channels as i32. Coefficients are stored at full width
//! because unquantized approximate-transform output exceeds 16 bits.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::config::TransformKind;
use crate::error::{CodecError, Result};
use crate::tiles::{self, TILE_LEN};

use super::CompressedImage;

/// Stream magic, "tilepress coefficients v1".
const MAGIC: &[u8; 4] = b"TPC1";

/// Serialize `compressed` onto `writer`.
pub fn write_compressed<W: Write>(compressed: &CompressedImage, mut writer: W) -> Result<()> {
    compressed.validate()?;

    writer.write_all(MAGIC)?;
    writer.write_u32::<LittleEndian>(compressed.width)?;
    writer.write_u32::<LittleEndian>(compressed.height)?;
    writer.write_u32::<LittleEndian>(compressed.num_tiles as u32)?;
    writer.write_u8(compressed.transform.tag())?;
    writer.write_u8(compressed.skip_quantization as u8)?;
    writer.write_f32::<LittleEndian>(compressed.quality_factor)?;

    for channel in [&compressed.luma, &compressed.chroma_b, &compressed.chroma_r] {
        for &c in channel.iter() {
            writer.write_i32::<LittleEndian>(c)?;
        }
    }
    Ok(())
}

/// Deserialize a [`CompressedImage`] from `reader`.
pub fn read_compressed<R: Read>(mut reader: R) -> Result<CompressedImage> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(CodecError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "not a tilepress coefficient stream",
        )));
    }

    let width = reader.read_u32::<LittleEndian>()?;
    let height = reader.read_u32::<LittleEndian>()?;
    let num_tiles = reader.read_u32::<LittleEndian>()? as usize;
    let transform = TransformKind::from_tag(reader.read_u8()?)?;
    let skip_quantization = reader.read_u8()? != 0;
    let quality_factor = reader.read_f32::<LittleEndian>()?;

    if width == 0 || height == 0 || num_tiles != tiles::tile_count(width, height) {
        return Err(CodecError::InvalidDimensions(format!(
            "header claims {num_tiles} tiles for {width}x{height}"
        )));
    }

    let coeff_len = num_tiles * TILE_LEN;
    let mut read_channel = || -> Result<Vec<i32>> {
        let mut channel = Vec::new();
        channel
            .try_reserve_exact(coeff_len)
            .map_err(|_| CodecError::AllocationFailed(coeff_len * 4))?;
        for _ in 0..coeff_len {
            channel.push(reader.read_i32::<LittleEndian>()?);
        }
        Ok(channel)
    };
    let luma = read_channel()?;
    let chroma_b = read_channel()?;
    let chroma_r = read_channel()?;

    let compressed = CompressedImage {
        width,
        height,
        quality_factor,
        transform,
        skip_quantization,
        num_tiles,
        luma,
        chroma_b,
        chroma_r,
    };
    compressed.validate()?;
    Ok(compressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::compress;
    use crate::config::Parameters;
    use crate::RasterImage;
    use std::io::Cursor;

    fn sample() -> CompressedImage {
        let pixels: Vec<u8> = (0..24 * 16 * 3).map(|i| (i * 7 % 256) as u8).collect();
        let image = RasterImage::new_rgb(24, 16, pixels);
        compress(&image, &Parameters::preview()).unwrap()
    }

    #[test]
    fn test_round_trip_in_memory() {
        let original = sample();
        let mut bytes = Vec::new();
        write_compressed(&original, &mut bytes).unwrap();

        let expected = 4 + 4 + 4 + 4 + 1 + 1 + 4 + 3 * original.num_tiles * TILE_LEN * 4;
        assert_eq!(bytes.len(), expected);

        let back = read_compressed(Cursor::new(&bytes)).unwrap();
        assert_eq!(back.width, original.width);
        assert_eq!(back.height, original.height);
        assert_eq!(back.quality_factor, original.quality_factor);
        assert_eq!(back.transform, original.transform);
        assert_eq!(back.skip_quantization, original.skip_quantization);
        assert_eq!(back.luma, original.luma);
        assert_eq!(back.chroma_b, original.chroma_b);
        assert_eq!(back.chroma_r, original.chroma_r);
    }

    #[test]
    fn test_round_trip_through_file() {
        let original = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.tpc");
        write_compressed(&original, std::fs::File::create(&path).unwrap()).unwrap();
        let back = read_compressed(std::fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(back.luma, original.luma);
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let mut bytes = Vec::new();
        write_compressed(&sample(), &mut bytes).unwrap();
        bytes[0] = b'X';
        assert!(matches!(
            read_compressed(Cursor::new(&bytes)),
            Err(CodecError::Io(_))
        ));
    }

    #[test]
    fn test_bad_transform_tag_is_rejected() {
        let mut bytes = Vec::new();
        write_compressed(&sample(), &mut bytes).unwrap();
        bytes[16] = 9; // transform tag slot
        assert!(matches!(
            read_compressed(Cursor::new(&bytes)),
            Err(CodecError::InvalidTransform(9))
        ));
    }

    #[test]
    fn test_inconsistent_tile_count_is_rejected() {
        let mut bytes = Vec::new();
        write_compressed(&sample(), &mut bytes).unwrap();
        bytes[12] = 99; // num_tiles low byte
        assert!(matches!(
            read_compressed(Cursor::new(&bytes)),
            Err(CodecError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_truncated_stream_is_an_io_error() {
        let mut bytes = Vec::new();
        write_compressed(&sample(), &mut bytes).unwrap();
        bytes.truncate(bytes.len() - 5);
        assert!(matches!(
            read_compressed(Cursor::new(&bytes)),
            Err(CodecError::Io(_))
        ));
    }
}
