use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::tiff::TiffEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::Result;
use crate::types::OutputFormat;

/// Encodes `image` as RGBA8 into `writer`. PNG output uses best compression.
pub fn encode_rgba<W: Write + Seek>(writer: W, image: &RgbaImage, format: OutputFormat) -> Result<()> {
    let (cols, rows) = image.dimensions();
    match format {
        OutputFormat::Png => {
            let encoder = PngEncoder::new_with_quality(writer, CompressionType::Best, FilterType::Adaptive);
            encoder.write_image(image.as_raw(), cols, rows, ExtendedColorType::Rgba8)?;
        }
        OutputFormat::Tiff => {
            let encoder = TiffEncoder::new(writer);
            encoder.write_image(image.as_raw(), cols, rows, ExtendedColorType::Rgba8)?;
        }
    }
    Ok(())
}

pub fn encode_rgba_to_vec(image: &RgbaImage, format: OutputFormat) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    encode_rgba(&mut cursor, image, format)?;
    Ok(cursor.into_inner())
}

pub fn write_rgba(output: &Path, image: &RgbaImage, format: OutputFormat) -> Result<()> {
    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    encode_rgba(&mut writer, image, format)?;
    writer.flush()?;
    Ok(())
}
