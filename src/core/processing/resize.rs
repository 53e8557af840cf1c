use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use image::RgbaImage;
use tracing::{debug, info};

use crate::core::geometry::CanvasSize;
use crate::error::{Error, Result};
use crate::types::ResampleFilter;

/// Largest `(width, height)` with the aspect ratio of `original` that fits in `bounds`.
/// Content already inside `bounds` keeps its size; nothing is ever upscaled.
pub fn calculate_fit_dimensions(original: (u32, u32), bounds: CanvasSize) -> (u32, u32) {
    let (cols, rows) = original;
    if cols == 0 || rows == 0 {
        return (0, 0);
    }
    if cols <= bounds.width && rows <= bounds.height {
        return (cols, rows);
    }

    // Compare cols/rows against width/height without floating point.
    let width_limited = cols as u64 * bounds.height as u64 >= rows as u64 * bounds.width as u64;
    if width_limited {
        let scale = bounds.width as f64 / cols as f64;
        let new_rows = ((rows as f64 * scale).round() as u32).clamp(1, bounds.height.max(1));
        (bounds.width, new_rows)
    } else {
        let scale = bounds.height as f64 / rows as f64;
        let new_cols = ((cols as f64 * scale).round() as u32).clamp(1, bounds.width.max(1));
        (new_cols, bounds.height)
    }
}

fn resize_alg(filter: ResampleFilter) -> ResizeAlg {
    match filter {
        ResampleFilter::Nearest => ResizeAlg::Nearest,
        ResampleFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ResampleFilter::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
        ResampleFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        ResampleFilter::Area => ResizeAlg::Convolution(FilterType::Box),
    }
}

/// Resamples an RGBA image to exactly `target_cols x target_rows`.
/// Colour channels are premultiplied by alpha while filtering so transparent
/// background does not bleed into the artwork edges.
pub fn resize_rgba_image(
    image: &RgbaImage,
    target_cols: u32,
    target_rows: u32,
    filter: ResampleFilter,
) -> Result<RgbaImage> {
    let (cols, rows) = image.dimensions();
    let resize_options = ResizeOptions::new().resize_alg(resize_alg(filter));
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(cols, rows, image.as_raw().clone(), PixelType::U8x4)?;
    let mut dst_image = Image::new(target_cols, target_rows, PixelType::U8x4);
    resizer.resize(&src_image, &mut dst_image, &resize_options)?;

    RgbaImage::from_raw(target_cols, target_rows, dst_image.into_vec()).ok_or_else(|| {
        Error::Processing(format!(
            "resized buffer does not match {}x{}",
            target_cols, target_rows
        ))
    })
}

/// Uniformly scales `image` down so it fits in `bounds`; returns a copy
/// unchanged when it already fits.
pub fn fit_image(image: &RgbaImage, bounds: CanvasSize, filter: ResampleFilter) -> Result<RgbaImage> {
    let original = image.dimensions();
    let (new_cols, new_rows) = calculate_fit_dimensions(original, bounds);
    if (new_cols, new_rows) == original {
        debug!(
            "fit_image: {}x{} already fits {}, no resampling",
            original.0, original.1, bounds
        );
        return Ok(image.clone());
    }

    info!(
        "Original size: {}x{}, New size: {}x{} ({})",
        original.0, original.1, new_cols, new_rows, filter
    );
    resize_rgba_image(image, new_cols, new_rows, filter)
}
