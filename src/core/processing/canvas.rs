//! Canvas composition: fits content into a box and centres it on a fully
//! transparent canvas of fixed size.
use image::{Rgba, RgbaImage};
use tracing::info;

use crate::core::geometry::CanvasSize;
use crate::core::processing::classify::TRANSPARENT_WHITE;
use crate::core::processing::resize::fit_image;
use crate::error::{Error, Result};
use crate::types::ResampleFilter;

/// Transparent `(255, 255, 255, 0)` canvas of exactly `size`.
pub fn blank_canvas(size: CanvasSize) -> RgbaImage {
    RgbaImage::from_pixel(size.width, size.height, TRANSPARENT_WHITE)
}

/// Scales `content` to fit `canvas` (Lanczos3, never upscaling) and centres it.
pub fn compose(content: &RgbaImage, canvas: CanvasSize) -> Result<RgbaImage> {
    compose_within(content, canvas, canvas, ResampleFilter::Lanczos3)
}

/// Scales `content` to fit the `fit` box and centres it on a `canvas`-sized
/// transparent image. `fit` larger than `canvas` is reduced to `canvas`.
///
/// Empty (0-pixel) content yields the blank canvas.
pub fn compose_within(
    content: &RgbaImage,
    canvas: CanvasSize,
    fit: CanvasSize,
    filter: ResampleFilter,
) -> Result<RgbaImage> {
    let mut out = blank_canvas(canvas);
    if content.width() == 0 || content.height() == 0 {
        info!("compose: empty content, emitting blank {} canvas", canvas);
        return Ok(out);
    }

    let bounds = CanvasSize::new(fit.width.min(canvas.width), fit.height.min(canvas.height));
    let scaled = fit_image(content, bounds, filter)?;
    if scaled.width() > canvas.width || scaled.height() > canvas.height {
        return Err(Error::Invariant(format!(
            "scaled content {}x{} exceeds canvas {}",
            scaled.width(),
            scaled.height(),
            canvas
        )));
    }

    let pad_left = (canvas.width - scaled.width()) / 2;
    let pad_top = (canvas.height - scaled.height()) / 2;
    info!(
        "compose: content {}x{} at ({}, {}) on {} canvas",
        scaled.width(),
        scaled.height(),
        pad_left,
        pad_top,
        canvas
    );
    paste_over(&mut out, &scaled, pad_left, pad_top);
    Ok(out)
}

/// Alpha-aware paste of `src` onto `dst` at `(left, top)`; pixels falling
/// outside `dst` are dropped and fully transparent source pixels are skipped.
pub fn paste_over(dst: &mut RgbaImage, src: &RgbaImage, left: u32, top: u32) {
    let (dst_cols, dst_rows) = dst.dimensions();
    for (x, y, pixel) in src.enumerate_pixels() {
        let (dx, dy) = (left + x, top + y);
        if dx >= dst_cols || dy >= dst_rows || pixel.0[3] == 0 {
            continue;
        }
        let under = dst.get_pixel_mut(dx, dy);
        *under = source_over(*pixel, *under);
    }
}

/// Porter-Duff "source over" in straight (non-premultiplied) 8-bit RGBA.
fn source_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src.0[3] as u32;
    let da = dst.0[3] as u32;
    if sa == 255 || da == 0 {
        return src;
    }

    // Destination weight scaled by 255: da * (255 - sa) / 255, kept at 255x precision.
    let dw = da * (255 - sa);
    let out_a_255 = sa * 255 + dw;
    let mut out = [0u8; 4];
    for c in 0..3 {
        let num = src.0[c] as u32 * sa * 255 + dst.0[c] as u32 * dw;
        out[c] = ((num + out_a_255 / 2) / out_a_255).min(255) as u8;
    }
    out[3] = ((out_a_255 + 127) / 255).min(255) as u8;
    Rgba(out)
}
