use std::path::Path;

use image::RgbaImage;
use tracing::info;

use crate::error::{Error, Result};

/// Decodes the composite sheet and converts it to 8-bit RGBA.
/// Any decode failure is reported as [`Error::Load`].
pub fn load_sheet(path: &Path) -> Result<RgbaImage> {
    let decoded = image::open(path).map_err(|source| Error::Load {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Loaded sheet {:?}: {}x{} ({:?})",
        path,
        decoded.width(),
        decoded.height(),
        decoded.color()
    );
    Ok(decoded.to_rgba8())
}
