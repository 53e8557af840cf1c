//! Destinations for finished stamps.
use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::info;

use crate::error::{Error, Result};
use crate::io::writers::raster::write_rgba;
use crate::types::OutputFormat;

/// Consumer of finished stamp canvases, keyed by output identifier.
pub trait StampSink {
    fn write(&mut self, id: &str, image: &RgbaImage) -> Result<()>;
}

/// Writes each stamp as a file inside a directory. The format's extension is
/// appended unless the identifier already ends with one naming that format.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    format: OutputFormat,
}

impl DirectorySink {
    /// Creates `dir` (and parents) if needed.
    pub fn create(dir: &Path, format: OutputFormat) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            format,
        })
    }

    pub fn path_for(&self, id: &str) -> PathBuf {
        let path = self.dir.join(id);
        let has_format_ext = path
            .extension()
            .is_some_and(|ext| self.format.matches_extension(ext));
        if has_format_ext {
            path
        } else {
            self.dir.join(format!("{}.{}", id, self.format.extension()))
        }
    }
}

impl StampSink for DirectorySink {
    fn write(&mut self, id: &str, image: &RgbaImage) -> Result<()> {
        let path = self.path_for(id);
        write_rgba(&path, image, self.format).map_err(|e| Error::Write {
            id: id.to_string(),
            reason: format!("{:?}: {}", path, e),
        })?;
        info!("Saved {} stamp: {:?}", self.format, path);
        Ok(())
    }
}

/// Keeps stamps in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub stamps: Vec<(String, RgbaImage)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&RgbaImage> {
        self.stamps.iter().find(|(k, _)| k == id).map(|(_, img)| img)
    }
}

impl StampSink for MemorySink {
    fn write(&mut self, id: &str, image: &RgbaImage) -> Result<()> {
        self.stamps.push((id.to_string(), image.clone()));
        Ok(())
    }
}
