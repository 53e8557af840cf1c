use serde::{Deserialize, Serialize};

use crate::core::geometry::{CanvasSize, GridSpec, Margin};
use crate::error::{Error, Result};
use crate::types::{ClassifierRule, EmptyRegionPolicy, GridArea, OutputFormat, ResampleFilter};

/// Extraction parameters suitable for manifests and CLI presets.
/// A single value of this type drives the whole per-stamp pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionParams {
    /// Grid used by cell-addressed stamps; explicit rectangles ignore it
    pub grid: Option<GridSpec>,
    pub grid_area: GridArea,
    pub margin: Margin,
    /// Classifier rules tried in order until one finds foreground
    pub rules: Vec<ClassifierRule>,
    /// Source pixels with alpha at or below this count as background
    pub alpha_floor: u8,
    /// Regions with fewer foreground pixels than this are treated as empty
    pub min_foreground: usize,
    /// Pixels kept around the located content
    pub padding: u32,
    pub canvas: CanvasSize,
    /// Box the content is scaled into before centring; None means the whole canvas
    pub fit: Option<CanvasSize>,
    pub filter: ResampleFilter,
    pub empty_policy: EmptyRegionPolicy,
    pub format: OutputFormat,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            grid: None,
            grid_area: GridArea::Image,
            margin: Margin::None,
            rules: vec![ClassifierRule::ChannelThreshold { threshold: 240 }],
            alpha_floor: 10,
            min_foreground: 1,
            padding: 10,
            canvas: CanvasSize::square(128),
            fit: None,
            filter: ResampleFilter::Lanczos3,
            empty_policy: EmptyRegionPolicy::FullRegion,
            format: OutputFormat::Png,
        }
    }
}

impl ExtractionParams {
    /// Box the content is scaled into.
    pub fn fit_box(&self) -> CanvasSize {
        self.fit.unwrap_or(self.canvas)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rules.is_empty() {
            return Err(Error::MissingArgument {
                arg: "classifier rule".to_string(),
            });
        }
        for rule in &self.rules {
            if let ClassifierRule::MeanSpread { spread, .. } = rule {
                if !spread.is_finite() || *spread < 0.0 {
                    return Err(Error::invalid("spread", spread));
                }
            }
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(Error::invalid("canvas", self.canvas));
        }
        if let Some(fit) = self.fit {
            if fit.width == 0 || fit.height == 0 || !fit.fits_within(&self.canvas) {
                return Err(Error::invalid("fit", fit));
            }
        }
        if let Some(grid) = self.grid {
            if grid.rows == 0 || grid.cols == 0 {
                return Err(Error::invalid("grid", format!("{}x{}", grid.rows, grid.cols)));
            }
        }
        if let Margin::Ratio(ratio) = self.margin {
            if !(0.0..0.5).contains(&ratio) {
                return Err(Error::invalid("margin-ratio", ratio));
            }
        }
        Ok(())
    }
}
