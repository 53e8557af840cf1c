//! Shared types and enums used across stampcut.
//! Includes `ClassifierRule`, `ClassifierKind`, `EmptyRegionPolicy`, `GridArea`,
//! `ResampleFilter` and `OutputFormat`.
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Rule deciding whether a single pixel belongs to the sheet background.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum ClassifierRule {
    /// Background iff every one of R, G, B is `>= threshold`.
    ChannelThreshold { threshold: u8 },
    /// Background iff `mean(R,G,B) >= threshold` and the population standard
    /// deviation of the three channels is `< spread`.
    MeanSpread { threshold: u8, spread: f64 },
}

impl ClassifierRule {
    /// Same rule family with a different brightness threshold.
    pub fn with_threshold(&self, threshold: u8) -> Self {
        match *self {
            ClassifierRule::ChannelThreshold { .. } => {
                ClassifierRule::ChannelThreshold { threshold }
            }
            ClassifierRule::MeanSpread { spread, .. } => {
                ClassifierRule::MeanSpread { threshold, spread }
            }
        }
    }
}

impl std::fmt::Display for ClassifierRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierRule::ChannelThreshold { threshold } => {
                write!(f, "Channel(>={})", threshold)
            }
            ClassifierRule::MeanSpread { threshold, spread } => {
                write!(f, "MeanSpread(mean>={}, std<{})", threshold, spread)
            }
        }
    }
}

/// Classifier family selectable from the command line.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierKind {
    Channel,
    MeanSpread,
}

impl std::fmt::Display for ClassifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassifierKind::Channel => write!(f, "Channel"),
            ClassifierKind::MeanSpread => write!(f, "MeanSpread"),
        }
    }
}

/// What to emit when no foreground is found in a region after every rule was tried.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyRegionPolicy {
    /// Emit the background-stripped region without cropping to content.
    FullRegion,
    /// Emit the blank transparent canvas as a placeholder.
    Blank,
    /// Emit nothing for this stamp.
    Skip,
}

impl std::fmt::Display for EmptyRegionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptyRegionPolicy::FullRegion => write!(f, "FullRegion"),
            EmptyRegionPolicy::Blank => write!(f, "Blank"),
            EmptyRegionPolicy::Skip => write!(f, "Skip"),
        }
    }
}

/// Area the grid is laid over.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridArea {
    /// The whole sheet.
    #[default]
    Image,
    /// The bounding box of all foreground on the sheet.
    Content,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Bilinear,
    CatmullRom,
    Lanczos3,
    /// Box filter, equivalent to area averaging when downscaling.
    Area,
}

impl std::fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResampleFilter::Nearest => write!(f, "Nearest"),
            ResampleFilter::Bilinear => write!(f, "Bilinear"),
            ResampleFilter::CatmullRom => write!(f, "CatmullRom"),
            ResampleFilter::Lanczos3 => write!(f, "Lanczos3"),
            ResampleFilter::Area => write!(f, "Area"),
        }
    }
}

/// Output raster formats; both carry an alpha channel.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Png,
    Tiff,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Tiff => "tiff",
        }
    }

    /// Whether `ext` (e.g. `tif`, `PNG`) names this format.
    pub fn matches_extension(&self, ext: &std::ffi::OsStr) -> bool {
        image::ImageFormat::from_extension(ext) == Some(self.image_format())
    }

    pub fn image_format(&self) -> image::ImageFormat {
        match self {
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Tiff => image::ImageFormat::Tiff,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "PNG"),
            OutputFormat::Tiff => write!(f, "TIFF"),
        }
    }
}
