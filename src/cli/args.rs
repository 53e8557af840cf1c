use clap::Parser;
use std::path::PathBuf;

use stampcut::{ClassifierKind, EmptyRegionPolicy, OutputFormat, Rect, ResampleFilter};

#[derive(Parser, Debug)]
#[command(name = "stampcut", version, about = "Cut a stamp sheet into transparent, fixed-size icons")]
pub struct CliArgs {
    /// Input sheet image (PNG, JPEG, ...)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output directory for the extracted stamps
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// JSON manifest with `params` and `stamps`; replaces the processing flags below
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Number of grid rows on the sheet
    #[arg(long)]
    pub rows: Option<u32>,

    /// Number of grid columns on the sheet
    #[arg(long)]
    pub cols: Option<u32>,

    /// Explicit stamp rectangle `X,Y,W,H` (repeatable); bypasses the grid
    #[arg(long = "rect")]
    pub rects: Vec<Rect>,

    /// Comma-separated output names in row-major order; an empty name skips its cell
    #[arg(long, value_delimiter = ',')]
    pub names: Vec<String>,

    /// Prefix for output names
    #[arg(long, default_value = "stamp")]
    pub prefix: String,

    /// Shrink each region side by this fraction of its size (0 <= r < 0.5)
    #[arg(long, conflicts_with_all = ["margin_px", "grow_px"])]
    pub margin_ratio: Option<f64>,

    /// Shrink each region side by a fixed number of pixels
    #[arg(long, conflicts_with = "grow_px")]
    pub margin_px: Option<u32>,

    /// Grow each region side by a fixed number of pixels (clamped to the sheet)
    #[arg(long)]
    pub grow_px: Option<u32>,

    /// Background classifier (channel or mean-spread)
    #[arg(long, value_enum, default_value_t = ClassifierKind::Channel)]
    pub classifier: ClassifierKind,

    /// Brightness threshold at or above which a pixel counts as background
    #[arg(long, default_value_t = 240)]
    pub threshold: u8,

    /// Maximum channel standard deviation for the mean-spread classifier
    #[arg(long, default_value_t = 20.0)]
    pub spread: f64,

    /// Thresholds retried in order when a region comes out empty (repeatable)
    #[arg(long = "fallback-threshold")]
    pub fallback_thresholds: Vec<u8>,

    /// Source pixels with alpha at or below this count as background
    #[arg(long, default_value_t = 10)]
    pub alpha_floor: u8,

    /// Regions with fewer foreground pixels than this are treated as empty
    #[arg(long, default_value_t = 1)]
    pub min_foreground: usize,

    /// Pixels kept around the located content
    #[arg(long, default_value_t = 10)]
    pub padding: u32,

    /// Output canvas size: `WxH` or a single side (e.g. 128)
    #[arg(long, default_value = "128")]
    pub canvas: String,

    /// Box the content is scaled into before centring (defaults to the canvas)
    #[arg(long)]
    pub fit: Option<String>,

    /// Resampling filter used when content must shrink
    #[arg(long, value_enum, default_value_t = ResampleFilter::Lanczos3)]
    pub resample: ResampleFilter,

    /// What to emit for regions without foreground
    #[arg(long, value_enum, default_value_t = EmptyRegionPolicy::FullRegion)]
    pub empty: EmptyRegionPolicy,

    /// Output format (png or tiff)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// Lay the grid over the bounding box of the sheet's content instead of the whole image
    #[arg(long, default_value_t = false)]
    pub grid_over_content: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Print per-cell foreground counts instead of extracting
    #[arg(long, default_value_t = false)]
    pub analyze: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
